//! Per-class non-maximum suppression pipeline.
//!
//! Candidates are partitioned by class label, each partition is reduced with
//! greedy IoU suppression, and survivors are concatenated in ascending class
//! order. Classes never suppress each other.

pub(crate) mod greedy;
#[cfg(feature = "rayon")]
pub(crate) mod parallel;

use crate::candidate::partition::partition_by_class;
use crate::candidate::Detection;
use crate::trace::{trace_debug, trace_event, trace_span};
use crate::util::{DetPostError, DetPostResult};

pub use greedy::suppress_class;

/// Configuration for the suppression pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct SuppressConfig {
    /// Candidates whose IoU with a kept box exceeds this value are dropped.
    pub iou_threshold: f32,
    /// Size of the class label space; labels must be `< num_classes`.
    pub num_classes: usize,
    /// Optional confidence pre-filter; candidates scoring below it are
    /// discarded before suppression.
    pub min_score: Option<f32>,
    /// Suppress class partitions in parallel (requires the `rayon` feature;
    /// ignored otherwise).
    pub parallel: bool,
}

impl Default for SuppressConfig {
    fn default() -> Self {
        Self {
            iou_threshold: 0.45,
            num_classes: 80,
            min_score: None,
            parallel: false,
        }
    }
}

impl SuppressConfig {
    /// Checks the configuration for contract violations.
    pub fn validate(&self) -> DetPostResult<()> {
        if self.num_classes == 0 {
            return Err(DetPostError::InvalidClassCount {
                num_classes: self.num_classes,
            });
        }
        validate_iou_threshold(self.iou_threshold)?;
        if let Some(min_score) = self.min_score {
            if min_score.is_nan() {
                return Err(DetPostError::InvalidMinScore { value: min_score });
            }
        }
        Ok(())
    }
}

fn validate_iou_threshold(iou_threshold: f32) -> DetPostResult<()> {
    if !(0.0..=1.0).contains(&iou_threshold) {
        return Err(DetPostError::InvalidIouThreshold {
            value: iou_threshold,
        });
    }
    Ok(())
}

/// Reusable suppression pipeline with a validated configuration.
#[derive(Clone, Debug, Default)]
pub struct Suppressor {
    cfg: SuppressConfig,
}

impl Suppressor {
    /// Creates a suppressor after validating `cfg`.
    pub fn new(cfg: SuppressConfig) -> DetPostResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &SuppressConfig {
        &self.cfg
    }

    /// Runs the full pipeline on a flat collection of candidates.
    ///
    /// Every candidate's class label is checked, including candidates that
    /// the `min_score` filter would drop.
    pub fn run(&self, candidates: &[Detection]) -> DetPostResult<Vec<Detection>> {
        let cfg = &self.cfg;
        let _span = trace_span!(
            "suppress_all_classes",
            candidates = candidates.len(),
            classes = cfg.num_classes,
            parallel = cfg.parallel
        )
        .entered();

        let mut partitions = partition_by_class(candidates, cfg.num_classes)?;
        if let Some(min_score) = cfg.min_score {
            for partition in partitions.iter_mut() {
                partition.retain(|det| det.score >= min_score);
            }
        }

        let survivors = suppress_partitions(&partitions, cfg.iou_threshold, cfg.parallel);
        let out: Vec<Detection> = survivors.into_iter().flatten().collect();
        trace_event!("suppression_done", kept = out.len());
        Ok(out)
    }
}

/// Partitions candidates by class, suppresses each class independently and
/// concatenates the survivors in ascending class order.
pub fn suppress_all_classes(
    candidates: &[Detection],
    iou_threshold: f32,
    num_classes: usize,
) -> DetPostResult<Vec<Detection>> {
    Suppressor::new(SuppressConfig {
        iou_threshold,
        num_classes,
        ..SuppressConfig::default()
    })?
    .run(candidates)
}

fn suppress_partitions_seq(
    partitions: &[Vec<Detection>],
    iou_threshold: f32,
) -> Vec<Vec<Detection>> {
    partitions
        .iter()
        .enumerate()
        .map(|(class_id, partition)| {
            let kept = suppress_class(partition, iou_threshold);
            trace_debug!(
                "class_suppressed",
                class_id = class_id,
                input = partition.len(),
                kept = kept.len()
            );
            kept
        })
        .collect()
}

#[cfg(feature = "rayon")]
fn suppress_partitions(
    partitions: &[Vec<Detection>],
    iou_threshold: f32,
    parallel: bool,
) -> Vec<Vec<Detection>> {
    if parallel {
        parallel::suppress_partitions_par(partitions, iou_threshold)
    } else {
        suppress_partitions_seq(partitions, iou_threshold)
    }
}

#[cfg(not(feature = "rayon"))]
fn suppress_partitions(
    partitions: &[Vec<Detection>],
    iou_threshold: f32,
    _parallel: bool,
) -> Vec<Vec<Detection>> {
    suppress_partitions_seq(partitions, iou_threshold)
}
