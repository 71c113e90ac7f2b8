//! Rayon-parallel class suppression (feature-gated).
//!
//! Class partitions share no data, so each one is reduced on the rayon pool.
//! The indexed collect keeps results in class order regardless of which
//! partition finishes first.

use crate::candidate::Detection;
use crate::suppress::greedy::suppress_class;
use crate::trace::trace_debug;
use rayon::prelude::*;

/// Suppresses every partition in parallel, returning survivors per class.
pub(crate) fn suppress_partitions_par(
    partitions: &[Vec<Detection>],
    iou_threshold: f32,
) -> Vec<Vec<Detection>> {
    partitions
        .par_iter()
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
