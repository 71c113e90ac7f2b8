//! Detection candidates and their per-class bookkeeping.
//!
//! Includes stable score ordering and class partitioning.

pub(crate) mod order;
pub(crate) mod partition;

use crate::geometry::Rect;

/// One model-proposed box with its confidence and class label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    /// Box in corner form.
    pub rect: Rect,
    /// Confidence score; higher is better.
    pub score: f32,
    /// Class label in `[0, num_classes)`.
    pub class_id: usize,
}

impl Detection {
    /// Creates a detection candidate.
    pub const fn new(rect: Rect, score: f32, class_id: usize) -> Self {
        Self {
            rect,
            score,
            class_id,
        }
    }

    /// Intersection-over-Union of the two boxes, ignoring class labels.
    pub fn iou(&self, other: &Detection) -> f32 {
        self.rect.iou(&other.rect)
    }
}
