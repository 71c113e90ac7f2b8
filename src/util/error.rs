//! Error types for detpost.

use thiserror::Error;

/// Result alias for detpost operations.
pub type DetPostResult<T> = std::result::Result<T, DetPostError>;

/// Contract violations reported by the suppression pipeline.
///
/// Degenerate geometry and empty inputs are not errors; only caller-side
/// parameter or labelling mistakes end up here.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DetPostError {
    /// The class count must be at least one.
    #[error("invalid class count: {num_classes} (must be at least 1)")]
    InvalidClassCount { num_classes: usize },
    /// A candidate carries a class label outside `[0, num_classes)`.
    #[error("candidate {index} has class label {class_id}, expected < {num_classes}")]
    ClassOutOfRange {
        index: usize,
        class_id: usize,
        num_classes: usize,
    },
    /// The IoU threshold is NaN or outside `[0, 1]`.
    #[error("invalid IoU threshold: {value} (must be within [0, 1])")]
    InvalidIouThreshold { value: f32 },
    /// The minimum score filter is NaN.
    #[error("invalid minimum score: {value}")]
    InvalidMinScore { value: f32 },
}
