//! Low-level building blocks for custom post-processing pipelines.
//!
//! These functions expose the individual stages behind `Suppressor`. Most
//! users should prefer `suppress_all_classes` or a configured `Suppressor`.

pub use crate::candidate::order::sort_by_score_desc;
pub use crate::candidate::partition::partition_by_class;
pub use crate::candidate::Detection;
pub use crate::geometry::{iou, Rect};
pub use crate::suppress::suppress_class;
