//! detpost reduces raw object-detection candidates to a final set of
//! non-overlapping detections.
//!
//! Candidates are partitioned by class label and each class is reduced with
//! greedy IoU-based non-maximum suppression. Class partitions are
//! independent and can be processed in parallel via the `rayon` feature.

mod candidate;
pub mod geometry;
pub mod lowlevel;
pub mod suppress;
mod trace;
pub mod util;

pub use candidate::Detection;
pub use geometry::{iou, Rect};
pub use suppress::{suppress_all_classes, suppress_class, SuppressConfig, Suppressor};
pub use util::{DetPostError, DetPostResult};

pub use candidate::partition::partition_by_class;
