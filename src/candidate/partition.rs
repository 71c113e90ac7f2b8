//! Per-class partitioning of detection candidates.

use crate::candidate::Detection;
use crate::util::{DetPostError, DetPostResult};

/// Splits candidates into one bucket per class label.
///
/// Returns exactly `num_classes` buckets; each keeps the relative input
/// order of its candidates. A label outside `[0, num_classes)` is reported
/// with the index of the first offending candidate.
pub fn partition_by_class(
    candidates: &[Detection],
    num_classes: usize,
) -> DetPostResult<Vec<Vec<Detection>>> {
    if num_classes == 0 {
        return Err(DetPostError::InvalidClassCount { num_classes });
    }

    let mut buckets: Vec<Vec<Detection>> = vec![Vec::new(); num_classes];
    for (index, candidate) in candidates.iter().enumerate() {
        let bucket = buckets
            .get_mut(candidate.class_id)
            .ok_or(DetPostError::ClassOutOfRange {
                index,
                class_id: candidate.class_id,
                num_classes,
            })?;
        bucket.push(*candidate);
    }
    Ok(buckets)
}
