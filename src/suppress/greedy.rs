//! Greedy IoU-based non-maximum suppression within one class.

use crate::candidate::order::sort_by_score_desc;
use crate::candidate::Detection;

/// Applies greedy non-maximum suppression to candidates of a single class.
///
/// Candidates are stable-sorted by descending score and kept if their IoU
/// with every previously kept candidate is at most `iou_threshold`. A
/// candidate whose IoU equals the threshold is kept. Class labels are
/// ignored; callers partition by class first.
pub fn suppress_class(candidates: &[Detection], iou_threshold: f32) -> Vec<Detection> {
    let mut sorted = candidates.to_vec();
    sort_by_score_desc(&mut sorted);

    let mut kept: Vec<Detection> = Vec::new();
    'outer: for candidate in sorted {
        for kept_det in kept.iter() {
            if candidate.iou(kept_det) > iou_threshold {
                continue 'outer;
            }
        }
        kept.push(candidate);
    }

    kept
}
