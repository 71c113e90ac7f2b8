//! Intersection-over-Union for corner-form rectangles.

use crate::geometry::Rect;

/// Signed length of the overlap of two 1-D intervals.
#[inline]
pub(crate) fn overlap_1d(min_a: f32, max_a: f32, min_b: f32, max_b: f32) -> f32 {
    max_a.min(max_b) - min_a.max(min_b)
}

/// Computes the Intersection-over-Union of two rectangles.
///
/// Returns exactly `0.0` when the boxes do not overlap on either axis or
/// when the union area is zero. The ratio is not clamped, so malformed
/// boxes with negative area can produce values outside `[0, 1]`.
pub fn iou(a: &Rect, b: &Rect) -> f32 {
    let overlap_x = overlap_1d(a.left, a.right, b.left, b.right);
    let overlap_y = overlap_1d(a.top, a.bottom, b.top, b.bottom);
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return 0.0;
    }

    let inter = overlap_x * overlap_y;
    let union = a.area() + b.area() - inter;
    if union == 0.0 {
        return 0.0;
    }
    inter / union
}
