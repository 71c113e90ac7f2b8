//! Axis-aligned rectangles and overlap geometry.
//!
//! `Rect` stores corner coordinates as given by the upstream decoder. No
//! ordering is enforced between `left`/`right` or `top`/`bottom`: malformed
//! boxes are carried through and only affect the overlap math, which treats
//! them as non-overlapping.

pub(crate) mod overlap;

pub use overlap::iou;

/// Axis-aligned rectangle in corner form.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Left edge (minimum x for well-formed boxes).
    pub left: f32,
    /// Top edge (minimum y for well-formed boxes).
    pub top: f32,
    /// Right edge (maximum x for well-formed boxes).
    pub right: f32,
    /// Bottom edge (maximum y for well-formed boxes).
    pub bottom: f32,
}

impl Rect {
    /// Creates a rectangle from its four edges.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a rectangle from its top-left corner and size.
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Signed width, `right - left`.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Signed height, `bottom - top`.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Signed area; zero or negative for degenerate boxes.
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Intersection-over-Union with another rectangle.
    pub fn iou(&self, other: &Rect) -> f32 {
        iou(self, other)
    }
}

impl From<[f32; 4]> for Rect {
    fn from(value: [f32; 4]) -> Self {
        Self::new(value[0], value[1], value[2], value[3])
    }
}

impl From<Rect> for [f32; 4] {
    fn from(value: Rect) -> Self {
        [value.left, value.top, value.right, value.bottom]
    }
}
