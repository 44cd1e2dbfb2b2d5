//! Floating point rectangles and sizes in viewport or media coordinates.

use serde::{Deserialize, Serialize};

/// Width/height pair, used for media natural size and fill size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero or negative.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

/// Axis-aligned rectangle stored by its edges.
///
/// `right >= left` and `bottom >= top` for well-formed rectangles. Zero-area
/// rectangles are representable; code that divides by [`Rect::width`] or
/// [`Rect::height`] has to check [`Rect::has_area`] first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle anchored at the origin with the given size.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) * 0.5
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) * 0.5
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// True when the rectangle covers no area (`left >= right` or `top >= bottom`).
    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    /// True when both dimensions are finite and strictly positive, i.e. the
    /// rectangle can be used as the denominator of a scale factor.
    pub fn has_area(&self) -> bool {
        let (w, h) = (self.width(), self.height());
        w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0
    }

    /// Return a copy shifted by `(dx, dy)`.
    pub fn offset(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// True when all four edges are finite.
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }

    /// Edge-wise comparison with an absolute tolerance.
    pub fn approx_eq(&self, other: &Rect, epsilon: f32) -> bool {
        (self.left - other.left).abs() <= epsilon
            && (self.top - other.top).abs() <= epsilon
            && (self.right - other.right).abs() <= epsilon
            && (self.bottom - other.bottom).abs() <= epsilon
    }
}

/// Integer rectangle in media pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}
