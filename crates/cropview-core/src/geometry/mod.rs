//! Rectangle and affine transform math.
//!
//! Everything here is pure: no session state, no logging side effects other
//! than warnings for guarded degenerate input.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downwards
//! - Viewport rectangles are in host pixels, media rectangles in media pixels

mod fit;
mod matrix;
mod rect;

pub use fit::{fit_center_rect, fit_center_transform, is_closure_of};
pub use matrix::Matrix;
pub use rect::{PixelRect, Rect, Size};
