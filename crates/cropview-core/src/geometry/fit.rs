//! Fit-center and closure helpers.

use log::warn;

use super::{Matrix, Rect};
use crate::error::{CropError, Result};

/// Transform that centers `src` on `dst` and uniformly scales it to fit.
///
/// The centers are brought together first, then the result is scaled about
/// the center of `dst` by `min(dst.w / src.w, dst.h / src.h)`, so the mapped
/// `src` keeps its aspect ratio and lies entirely within `dst`.
///
/// # Errors
///
/// Returns [`CropError::InvalidGeometry`] when `src` has no area.
pub fn fit_center_transform(src: &Rect, dst: &Rect) -> Result<Matrix> {
    if !src.has_area() {
        warn!("fit_center_transform: degenerate source {:?}", src);
        return Err(CropError::geometry(format!(
            "cannot fit a {}x{} rectangle",
            src.width(),
            src.height()
        )));
    }

    let mut matrix = Matrix::translate(
        dst.center_x() - src.center_x(),
        dst.center_y() - src.center_y(),
    );
    let scale = (dst.width() / src.width()).min(dst.height() / src.height());
    matrix.post_scale(scale, scale, dst.center_x(), dst.center_y());
    Ok(matrix)
}

/// `src` mapped through [`fit_center_transform`].
pub fn fit_center_rect(src: &Rect, dst: &Rect) -> Result<Rect> {
    Ok(fit_center_transform(src, dst)?.map_rect(src))
}

/// Whether `a` fully contains `b` on all four edges.
#[inline]
pub fn is_closure_of(a: &Rect, b: &Rect) -> bool {
    a.left <= b.left && a.top <= b.top && a.right >= b.right && a.bottom >= b.bottom
}


// ============================================================================
// Property-Based Tests
// ============================================================================
