//! Render and media-adjustment collaborators.
//!
//! The session never touches pixels. It talks to whatever renders the media
//! through [`ContentView`] (read and replace the current transform) and asks a
//! [`MediaAdjust`] implementation, once per layout pass, for the transform
//! that places the natural media into the content rectangle.
//!
//! Two media kinds are provided:
//!
//! - [`ImageFit`]: the renderer draws the bitmap at its natural size, so the
//!   media rectangle is fit-centered directly into the target.
//! - [`VideoFit`]: the renderer stretches each frame to fill the surface, so
//!   the stretch is undone first and the surface is then mapped onto the
//!   target.

use serde::{Deserialize, Serialize};

use crate::error::{CropError, Result};
use crate::geometry::{fit_center_transform, Matrix, Rect, Size};

/// Anything that renders the media with an affine transform.
pub trait ContentView {
    /// Host handle the media is rendered into.
    type Surface;

    fn render_surface(&self) -> &Self::Surface;

    /// Transform currently applied to the rendered content.
    fn transform(&self) -> Matrix;

    /// Replace the transform; `invalidate` requests a redraw.
    fn set_transform(&mut self, matrix: Matrix, invalidate: bool);
}

/// Per-media-kind placement of natural content into the content rectangle.
pub trait MediaAdjust {
    /// Transform aligning the natural media with `target` inside `visible`.
    fn initial_transform(&self, visible: &Rect, target: &Rect, media_size: Size)
        -> Result<Matrix>;
}

/// Still images: aspect-fit the media rectangle into the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageFit;

impl MediaAdjust for ImageFit {
    fn initial_transform(
        &self,
        _visible: &Rect,
        target: &Rect,
        media_size: Size,
    ) -> Result<Matrix> {
        fit_center_transform(&Rect::from_size(media_size), target)
    }
}

/// Video surfaces that stretch frames to fill the whole surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VideoFit;

impl VideoFit {
    /// Transform that turns a fill-stretched frame back into an aspect-fit,
    /// centered frame on a `surface_w` x `surface_h` surface.
    fn undo_stretch(surface_w: f32, surface_h: f32, media_size: Size) -> Result<Matrix> {
        if media_size.is_empty() {
            return Err(CropError::geometry("video size must be positive"));
        }
        let (video_w, video_h) = (media_size.width, media_size.height);

        let mut matrix = Matrix::scale(video_w / surface_w, video_h / surface_h, 0.0, 0.0);
        matrix.post_translate((surface_w - video_w) / 2.0, (surface_h - video_h) / 2.0);

        let natural = matrix.map_rect(&Rect::new(0.0, 0.0, surface_w, surface_h));
        let scale = (surface_w / natural.width()).min(surface_h / natural.height());
        matrix.post_scale(scale, scale, surface_w / 2.0, surface_h / 2.0);
        Ok(matrix)
    }
}

impl MediaAdjust for VideoFit {
    fn initial_transform(
        &self,
        visible: &Rect,
        target: &Rect,
        media_size: Size,
    ) -> Result<Matrix> {
        if !visible.has_area() {
            return Err(CropError::geometry("video surface has no area"));
        }
        let mut matrix = Self::undo_stretch(visible.width(), visible.height(), media_size)?;

        let frame = matrix.map_rect(visible);
        matrix.post_translate(
            target.center_x() - frame.center_x(),
            target.center_y() - frame.center_y(),
        );
        matrix.post_scale(
            target.width() / frame.width(),
            target.height() / frame.height(),
            target.center_x(),
            target.center_y(),
        );
        Ok(matrix)
    }
}

/// The media kinds the engine knows how to place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaAdjust for MediaKind {
    fn initial_transform(
        &self,
        visible: &Rect,
        target: &Rect,
        media_size: Size,
    ) -> Result<Matrix> {
        match self {
            MediaKind::Image => ImageFit.initial_transform(visible, target, media_size),
            MediaKind::Video => VideoFit.initial_transform(visible, target, media_size),
        }
    }
}

/// A content view that only stores the matrix.
///
/// Hosts that pull the transform each frame (a canvas or WebGL renderer, for
/// example) can use this directly and read [`MatrixContent::invalidations`]
/// to know whether anything changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatrixContent {
    matrix: Matrix,
    invalidations: u64,
}

impl MatrixContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set_transform` calls that requested a redraw.
    pub fn invalidations(&self) -> u64 {
        self.invalidations
    }
}

impl ContentView for MatrixContent {
    type Surface = ();

    fn render_surface(&self) -> &Self::Surface {
        &()
    }

    fn transform(&self) -> Matrix {
        self.matrix
    }

    fn set_transform(&mut self, matrix: Matrix, invalidate: bool) {
        self.matrix = matrix;
        if invalidate {
            self.invalidations += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_image_fit_places_media_on_target() {
        let visible = Rect::new(0.0, 0.0, 400.0, 800.0);
        let target = Rect::new(50.0, 300.0, 350.0, 450.0);
        let media = Size::new(2000.0, 1000.0);

        let m = ImageFit
            .initial_transform(&visible, &target, media)
            .unwrap();
        let placed = m.map_rect(&Rect::from_size(media));
        assert!(placed.approx_eq(&target, EPS), "{:?}", placed);
    }

    #[test]
    fn test_image_fit_rejects_empty_media() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(ImageFit
            .initial_transform(&r, &r, Size::new(0.0, 10.0))
            .is_err());
    }

    #[test]
    fn test_video_fit_undoes_stretch() {
        // A square video stretched over a 200x100 surface is squeezed back to
        // a centered 100x100 frame.
        let m = VideoFit::undo_stretch(200.0, 100.0, Size::new(100.0, 100.0)).unwrap();
        let frame = m.map_rect(&Rect::new(0.0, 0.0, 200.0, 100.0));
        assert!(frame.approx_eq(&Rect::new(50.0, 0.0, 150.0, 100.0), EPS));
    }

    #[test]
    fn test_video_fit_places_surface_on_target() {
        let visible = Rect::new(0.0, 0.0, 200.0, 100.0);
        let target = Rect::new(60.0, 10.0, 100.0, 50.0);
        let m = VideoFit
            .initial_transform(&visible, &target, Size::new(100.0, 100.0))
            .unwrap();

        // The surface maps onto the aspect-correct frame inside the target.
        let frame = m.map_rect(&Rect::new(50.0, 0.0, 150.0, 100.0));
        let expected_frame = Rect::new(70.0, 10.0, 90.0, 50.0);
        assert!(frame.approx_eq(&expected_frame, EPS), "{:?}", frame);
        let (cx, cy) = m.map_point(visible.center_x(), visible.center_y());
        assert!((cx - target.center_x()).abs() < EPS);
        assert!((cy - target.center_y()).abs() < EPS);
    }

    #[test]
    fn test_video_fit_rejects_empty_surface() {
        let target = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(VideoFit
            .initial_transform(&Rect::default(), &target, Size::new(10.0, 10.0))
            .is_err());
    }

    #[test]
    fn test_media_kind_dispatch() {
        let visible = Rect::new(0.0, 0.0, 100.0, 100.0);
        let target = Rect::new(0.0, 25.0, 100.0, 75.0);
        let media = Size::new(200.0, 100.0);
        assert_eq!(
            MediaKind::Image
                .initial_transform(&visible, &target, media)
                .unwrap(),
            ImageFit.initial_transform(&visible, &target, media).unwrap()
        );
        assert_eq!(
            MediaKind::Video
                .initial_transform(&visible, &target, media)
                .unwrap(),
            VideoFit.initial_transform(&visible, &target, media).unwrap()
        );
    }

    #[test]
    fn test_matrix_content_records_invalidations() {
        let mut view = MatrixContent::new();
        view.set_transform(Matrix::translate(1.0, 2.0), true);
        view.set_transform(Matrix::translate(3.0, 4.0), false);
        assert_eq!(view.transform(), Matrix::translate(3.0, 4.0));
        assert_eq!(view.invalidations(), 1);
        assert_eq!(view.render_surface(), &());
    }
}
