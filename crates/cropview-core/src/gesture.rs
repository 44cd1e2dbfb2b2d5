//! Pan and pinch-scale interpretation.
//!
//! Gesture recognition itself belongs to the host. This module receives the
//! decoded deltas and applies them to the content rectangle and to the
//! transform held by the [`ContentView`]. Both are moved by the same matrix so
//! they never drift apart.

use log::debug;

use crate::config::DEFAULT_MAX_SCALE;
use crate::content::ContentView;
use crate::geometry::{Matrix, Rect};

/// One step of a pinch gesture, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleStep {
    /// Scale relative to the previous step (`> 1` zooms in).
    pub factor: f32,
    pub focus_x: f32,
    pub focus_y: f32,
}

impl ScaleStep {
    pub fn new(factor: f32, focus_x: f32, focus_y: f32) -> Self {
        Self {
            factor,
            focus_x,
            focus_y,
        }
    }

    /// Positive finite factor and a finite focus point.
    pub fn is_valid(&self) -> bool {
        self.factor.is_finite()
            && self.factor > 0.0
            && self.focus_x.is_finite()
            && self.focus_y.is_finite()
    }
}

/// Applies pan and scale deltas, enforcing the maximum zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureInterpreter {
    max_scale: f32,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SCALE)
    }
}

impl GestureInterpreter {
    pub fn new(max_scale: f32) -> Self {
        Self { max_scale }
    }

    pub fn max_scale(&self) -> f32 {
        self.max_scale
    }

    /// Move the content by a scroll distance.
    ///
    /// `dx`/`dy` follow scroll semantics: a positive distance moves the
    /// content towards negative coordinates. There is no bounds clamp here;
    /// homing restores coverage once the gesture ends.
    pub fn pan<V: ContentView + ?Sized>(
        &self,
        content_rect: &mut Rect,
        view: &mut V,
        dx: f32,
        dy: f32,
    ) -> bool {
        if !(dx.is_finite() && dy.is_finite()) {
            debug!("ignoring pan ({}, {})", dx, dy);
            return false;
        }
        let step = Matrix::translate(-dx, -dy);

        let mut transform = view.transform();
        transform.post_translate(-dx, -dy);
        *content_rect = step.map_rect(content_rect);
        view.set_transform(transform, true);
        true
    }

    /// Zoom the content about the focus point.
    ///
    /// Ignored unless at least two pointers are down. A step that would push
    /// `content width / media width` above the maximum scale is rejected and
    /// leaves everything untouched. There is intentionally no lower bound.
    pub fn scale<V: ContentView + ?Sized>(
        &self,
        content_rect: &mut Rect,
        view: &mut V,
        media_width: f32,
        pointer_count: usize,
        step: ScaleStep,
    ) -> bool {
        if pointer_count < 2 {
            return false;
        }
        if !step.is_valid() || media_width <= 0.0 {
            debug!("ignoring scale step {:?} (media width {})", step, media_width);
            return false;
        }

        let scale = Matrix::scale(step.factor, step.factor, step.focus_x, step.focus_y);
        let candidate = scale.map_rect(content_rect);
        let ratio = candidate.width() / media_width;
        if ratio > self.max_scale {
            debug!(
                "rejecting scale step: ratio {:.3} exceeds max {}",
                ratio, self.max_scale
            );
            return false;
        }

        let mut transform = view.transform();
        transform.post_scale(step.factor, step.factor, step.focus_x, step.focus_y);
        *content_rect = candidate;
        view.set_transform(transform, true);
        true
    }
}
