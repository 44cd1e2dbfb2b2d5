//! Homing: the animated correction that runs after a gesture ends.
//!
//! When the content no longer covers the crop window, the engine computes an
//! end rectangle that does, then interpolates from the current placement to
//! it. The host owns the clock: it delivers a fraction in `[0, 1]` (already
//! eased if it wants easing) and the engine turns it into a transform.
//!
//! # State Machine
//!
//! ```text
//!            trigger (content does not cover crop)
//!   Idle ───────────────────────────────────────────▶ Animating
//!    ▲                                                    │
//!    └────────────── tick(1.0) / cancel ──────────────────┘
//! ```
//!
//! # Frame Composition
//!
//! For a homing value `(tx, ty, s)` each frame is
//! `start_transform · scale(s about start center) · translate(tx, ty)`, where
//! `tx`/`ty` is the distance travelled from the start center so far.

use log::{debug, warn};

use crate::error::{CropError, Result};
use crate::geometry::{is_closure_of, Matrix, Rect};

/// Interpolated homing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomingValue {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
    /// Reserved; the engine always animates it from 0 to 0 and does not
    /// apply it to the frame transform.
    pub rotate: f32,
}

impl Default for HomingValue {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 0.0)
    }
}

impl HomingValue {
    pub fn new(translate_x: f32, translate_y: f32, scale: f32, rotate: f32) -> Self {
        Self {
            translate_x,
            translate_y,
            scale,
            rotate,
        }
    }

    /// Linear interpolation between two homing values.
    ///
    /// Translation comes out as the offset from `start` (so it is zero at
    /// fraction 0), scale and rotate as absolute values.
    pub fn evaluate(fraction: f32, start: &HomingValue, end: &HomingValue) -> HomingValue {
        HomingValue {
            translate_x: fraction * (end.translate_x - start.translate_x),
            translate_y: fraction * (end.translate_y - start.translate_y),
            scale: start.scale + fraction * (end.scale - start.scale),
            rotate: start.rotate + fraction * (end.rotate - start.rotate),
        }
    }

    /// Correction matrix: scale about the pivot, then translate.
    pub fn to_matrix(&self, pivot_x: f32, pivot_y: f32) -> Matrix {
        let mut matrix = Matrix::scale(self.scale, self.scale, pivot_x, pivot_y);
        matrix.post_translate(self.translate_x, self.translate_y);
        matrix
    }
}

/// Whether the content has drifted so it no longer covers the crop window.
pub fn need_homing(content_rect: &Rect, crop_rect: &Rect) -> bool {
    !is_closure_of(content_rect, crop_rect)
}

/// Compute where the content rectangle has to end up to cover `crop_rect`.
///
/// 1. If the content is smaller than the crop window on some axis it is
///    scaled up about its own center by the larger of the two ratios.
/// 2. If that already covers the crop window, it is the result.
/// 3. Otherwise each axis is shifted so the offending edge lines up with the
///    crop window: the near edge if it is inside, else the far edge.
///
/// # Errors
///
/// Returns [`CropError::InvalidGeometry`] when `content_rect` has no area.
pub fn calculate_end_rect(content_rect: &Rect, crop_rect: &Rect) -> Result<Rect> {
    if !content_rect.has_area() {
        return Err(CropError::geometry(format!(
            "content rect {:?} has no area",
            content_rect
        )));
    }

    let sx = crop_rect.width() / content_rect.width();
    let sy = crop_rect.height() / content_rect.height();
    let scaled = if sx > 1.0 || sy > 1.0 {
        let scale = sx.max(sy);
        Matrix::scale(
            scale,
            scale,
            content_rect.center_x(),
            content_rect.center_y(),
        )
        .map_rect(content_rect)
    } else {
        *content_rect
    };

    if is_closure_of(&scaled, crop_rect) {
        return Ok(scaled);
    }

    let trans_x = if scaled.left > crop_rect.left {
        crop_rect.left - scaled.left
    } else if scaled.right < crop_rect.right {
        crop_rect.right - scaled.right
    } else {
        0.0
    };
    let trans_y = if scaled.top > crop_rect.top {
        crop_rect.top - scaled.top
    } else if scaled.bottom < crop_rect.bottom {
        crop_rect.bottom - scaled.bottom
    } else {
        0.0
    };

    Ok(scaled.offset(trans_x, trans_y))
}

/// A single homing run from `start_rect` to `end_rect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomingAnimation {
    start_rect: Rect,
    end_rect: Rect,
    start: HomingValue,
    end: HomingValue,
    start_transform: Matrix,
    fraction: f32,
}

impl HomingAnimation {
    /// Prepare an animation; `start_transform` is the rendered transform at
    /// the moment homing begins.
    pub fn new(start_rect: Rect, end_rect: Rect, start_transform: Matrix) -> Result<Self> {
        if !start_rect.has_area() {
            return Err(CropError::geometry("homing start rect has no area"));
        }
        let end_scale = end_rect.width() / start_rect.width();
        Ok(Self {
            start_rect,
            end_rect,
            start: HomingValue::new(start_rect.center_x(), start_rect.center_y(), 1.0, 0.0),
            end: HomingValue::new(end_rect.center_x(), end_rect.center_y(), end_scale, 0.0),
            start_transform,
            fraction: 0.0,
        })
    }

    pub fn start_rect(&self) -> &Rect {
        &self.start_rect
    }

    pub fn end_rect(&self) -> &Rect {
        &self.end_rect
    }

    pub fn start_value(&self) -> &HomingValue {
        &self.start
    }

    pub fn end_value(&self) -> &HomingValue {
        &self.end
    }

    /// Fraction of the last delivered frame.
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Homing value at `fraction` (clamped to `[0, 1]`).
    pub fn value_at(&self, fraction: f32) -> HomingValue {
        HomingValue::evaluate(clamp_fraction(fraction), &self.start, &self.end)
    }

    /// Correction relative to the start placement, without the start transform.
    pub fn correction_at(&self, fraction: f32) -> Matrix {
        self.value_at(fraction)
            .to_matrix(self.start_rect.center_x(), self.start_rect.center_y())
    }

    /// Full transform to render at `fraction`.
    pub fn frame_at(&self, fraction: f32) -> Matrix {
        let mut matrix = self.start_transform;
        matrix.post_concat(&self.correction_at(fraction));
        matrix
    }

    /// Convert elapsed wall time into a linear fraction.
    pub fn fraction_at(elapsed_ms: f64, duration_ms: f64) -> f32 {
        if duration_ms.is_nan() || duration_ms <= 0.0 {
            return 1.0;
        }
        clamp_fraction((elapsed_ms / duration_ms) as f32)
    }
}

fn clamp_fraction(fraction: f32) -> f32 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Homing state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HomingState {
    #[default]
    Idle,
    Animating(HomingAnimation),
}

/// Transform produced for one animation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomingFrame {
    pub transform: Matrix,
    /// The animation reached its end with this frame and is now idle.
    pub finished: bool,
}

/// Drives homing animations for a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomingEngine {
    state: HomingState,
}

impl HomingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &HomingState {
        &self.state
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, HomingState::Animating(_))
    }

    pub fn animation(&self) -> Option<&HomingAnimation> {
        match &self.state {
            HomingState::Animating(animation) => Some(animation),
            HomingState::Idle => None,
        }
    }

    /// Start homing if needed.
    ///
    /// Returns `Ok(false)` when an animation is already running or the
    /// content already covers the crop window.
    pub fn trigger(
        &mut self,
        content_rect: &Rect,
        crop_rect: &Rect,
        start_transform: Matrix,
    ) -> Result<bool> {
        if self.is_animating() || !need_homing(content_rect, crop_rect) {
            return Ok(false);
        }

        let end_rect = calculate_end_rect(content_rect, crop_rect)?;
        let animation = HomingAnimation::new(*content_rect, end_rect, start_transform)?;
        debug!("homing {:?} -> {:?}", content_rect, end_rect);
        self.state = HomingState::Animating(animation);
        Ok(true)
    }

    /// Advance to `fraction`.
    ///
    /// Returns `None` while idle. When the fraction reaches 1 the final
    /// correction is applied to `content_rect` and the engine goes idle.
    pub fn tick(&mut self, fraction: f32, content_rect: &mut Rect) -> Option<HomingFrame> {
        let HomingState::Animating(animation) = &mut self.state else {
            return None;
        };

        let fraction = clamp_fraction(fraction);
        animation.fraction = fraction;
        let transform = animation.frame_at(fraction);
        let finished = fraction >= 1.0;
        if finished {
            *content_rect = animation.correction_at(1.0).map_rect(content_rect);
            debug!("homing finished at {:?}", content_rect);
            self.state = HomingState::Idle;
        }
        Some(HomingFrame {
            transform,
            finished,
        })
    }

    /// Stop a running animation.
    ///
    /// The content rectangle is moved to where the last delivered frame put
    /// the rendered content, so rectangle and transform stay in agreement.
    pub fn cancel(&mut self, content_rect: &mut Rect) -> bool {
        let HomingState::Animating(animation) = &self.state else {
            return false;
        };
        if !content_rect.has_area() {
            warn!("cancelling homing with degenerate content rect");
        }
        *content_rect = animation
            .correction_at(animation.fraction)
            .map_rect(content_rect);
        debug!("homing cancelled at fraction {}", animation.fraction);
        self.state = HomingState::Idle;
        true
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-200.0f32..200.0, -200.0f32..200.0, 5.0f32..400.0, 5.0f32..400.0)
            .prop_map(|(l, t, w, h)| Rect::new(l, t, l + w, t + h))
    }

    proptest! {
        /// Property: the end rect covers the crop window.
        #[test]
        fn prop_end_rect_covers_crop(content in rect_strategy(), crop in rect_strategy()) {
            let end = calculate_end_rect(&content, &crop).unwrap();
            let tol = 1e-4 * end.width().max(end.height()).max(100.0);
            prop_assert!(end.left <= crop.left + tol, "{:?} vs {:?}", end, crop);
            prop_assert!(end.top <= crop.top + tol, "{:?} vs {:?}", end, crop);
            prop_assert!(end.right >= crop.right - tol, "{:?} vs {:?}", end, crop);
            prop_assert!(end.bottom >= crop.bottom - tol, "{:?} vs {:?}", end, crop);
        }

        /// Property: the end rect keeps the content's aspect ratio.
        #[test]
        fn prop_end_rect_keeps_aspect(content in rect_strategy(), crop in rect_strategy()) {
            let end = calculate_end_rect(&content, &crop).unwrap();
            let before = content.width() / content.height();
            let after = end.width() / end.height();
            prop_assert!(((before - after) / before).abs() < 1e-3);
        }

        /// Property: covering content is left exactly where it is.
        #[test]
        fn prop_covering_content_unchanged(crop in rect_strategy(), margin in 0.0f32..50.0) {
            let content = Rect::new(
                crop.left - margin,
                crop.top - margin,
                crop.right + margin,
                crop.bottom + margin,
            );
            prop_assert!(!need_homing(&content, &crop));
            prop_assert_eq!(calculate_end_rect(&content, &crop).unwrap(), content);
        }
    }
}
