//! Crop session: owns the rectangles and routes host input.
//!
//! A [`CropSession`] is the single owner of the three rectangles the engine
//! works with:
//!
//! - `visible_rect`: the interactive viewport, set on every layout pass
//! - `content_rect`: where the transformed media currently sits
//! - `crop_rect`: the crop window, fixed after initialization
//!
//! The host feeds it decoded input (touch phases, scroll distances, pinch
//! steps) and animation ticks. Everything is synchronous; each call mutates
//! the state and the render transform before returning.
//!
//! # Example
//!
//! ```ignore
//! let mut session = CropSession::new(MatrixContent::new(), MediaKind::Image);
//! session.set_config(config)?;
//! session.init_rect(1080.0, 1920.0)?;
//!
//! session.handle_touch(TouchPhase::Down, 1);
//! session.pan(12.0, -3.0);
//! session.handle_touch(TouchPhase::Up, 0);
//! while session.is_homing() {
//!     session.advance_homing(elapsed_ms);
//! }
//! let selection = session.clip_rect();
//! ```

use log::{debug, warn};

use crate::config::{CropConfig, CropStyle};
use crate::content::{ContentView, MediaAdjust, MediaKind};
use crate::error::{CropError, Result};
use crate::geometry::{fit_center_rect, fit_center_transform, PixelRect, Rect};
use crate::gesture::{GestureInterpreter, ScaleStep};
use crate::homing::{HomingAnimation, HomingEngine};
use crate::overlay::OverlayGeometry;

/// Touch phase as reported by the host's input system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Interactive crop session over one piece of media.
#[derive(Debug)]
pub struct CropSession<V, A = MediaKind> {
    view: V,
    adjust: A,
    style: CropStyle,
    config: Option<CropConfig>,
    gestures: GestureInterpreter,
    homing: HomingEngine,
    visible_rect: Rect,
    content_rect: Rect,
    crop_rect: Rect,
    pointer_count: usize,
    overlay_dirty: bool,
}

impl<V: ContentView, A: MediaAdjust> CropSession<V, A> {
    /// Session with the default style and no config attached.
    pub fn new(view: V, adjust: A) -> Self {
        let style = CropStyle::default();
        Self {
            view,
            adjust,
            gestures: GestureInterpreter::new(style.max_scale),
            style,
            config: None,
            homing: HomingEngine::new(),
            visible_rect: Rect::default(),
            content_rect: Rect::default(),
            crop_rect: Rect::default(),
            pointer_count: 0,
            overlay_dirty: false,
        }
    }

    pub fn with_style(view: V, adjust: A, style: CropStyle) -> Result<Self> {
        let mut session = Self::new(view, adjust);
        session.set_style(style)?;
        Ok(session)
    }

    pub fn style(&self) -> &CropStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: CropStyle) -> Result<()> {
        style.validate()?;
        self.gestures = GestureInterpreter::new(style.max_scale);
        self.style = style;
        self.overlay_dirty = true;
        Ok(())
    }

    pub fn config(&self) -> Option<&CropConfig> {
        self.config.as_ref()
    }

    /// Whether a config is attached; without one all input is ignored.
    pub fn is_active(&self) -> bool {
        self.config.is_some()
    }

    /// Attach (or replace) the crop config.
    ///
    /// If the viewport size is already known the rectangles are recomputed
    /// immediately. On error the previous config and rectangles are kept.
    pub fn set_config(&mut self, config: CropConfig) -> Result<()> {
        config.validate()?;
        let previous = self.config.replace(config);
        if self.visible_rect.has_area() {
            let (width, height) = (self.visible_rect.width(), self.visible_rect.height());
            if let Err(e) = self.init_rect(width, height) {
                self.config = previous;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Lay out the rectangles for a viewport of the given size.
    ///
    /// The crop window is fit-centered into the viewport and the content
    /// rectangle is carried along with it; the media adjustment then places
    /// the natural media onto the content rectangle.
    pub fn init_rect(&mut self, viewport_w: f32, viewport_h: f32) -> Result<()> {
        let config = self.config.as_ref().ok_or(CropError::NotConfigured)?;
        let visible = Rect::new(0.0, 0.0, viewport_w, viewport_h);
        if !visible.has_area() {
            return Err(CropError::geometry(format!(
                "viewport {}x{} has no area",
                viewport_w, viewport_h
            )));
        }

        let media_size = config.size;
        let content = Rect::from_size(media_size);
        let crop = if config.clip_rect.is_empty() {
            fit_center_rect(&Rect::from_size(config.fill_size), &content)?
        } else {
            config.clip_rect
        };

        let frame = fit_center_transform(&crop, &visible)?;
        let crop = frame.map_rect(&crop);
        let content = frame.map_rect(&content);

        let matrix = self.adjust.initial_transform(&visible, &content, media_size)?;

        if self.homing.is_animating() {
            debug!("layout changed during homing, dropping animation");
            self.homing = HomingEngine::new();
        }
        self.visible_rect = visible;
        self.content_rect = content;
        self.crop_rect = crop;
        self.view.set_transform(matrix, true);
        self.overlay_dirty = true;
        debug!(
            "init_rect {}x{}: crop {:?}, content {:?}",
            viewport_w, viewport_h, crop, content
        );
        Ok(())
    }

    /// Feed a touch phase change.
    ///
    /// Returns `false` (not handled) while unconfigured or while homing is
    /// running. On `Up`/`Cancel` homing is triggered when the content no
    /// longer covers the crop window.
    pub fn handle_touch(&mut self, phase: TouchPhase, pointer_count: usize) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.pointer_count = pointer_count;

        if matches!(phase, TouchPhase::Up | TouchPhase::Cancel) {
            if let Err(e) = self.trigger_homing() {
                warn!("homing skipped: {}", e);
            }
        }
        true
    }

    /// Scroll the content by `(dx, dy)` (scroll distance, not position).
    pub fn pan(&mut self, dx: f32, dy: f32) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.gestures
            .pan(&mut self.content_rect, &mut self.view, dx, dy)
    }

    /// Apply one pinch step.
    pub fn scale(&mut self, step: ScaleStep) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(config) = self.config.as_ref() else {
            return false;
        };
        if self.pointer_count > 1 {
            self.overlay_dirty = true;
        }
        self.gestures.scale(
            &mut self.content_rect,
            &mut self.view,
            config.size.width,
            self.pointer_count,
            step,
        )
    }

    /// Start homing if the content does not cover the crop window.
    ///
    /// A no-op (returning `Ok(false)`) when unconfigured, already animating or
    /// already covering.
    pub fn trigger_homing(&mut self) -> Result<bool> {
        if !self.is_active() {
            return Ok(false);
        }
        self.homing
            .trigger(&self.content_rect, &self.crop_rect, self.view.transform())
    }

    pub fn is_homing(&self) -> bool {
        self.homing.is_animating()
    }

    pub fn homing(&self) -> &HomingEngine {
        &self.homing
    }

    /// Deliver an animation tick with the host's (possibly eased) fraction.
    ///
    /// Returns `false` when no animation is running.
    pub fn on_animation_tick(&mut self, fraction: f32) -> bool {
        match self.homing.tick(fraction, &mut self.content_rect) {
            Some(frame) => {
                self.view.set_transform(frame.transform, true);
                if frame.finished {
                    self.overlay_dirty = true;
                }
                true
            }
            None => false,
        }
    }

    /// Deliver an animation tick as time elapsed since homing started; the
    /// fraction is linear over the style's homing duration.
    pub fn advance_homing(&mut self, elapsed_ms: f64) -> bool {
        let fraction = HomingAnimation::fraction_at(elapsed_ms, self.style.homing_duration_ms);
        self.on_animation_tick(fraction)
    }

    /// Stop a running homing animation where it is.
    pub fn cancel_homing(&mut self) -> bool {
        self.homing.cancel(&mut self.content_rect)
    }

    pub fn visible_rect(&self) -> &Rect {
        &self.visible_rect
    }

    pub fn content_rect(&self) -> &Rect {
        &self.content_rect
    }

    pub fn crop_rect(&self) -> &Rect {
        &self.crop_rect
    }

    pub fn pointer_count(&self) -> usize {
        self.pointer_count
    }

    /// The crop selection in media pixel coordinates.
    pub fn clip_rect(&self) -> PixelRect {
        let scale = self.content_scale();
        let left = self.crop_rect.left - self.content_rect.left;
        let top = self.crop_rect.top - self.content_rect.top;
        let right = left + self.crop_rect.width();
        let bottom = top + self.crop_rect.height();
        PixelRect::new(
            (left / scale) as i32,
            (top / scale) as i32,
            (right / scale) as i32,
            (bottom / scale) as i32,
        )
    }

    /// Ratio of the content rectangle width to the media width.
    pub fn content_scale(&self) -> f32 {
        match &self.config {
            Some(config) if config.size.width > 0.0 => {
                self.content_rect.width() / config.size.width
            }
            _ => 1.0,
        }
    }

    pub fn overlay(&self) -> OverlayGeometry {
        OverlayGeometry::new(
            &self.visible_rect,
            &self.crop_rect,
            &self.content_rect,
            &self.style,
        )
    }

    /// Whether the overlay needs redrawing since the last call.
    pub fn take_overlay_dirty(&mut self) -> bool {
        std::mem::take(&mut self.overlay_dirty)
    }

    pub fn content_view(&self) -> &V {
        &self.view
    }

    pub fn render_surface(&self) -> &V::Surface {
        self.view.render_surface()
    }

    fn accepts_input(&self) -> bool {
        self.is_active() && !self.homing.is_animating()
    }
}
