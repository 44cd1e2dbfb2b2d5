//! WASM bindings for the crop session.
//!
//! The browser host owns the canvas: it feeds pointer events in, drives the
//! homing animation from `requestAnimationFrame`, and pulls the content
//! transform and overlay geometry back out to draw.

use cropview_core::{ContentView, CropConfig, CropSession, CropStyle, MatrixContent, ScaleStep};
use wasm_bindgen::prelude::*;

use crate::types::{matrix_to_column_major, media_kind_from_str, phase_from_u8};

/// A crop session driven from JavaScript.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const session = new JsCropSession('image');
/// session.set_style({ strokeWidth: 4, maxScale: 10 });
/// session.set_config({
///   mediaPath: 'photo.jpg',
///   size: { width: 4000, height: 3000 },
///   fillSize: { width: 1, height: 1 },
///   clipRect: { left: 0, top: 0, right: 0, bottom: 0 },
/// });
/// session.init_rect(canvas.width, canvas.height);
///
/// canvas.onpointerup = () => {
///   if (session.handle_touch(2, 0)) requestAnimationFrame(step);
/// };
/// function step(now: number) {
///   if (session.advance_homing(now - start)) draw(session.transform());
///   if (session.is_homing) requestAnimationFrame(step);
/// }
/// ```
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession<MatrixContent>,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session for `"image"` or `"video"` media.
    #[wasm_bindgen(constructor)]
    pub fn new(media_kind: &str) -> Result<JsCropSession, JsValue> {
        let kind = media_kind_from_str(media_kind)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown media kind: {}", media_kind)))?;
        Ok(JsCropSession {
            inner: CropSession::new(MatrixContent::new(), kind),
        })
    }

    /// Replace the overlay style. Missing fields take their defaults.
    pub fn set_style(&mut self, style: JsValue) -> Result<(), JsValue> {
        let style: CropStyle = serde_wasm_bindgen::from_value(style)
            .map_err(|e| JsValue::from_str(&format!("Invalid crop style: {}", e)))?;
        self.inner
            .set_style(style)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Set the media and crop request.
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: CropConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid crop config: {}", e)))?;
        self.inner
            .set_config(config)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Lay out the crop and content rects for a viewport of the given size.
    pub fn init_rect(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.inner
            .init_rect(width, height)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Report a pointer event. `phase`: 0 = down, 1 = move, 2 = up, 3 = cancel.
    ///
    /// Returns true if the event was consumed.
    pub fn handle_touch(&mut self, phase: u8, pointers: u32) -> bool {
        self.inner
            .handle_touch(phase_from_u8(phase), pointers as usize)
    }

    /// Scroll by `(dx, dy)`; the content moves by `(-dx, -dy)`.
    pub fn pan(&mut self, dx: f32, dy: f32) -> bool {
        self.inner.pan(dx, dy)
    }

    /// Apply one pinch step about the focus point.
    pub fn scale(&mut self, factor: f32, focus_x: f32, focus_y: f32) -> bool {
        self.inner.scale(ScaleStep::new(factor, focus_x, focus_y))
    }

    /// Render the homing frame at `fraction` in [0, 1].
    pub fn tick(&mut self, fraction: f32) -> bool {
        self.inner.on_animation_tick(fraction)
    }

    /// Render the homing frame for `elapsed_ms` since the gesture ended.
    pub fn advance_homing(&mut self, elapsed_ms: f64) -> bool {
        self.inner.advance_homing(elapsed_ms)
    }

    pub fn cancel_homing(&mut self) -> bool {
        self.inner.cancel_homing()
    }

    #[wasm_bindgen(getter)]
    pub fn is_homing(&self) -> bool {
        self.inner.is_homing()
    }

    /// Current content transform as a column-major 3x3 `Float32Array`.
    pub fn transform(&self) -> js_sys::Float32Array {
        let values = matrix_to_column_major(&self.inner.content_view().transform());
        js_sys::Float32Array::from(&values[..])
    }

    /// `{ left, top, right, bottom }` of the content in view coordinates.
    pub fn content_rect(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.content_rect())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// `{ left, top, right, bottom }` of the crop window in view coordinates.
    pub fn crop_rect(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.crop_rect())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Integer crop region in media pixels.
    pub fn clip_rect(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.clip_rect())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Outline, stroke and shade bands to draw over the content.
    pub fn overlay(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.overlay())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// True once after each change that requires the overlay to be redrawn.
    pub fn take_overlay_dirty(&mut self) -> bool {
        self.inner.take_overlay_dirty()
    }

    /// Number of transform updates so far; changes whenever a redraw is due.
    #[wasm_bindgen(getter)]
    pub fn revision(&self) -> f64 {
        self.inner.content_view().invalidations() as f64
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_unknown_media_kind() {
        assert!(JsCropSession::new("audio").is_err());
    }

    #[wasm_bindgen_test]
    fn test_init_before_config_fails() {
        let mut session = JsCropSession::new("image").unwrap();
        assert!(session.init_rect(500.0, 1000.0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_config_from_js_object() {
        let config = js_sys::JSON::parse(
            r#"{"mediaPath":"a.jpg","size":{"width":1000,"height":800},
                "fillSize":{"width":400,"height":400},
                "clipRect":{"left":0,"top":0,"right":0,"bottom":0}}"#,
        )
        .unwrap();
        let mut session = JsCropSession::new("image").unwrap();
        session.set_config(config).unwrap();
        session.init_rect(500.0, 1000.0).unwrap();

        assert_eq!(session.transform().length(), 9);
        let clip: cropview_core::PixelRect =
            serde_wasm_bindgen::from_value(session.clip_rect().unwrap()).unwrap();
        assert!((clip.width() - 800).abs() <= 1, "{:?}", clip);
    }

    #[wasm_bindgen_test]
    fn test_config_with_clip_rect_only() {
        let config = js_sys::JSON::parse(
            r#"{"size":{"width":1000,"height":800},
                "clipRect":{"left":100,"top":100,"right":500,"bottom":300}}"#,
        )
        .unwrap();
        let mut session = JsCropSession::new("image").unwrap();
        session.set_config(config).unwrap();
        session.init_rect(500.0, 1000.0).unwrap();

        let clip: cropview_core::PixelRect =
            serde_wasm_bindgen::from_value(session.clip_rect().unwrap()).unwrap();
        assert!((clip.width() - 400).abs() <= 1, "{:?}", clip);
        assert!((clip.height() - 200).abs() <= 1, "{:?}", clip);
    }

    #[wasm_bindgen_test]
    fn test_style_rejects_bad_values() {
        let style = js_sys::JSON::parse(r#"{"maxScale":-1}"#).unwrap();
        let mut session = JsCropSession::new("image").unwrap();
        assert!(session.set_style(style).is_err());
    }
}
