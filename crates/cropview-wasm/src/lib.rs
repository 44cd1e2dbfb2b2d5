//! Cropview WASM - WebAssembly bindings for Cropview
//!
//! This crate exposes the cropview-core session to JavaScript/TypeScript
//! hosts that render the media themselves (canvas, WebGL, CSS transforms).
//!
//! # Module Structure
//!
//! - `session` - The [`JsCropSession`] wrapper
//! - `types` - Conversions between JavaScript primitives and core types
//! - `logger` - Console backend for the `log` facade
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropSession, probe_media_size } from '@cropview/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const { width, height } = probe_media_size(bytes);
//! const session = new JsCropSession('image');
//! session.set_config({ mediaPath: file.name, size: { width, height }, ... });
//! session.init_rect(canvas.width, canvas.height);
//! ```

use log::LevelFilter;
use wasm_bindgen::prelude::*;

mod logger;
mod session;
mod types;

pub use logger::set_log_level;
pub use session::JsCropSession;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(LevelFilter::Warn);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Read the displayed `{ width, height }` of an encoded image without
/// decoding its pixels.
#[wasm_bindgen]
pub fn probe_media_size(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let size =
        cropview_core::probe_media_size(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&size).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
