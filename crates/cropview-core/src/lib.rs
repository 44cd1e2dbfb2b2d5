//! Cropview Core - geometry engine for interactive media cropping
//!
//! This crate keeps a content rectangle (the media, moved by pan and pinch
//! gestures) against a fixed crop window, and animates the content back into
//! place when a gesture leaves part of the window uncovered.
//!
//! # Module Structure
//!
//! - `geometry` - Rectangles, affine matrices, fit-center and closure tests
//! - `gesture` - Pan and pinch-scale interpretation with the max-scale clamp
//! - `homing` - End-rect computation and the homing animation state machine
//! - `session` - The orchestrating [`CropSession`]
//! - `content` - Render and media-adjustment collaborator traits
//! - `config` - Crop config and overlay style
//! - `overlay` - Crop outline and shade geometry
//! - `media` - Natural size probing for encoded images

pub mod config;
pub mod content;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod homing;
pub mod media;
pub mod overlay;
pub mod session;

pub use config::{CropConfig, CropStyle};
pub use content::{ContentView, ImageFit, MatrixContent, MediaAdjust, MediaKind, VideoFit};
pub use error::{CropError, Result};
pub use geometry::{
    fit_center_rect, fit_center_transform, is_closure_of, Matrix, PixelRect, Rect, Size,
};
pub use gesture::{GestureInterpreter, ScaleStep};
pub use homing::{calculate_end_rect, need_homing, HomingEngine, HomingValue};
pub use media::probe_media_size;
pub use overlay::OverlayGeometry;
pub use session::{CropSession, TouchPhase};
