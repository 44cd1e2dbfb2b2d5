//! Crop overlay geometry.
//!
//! The overlay is the crop outline plus a shade over everything in the
//! viewport outside the crop window. Drawing it is up to the host; this
//! module only says where.

use serde::{Deserialize, Serialize};

use crate::config::CropStyle;
use crate::geometry::Rect;

/// Extra rectangles reported when `draw_debug` is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugRects {
    pub content: Rect,
    pub visible: Rect,
}

/// Everything needed to draw the crop overlay for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayGeometry {
    pub crop_outline: Rect,
    pub stroke_width: f32,
    pub outline_color: u32,
    pub shade_color: u32,
    /// Top, bottom, left and right parts of the viewport outside the crop
    /// window. Bands may be empty.
    pub shade_bands: [Rect; 4],
    pub debug: Option<DebugRects>,
}

impl OverlayGeometry {
    pub fn new(visible: &Rect, crop: &Rect, content: &Rect, style: &CropStyle) -> Self {
        Self {
            crop_outline: *crop,
            stroke_width: style.stroke_width,
            outline_color: style.outline_color,
            shade_color: style.shade_color,
            shade_bands: shade_bands(visible, crop),
            debug: style.draw_debug.then_some(DebugRects {
                content: *content,
                visible: *visible,
            }),
        }
    }
}

/// Split the part of `visible` outside `crop` into four non-overlapping bands.
pub fn shade_bands(visible: &Rect, crop: &Rect) -> [Rect; 4] {
    let left = crop.left.clamp(visible.left, visible.right);
    let right = crop.right.clamp(visible.left, visible.right).max(left);
    let top = crop.top.clamp(visible.top, visible.bottom);
    let bottom = crop.bottom.clamp(visible.top, visible.bottom).max(top);

    [
        Rect::new(visible.left, visible.top, visible.right, top),
        Rect::new(visible.left, bottom, visible.right, visible.bottom),
        Rect::new(visible.left, top, left, bottom),
        Rect::new(right, top, visible.right, bottom),
    ]
}
