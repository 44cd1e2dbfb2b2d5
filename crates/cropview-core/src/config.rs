//! Crop session configuration.
//!
//! [`CropConfig`] describes the media being cropped and the initial
//! selection; [`CropStyle`] holds the overlay appearance and the interaction
//! limits. Both deserialize from partial objects: missing style fields fall
//! back to their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{CropError, Result};
use crate::geometry::{Rect, Size};

/// Default overlay shade: 50% black, `0xAARRGGBB`.
pub const DEFAULT_SHADE_COLOR: u32 = 0x8000_0000;
/// Default crop outline color: opaque yellow.
pub const DEFAULT_OUTLINE_COLOR: u32 = 0xFFFF_FF00;
/// Default outline thickness in density-independent pixels.
pub const DEFAULT_STROKE_DP: f32 = 2.0;
/// Default upper bound of `content width / media width`.
pub const DEFAULT_MAX_SCALE: f32 = 20.0;
/// Default homing animation length.
pub const DEFAULT_HOMING_DURATION_MS: f64 = 300.0;

/// Media description and initial selection for a crop session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropConfig {
    /// Media file reference; opaque to the geometry engine.
    #[serde(default)]
    pub media_path: String,
    /// Natural media size in pixels.
    pub size: Size,
    /// Target size used to derive the crop window when `clip_rect` is empty.
    #[serde(default)]
    pub fill_size: Size,
    /// Initial crop window in media pixel coordinates. Empty means "center a
    /// `fill_size` rectangle in the media".
    #[serde(default)]
    pub clip_rect: Rect,
}

impl CropConfig {
    pub fn new(media_path: impl Into<String>, size: Size, fill_size: Size, clip_rect: Rect) -> Self {
        Self {
            media_path: media_path.into(),
            size,
            fill_size,
            clip_rect,
        }
    }

    /// Check that the crop window can be derived from this config.
    pub fn validate(&self) -> Result<()> {
        if self.size.is_empty() || !self.size.is_finite() {
            return Err(CropError::InvalidConfig(format!(
                "media size must be positive, got {}x{}",
                self.size.width, self.size.height
            )));
        }
        if !self.clip_rect.is_finite() {
            return Err(CropError::InvalidConfig(format!(
                "clipRect must be finite, got {:?}",
                self.clip_rect
            )));
        }
        if !self.fill_size.is_finite() {
            return Err(CropError::InvalidConfig(format!(
                "fillSize must be finite, got {}x{}",
                self.fill_size.width, self.fill_size.height
            )));
        }
        if self.clip_rect.is_empty() && self.fill_size.is_empty() {
            return Err(CropError::InvalidConfig(
                "either fillSize or clipRect must be set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Overlay appearance and interaction limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropStyle {
    /// Crop outline thickness in pixels.
    pub stroke_width: f32,
    /// Crop outline color, `0xAARRGGBB`.
    pub outline_color: u32,
    /// Fill outside the crop window, `0xAARRGGBB`.
    pub shade_color: u32,
    /// Upper bound on `content width / media width`.
    pub max_scale: f32,
    /// Length of the homing animation when driven by elapsed time.
    pub homing_duration_ms: f64,
    /// Also report the content and visible rectangles in overlay geometry.
    pub draw_debug: bool,
}

impl Default for CropStyle {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_DP,
            outline_color: DEFAULT_OUTLINE_COLOR,
            shade_color: DEFAULT_SHADE_COLOR,
            max_scale: DEFAULT_MAX_SCALE,
            homing_duration_ms: DEFAULT_HOMING_DURATION_MS,
            draw_debug: false,
        }
    }
}

impl CropStyle {
    /// Default style with the stroke converted from dp for the given
    /// display density.
    pub fn with_density(density: f32) -> Self {
        Self {
            stroke_width: dp_to_px(DEFAULT_STROKE_DP, density),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.max_scale.is_finite() && self.max_scale > 0.0) {
            return Err(CropError::InvalidConfig(format!(
                "maxScale must be positive, got {}",
                self.max_scale
            )));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(CropError::InvalidConfig(format!(
                "strokeWidth must be non-negative, got {}",
                self.stroke_width
            )));
        }
        if !(self.homing_duration_ms.is_finite() && self.homing_duration_ms > 0.0) {
            return Err(CropError::InvalidConfig(format!(
                "homingDurationMs must be positive, got {}",
                self.homing_duration_ms
            )));
        }
        Ok(())
    }
}

/// Convert density-independent pixels to whole device pixels.
pub fn dp_to_px(dp: f32, density: f32) -> f32 {
    (dp * density + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_defaults() {
        let style = CropStyle::default();
        assert_eq!(style.max_scale, 20.0);
        assert_eq!(style.shade_color, 0x8000_0000);
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_with_density() {
        assert_eq!(CropStyle::with_density(1.0).stroke_width, 2.0);
        assert_eq!(CropStyle::with_density(2.75).stroke_width, 6.0);
        assert_eq!(CropStyle::with_density(3.0).stroke_width, 6.0);
    }

    #[test]
    fn test_style_validation() {
        let mut style = CropStyle::default();
        style.max_scale = 0.0;
        assert!(style.validate().is_err());

        let mut style = CropStyle::default();
        style.stroke_width = -1.0;
        assert!(style.validate().is_err());

        let mut style = CropStyle::default();
        style.homing_duration_ms = f64::NAN;
        assert!(style.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let ok = CropConfig::new(
            "a.jpg",
            Size::new(100.0, 50.0),
            Size::new(10.0, 10.0),
            Rect::default(),
        );
        assert!(ok.validate().is_ok());

        let no_size = CropConfig {
            size: Size::new(0.0, 50.0),
            ..ok.clone()
        };
        assert!(matches!(
            no_size.validate(),
            Err(CropError::InvalidConfig(_))
        ));

        let nothing_to_crop = CropConfig {
            fill_size: Size::default(),
            ..ok.clone()
        };
        assert!(nothing_to_crop.validate().is_err());

        let explicit_clip = CropConfig {
            fill_size: Size::default(),
            clip_rect: Rect::new(0.0, 0.0, 20.0, 20.0),
            ..ok
        };
        assert!(explicit_clip.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_non_finite_values() {
        let base = CropConfig::new(
            "a.jpg",
            Size::new(10.0, 10.0),
            Size::default(),
            Rect::new(0.0, 0.0, 5.0, 5.0),
        );
        assert!(base.validate().is_ok());

        let infinite_clip = CropConfig {
            clip_rect: Rect::new(0.0, 0.0, f32::INFINITY, 5.0),
            ..base.clone()
        };
        assert!(matches!(
            infinite_clip.validate(),
            Err(CropError::InvalidConfig(_))
        ));

        let nan_clip = CropConfig {
            clip_rect: Rect::new(f32::NAN, 0.0, 5.0, 5.0),
            ..base.clone()
        };
        assert!(nan_clip.validate().is_err());

        let infinite_size = CropConfig {
            size: Size::new(f32::INFINITY, 10.0),
            ..base.clone()
        };
        assert!(infinite_size.validate().is_err());

        let nan_fill = CropConfig {
            fill_size: Size::new(f32::NAN, 1.0),
            clip_rect: Rect::default(),
            ..base
        };
        assert!(nan_fill.validate().is_err());
    }

    #[test]
    fn test_config_without_fill_size_deserializes() {
        let config: CropConfig = serde_json::from_str(
            r#"{"size":{"width":100,"height":50},
                "clipRect":{"left":0,"top":0,"right":20,"bottom":20}}"#,
        )
        .unwrap();
        assert_eq!(config.fill_size, Size::default());
        assert_eq!(config.media_path, "");
        assert!(config.validate().is_ok());
    }
}
