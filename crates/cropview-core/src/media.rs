//! Natural size probing for still images.
//!
//! Only the header is read; no pixels are decoded. EXIF orientation is
//! honoured so a portrait photo stored sideways reports its displayed size.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageReader;

use crate::error::{CropError, Result};
use crate::geometry::Size;

/// Read the displayed width and height of an encoded image.
///
/// # Errors
///
/// Returns [`CropError::UnsupportedMedia`] if the format is not recognized and
/// [`CropError::CorruptedMedia`] if the header cannot be parsed.
pub fn probe_media_size(bytes: &[u8]) -> Result<Size> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CropError::CorruptedMedia(e.to_string()))?;
    if reader.format().is_none() {
        return Err(CropError::UnsupportedMedia);
    }

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| CropError::CorruptedMedia(e.to_string()))?;

    let (width, height) = if orientation_swaps_dimensions(exif_orientation(bytes)) {
        (height, width)
    } else {
        (width, height)
    };
    Ok(Size::new(width as f32, height as f32))
}

/// EXIF orientation tag (1-8), or 1 when absent.
pub fn exif_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .filter(|value| (1..=8).contains(value))
            .unwrap_or(1),
        Err(_) => 1,
    }
}

/// Orientations 5-8 (transpose, 90° CW, transverse, 270° CW) swap axes.
#[inline]
pub fn orientation_swaps_dimensions(orientation: u32) -> bool {
    (5..=8).contains(&orientation)
}
