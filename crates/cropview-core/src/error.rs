//! Error types for the crop engine.

use thiserror::Error;

/// Error types for crop geometry and session operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    /// A rectangle with zero (or negative) width or height was used where a
    /// scale factor has to be derived from it.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The session has no crop configuration attached yet.
    #[error("Crop session is not configured")]
    NotConfigured,

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The media format is not recognized.
    #[error("Invalid or unsupported media format")]
    UnsupportedMedia,

    /// The media header could not be read.
    #[error("Corrupted or incomplete media file: {0}")]
    CorruptedMedia(String),
}

impl CropError {
    pub(crate) fn geometry(msg: impl Into<String>) -> Self {
        CropError::InvalidGeometry(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CropError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CropError::geometry("source rect has zero width");
        assert_eq!(
            err.to_string(),
            "Invalid geometry: source rect has zero width"
        );
        assert_eq!(
            CropError::NotConfigured.to_string(),
            "Crop session is not configured"
        );
    }
}
