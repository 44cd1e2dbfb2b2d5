//! Conversions between JavaScript-friendly primitives and core types.

use cropview_core::{Matrix, MediaKind, TouchPhase};

/// Map a touch phase code from JavaScript.
///
/// 0 = down, 1 = move, 2 = up, anything else = cancel.
pub(crate) fn phase_from_u8(value: u8) -> TouchPhase {
    match value {
        0 => TouchPhase::Down,
        1 => TouchPhase::Move,
        2 => TouchPhase::Up,
        _ => TouchPhase::Cancel,
    }
}

/// Parse a media kind name ("image" or "video", case-insensitive).
pub(crate) fn media_kind_from_str(value: &str) -> Option<MediaKind> {
    match value.trim().to_ascii_lowercase().as_str() {
        "image" => Some(MediaKind::Image),
        "video" => Some(MediaKind::Video),
        _ => None,
    }
}

/// Column-major 3x3 layout, as `DOMMatrix`/WebGL `uniformMatrix3fv` expect.
pub(crate) fn matrix_to_column_major(matrix: &Matrix) -> [f32; 9] {
    let v = matrix.values();
    [v[0], v[3], v[6], v[1], v[4], v[7], v[2], v[5], v[8]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_from_u8() {
        assert_eq!(phase_from_u8(0), TouchPhase::Down);
        assert_eq!(phase_from_u8(1), TouchPhase::Move);
        assert_eq!(phase_from_u8(2), TouchPhase::Up);
        assert_eq!(phase_from_u8(3), TouchPhase::Cancel);
        assert_eq!(phase_from_u8(255), TouchPhase::Cancel);
    }

    #[test]
    fn test_media_kind_from_str() {
        assert_eq!(media_kind_from_str("image"), Some(MediaKind::Image));
        assert_eq!(media_kind_from_str(" Video "), Some(MediaKind::Video));
        assert_eq!(media_kind_from_str("audio"), None);
    }

    #[test]
    fn test_matrix_column_major() {
        let m = Matrix::translate(5.0, 7.0);
        let cols = matrix_to_column_major(&m);
        assert_eq!(cols, [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 5.0, 7.0, 1.0]);
    }
}
