//! 2D affine transform with post-concatenation semantics.
//!
//! A point `(x, y)` is mapped to:
//! ```text
//! x' = sx * x + kx * y + tx
//! y' = ky * x + sy * y + ty
//! ```
//!
//! `post_*` operations apply the new operation *after* the existing ones, so
//! `m.post_translate(..)` moves whatever `m` already produced.

use serde::{Deserialize, Serialize};

use super::Rect;

/// Affine transform stored as the top two rows of a 3x3 matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub sx: f32,
    pub kx: f32,
    pub tx: f32,
    pub ky: f32,
    pub sy: f32,
    pub ty: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        sx: 1.0,
        kx: 0.0,
        tx: 0.0,
        ky: 0.0,
        sy: 1.0,
        ty: 0.0,
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translate(dx: f32, dy: f32) -> Self {
        Self {
            tx: dx,
            ty: dy,
            ..Self::IDENTITY
        }
    }

    /// Scale about the pivot `(px, py)`; the pivot maps to itself.
    pub fn scale(sx: f32, sy: f32, px: f32, py: f32) -> Self {
        Self {
            sx,
            tx: px - sx * px,
            sy,
            ty: py - sy * py,
            ..Self::IDENTITY
        }
    }

    /// Build from the row-major 3x3 value layout `[sx, kx, tx, ky, sy, ty, 0, 0, 1]`.
    pub fn from_values(values: [f32; 9]) -> Self {
        Self {
            sx: values[0],
            kx: values[1],
            tx: values[2],
            ky: values[3],
            sy: values[4],
            ty: values[5],
        }
    }

    /// Row-major 3x3 values, the layout hosts typically upload to a renderer.
    pub fn values(&self) -> [f32; 9] {
        [
            self.sx, self.kx, self.tx, self.ky, self.sy, self.ty, 0.0, 0.0, 1.0,
        ]
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// `a * b`: the transform that applies `b` first, then `a`.
    pub fn concat(a: &Matrix, b: &Matrix) -> Matrix {
        Matrix {
            sx: a.sx * b.sx + a.kx * b.ky,
            kx: a.sx * b.kx + a.kx * b.sy,
            tx: a.sx * b.tx + a.kx * b.ty + a.tx,
            ky: a.ky * b.sx + a.sy * b.ky,
            sy: a.ky * b.kx + a.sy * b.sy,
            ty: a.ky * b.tx + a.sy * b.ty + a.ty,
        }
    }

    /// Apply `other` after the current transform.
    pub fn post_concat(&mut self, other: &Matrix) -> &mut Self {
        *self = Matrix::concat(other, self);
        self
    }

    /// Apply `other` before the current transform.
    pub fn pre_concat(&mut self, other: &Matrix) -> &mut Self {
        *self = Matrix::concat(self, other);
        self
    }

    pub fn post_translate(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.tx += dx;
        self.ty += dy;
        self
    }

    pub fn post_scale(&mut self, sx: f32, sy: f32, px: f32, py: f32) -> &mut Self {
        self.post_concat(&Matrix::scale(sx, sy, px, py))
    }

    pub fn map_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.sx * x + self.kx * y + self.tx,
            self.ky * x + self.sy * y + self.ty,
        )
    }

    /// Map the four corners of `rect` and return their bounding box.
    pub fn map_rect(&self, rect: &Rect) -> Rect {
        let corners = [
            self.map_point(rect.left, rect.top),
            self.map_point(rect.right, rect.top),
            self.map_point(rect.right, rect.bottom),
            self.map_point(rect.left, rect.bottom),
        ];

        let mut out = Rect::new(corners[0].0, corners[0].1, corners[0].0, corners[0].1);
        for &(x, y) in &corners[1..] {
            out.left = out.left.min(x);
            out.top = out.top.min(y);
            out.right = out.right.max(x);
            out.bottom = out.bottom.max(y);
        }
        out
    }

    pub fn determinant(&self) -> f32 {
        self.sx * self.sy - self.kx * self.ky
    }

    /// Inverse transform, or `None` when the matrix is singular.
    pub fn invert(&self) -> Option<Matrix> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Matrix {
            sx: self.sy * inv,
            kx: -self.kx * inv,
            tx: (self.kx * self.ty - self.sy * self.tx) * inv,
            ky: -self.ky * inv,
            sy: self.sx * inv,
            ty: (self.ky * self.tx - self.sx * self.ty) * inv,
        })
    }

    pub fn approx_eq(&self, other: &Matrix, epsilon: f32) -> bool {
        self.values()
            .iter()
            .zip(other.values().iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_identity_maps_unchanged() {
        let m = Matrix::identity();
        assert_eq!(m.map_point(3.0, -4.0), (3.0, -4.0));
        assert!(m.is_identity());
    }

    #[test]
    fn test_scale_keeps_pivot_fixed() {
        let m = Matrix::scale(2.0, 3.0, 10.0, 20.0);
        let (x, y) = m.map_point(10.0, 20.0);
        assert!((x - 10.0).abs() < EPS);
        assert!((y - 20.0).abs() < EPS);
        let (x, y) = m.map_point(11.0, 21.0);
        assert!((x - 12.0).abs() < EPS);
        assert!((y - 23.0).abs() < EPS);
    }

    #[test]
    fn test_post_operations_apply_in_order() {
        // Scale about the origin, then move: (1, 1) -> (2, 2) -> (12, 2).
        let mut m = Matrix::identity();
        m.post_scale(2.0, 2.0, 0.0, 0.0).post_translate(10.0, 0.0);
        assert_eq!(m.map_point(1.0, 1.0), (12.0, 2.0));

        // Move, then scale about the origin: (1, 1) -> (11, 1) -> (22, 2).
        let mut m = Matrix::identity();
        m.post_translate(10.0, 0.0).post_scale(2.0, 2.0, 0.0, 0.0);
        assert_eq!(m.map_point(1.0, 1.0), (22.0, 2.0));
    }

    #[test]
    fn test_pre_concat_applies_first() {
        let mut m = Matrix::translate(10.0, 0.0);
        m.pre_concat(&Matrix::scale(2.0, 2.0, 0.0, 0.0));
        assert_eq!(m.map_point(1.0, 1.0), (12.0, 2.0));
    }

    #[test]
    fn test_map_rect_bounding_box() {
        let m = Matrix::scale(-1.0, 1.0, 0.0, 0.0);
        let r = m.map_rect(&Rect::new(10.0, 0.0, 20.0, 5.0));
        assert_eq!(r, Rect::new(-20.0, 0.0, -10.0, 5.0));
    }

    #[test]
    fn test_invert_round_trip() {
        let mut m = Matrix::translate(5.0, -3.0);
        m.post_scale(2.5, 0.5, 7.0, 9.0);
        let inv = m.invert().unwrap();
        let back = Matrix::concat(&inv, &m);
        assert!(back.approx_eq(&Matrix::identity(), EPS));
    }

    #[test]
    fn test_invert_singular() {
        assert!(Matrix::scale(0.0, 1.0, 0.0, 0.0).invert().is_none());
    }

    #[test]
    fn test_values_layout() {
        let m = Matrix::from_values([2.0, 0.0, 5.0, 0.0, 3.0, 6.0, 0.0, 0.0, 1.0]);
        assert_eq!(m.sx, 2.0);
        assert_eq!(m.tx, 5.0);
        assert_eq!(m.sy, 3.0);
        assert_eq!(m.ty, 6.0);
        assert_eq!(m.values()[8], 1.0);
    }
}
