use super::{Point, Rect};

/// 2D affine transform.
///
/// Maps `(x, y)` to `(sx*x + kx*y + tx, ky*x + sy*y + ty)`.
#[derive(Debug, Copy, Clone, PartialEq)]
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
        Self::identity()
    }
}

impl Matrix {
    #[inline]
    pub const fn identity() -> Self {
        Self { sx: 1.0, kx: 0.0, tx: 0.0, ky: 0.0, sy: 1.0, ty: 0.0 }
    }

    #[inline]
    pub const fn translate(dx: f32, dy: f32) -> Self {
        Self { sx: 1.0, kx: 0.0, tx: dx, ky: 0.0, sy: 1.0, ty: dy }
    }

    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self { sx, kx: 0.0, tx: 0.0, ky: 0.0, sy, ty: 0.0 }
    }

    /// Rotation by `degrees` around the pivot `(px, py)`.
    pub fn rotate(degrees: f32, px: f32, py: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            sx: cos,
            kx: -sin,
            tx: px - cos * px + sin * py,
            ky: sin,
            sy: cos,
            ty: py - sin * px - cos * py,
        }
    }

    /// Returns `self * other`: `other` is applied first, then `self`.
    pub fn concat(self, other: Matrix) -> Matrix {
        Matrix {
            sx: self.sx * other.sx + self.kx * other.ky,
            kx: self.sx * other.kx + self.kx * other.sy,
            tx: self.sx * other.tx + self.kx * other.ty + self.tx,
            ky: self.ky * other.sx + self.sy * other.ky,
            sy: self.ky * other.kx + self.sy * other.sy,
            ty: self.ky * other.tx + self.sy * other.ty + self.ty,
        }
    }

    #[inline]
    pub fn determinant(self) -> f32 {
        self.sx * self.sy - self.kx * self.ky
    }

    pub fn invert(self) -> Option<Matrix> {
        let det = self.determinant();
        if det.abs() <= f32::EPSILON * f32::EPSILON || !det.is_finite() {
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

    #[inline]
    pub fn map_point(self, p: Point) -> Point {
        Point::new(
            self.sx * p.x + self.kx * p.y + self.tx,
            self.ky * p.x + self.sy * p.y + self.ty,
        )
    }

    /// Bounding box of the four mapped corners.
    pub fn map_rect(self, r: Rect) -> Rect {
        let corners = [
            Point::new(r.left, r.top),
            Point::new(r.right, r.top),
            Point::new(r.right, r.bottom),
            Point::new(r.left, r.bottom),
        ];
        Rect::from_points(corners.into_iter().map(|p| self.map_point(p))).unwrap_or_default()
    }

    /// Geometric mean of the axis scales. Used to convert device tolerances to local space.
    #[inline]
    pub fn approx_scale(self) -> f32 {
        self.determinant().abs().sqrt()
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self == Matrix::identity()
    }

    #[inline]
    pub fn is_translate_only(self) -> bool {
        self.sx == 1.0 && self.sy == 1.0 && self.kx == 0.0 && self.ky == 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        [self.sx, self.kx, self.tx, self.ky, self.sy, self.ty].iter().all(|v| v.is_finite())
    }
}
