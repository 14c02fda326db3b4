//! Affine transform used by the recording surface.
//!
//! The matrix layout is `[sx, shy, shx, sy, tx, ty]`:
//!
//! ```text
//!   | sx  shx tx |
//!   | shy  sy ty |
//!   |  0    0  1 |
//! ```
//!
//! `translate`, `rotate` and `scale` compose on the local side, the same way a
//! 2-D canvas context does: the newest operation applies to points first.

use crate::geom::PixelPoint;

/// 2-D affine transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    /// Horizontal scale; x contribution to the new x.
    pub sx: f64,
    /// Vertical shear; x contribution to the new y.
    pub shy: f64,
    /// Horizontal shear; y contribution to the new x.
    pub shx: f64,
    /// Vertical scale; y contribution to the new y.
    pub sy: f64,
    /// Horizontal translation in device pixels.
    pub tx: f64,
    /// Vertical translation in device pixels.
    pub ty: f64,
}

impl Affine {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        sx: 1.0,
        shy: 0.0,
        shx: 0.0,
        sy: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Translate the local coordinate system.
    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.tx += self.sx * x + self.shx * y;
        self.ty += self.shy * x + self.sy * y;
        self
    }

    /// Rotate the local coordinate system by `a` radians (clockwise on screen).
    pub fn rotate(&mut self, a: f64) -> &mut Self {
        let (sa, ca) = a.sin_cos();
        let sx = self.sx * ca + self.shx * sa;
        let shx = self.shx * ca - self.sx * sa;
        let shy = self.shy * ca + self.sy * sa;
        let sy = self.sy * ca - self.shy * sa;
        self.sx = sx;
        self.shx = shx;
        self.shy = shy;
        self.sy = sy;
        self
    }

    /// Scale the local coordinate system.
    pub fn scale(&mut self, x: f64, y: f64) -> &mut Self {
        self.sx *= x;
        self.shy *= x;
        self.shx *= y;
        self.sy *= y;
        self
    }

    /// Forward transform of a point.
    #[inline]
    pub fn apply(&self, point: PixelPoint) -> PixelPoint {
        let x = point.x as f64;
        let y = point.y as f64;
        PixelPoint::new(
            (x * self.sx + y * self.shx + self.tx) as f32,
            (x * self.shy + y * self.sy + self.ty) as f32,
        )
    }

    /// Rotation angle of the local x axis.
    pub fn rotation(&self) -> f64 {
        self.shy.atan2(self.sx)
    }

    /// Length of the transformed unit x vector.
    pub fn scale_factor(&self) -> f64 {
        (self.sx * self.sx + self.shy * self.shy).sqrt()
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}
