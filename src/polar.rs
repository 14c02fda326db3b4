//! Polar coordinates for plane points.

use std::f64::consts::PI;

use crate::geom::PlanePoint;

/// A plane point in polar form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPoint {
    /// Distance from the origin (modulus).
    pub abs: f64,
    /// Angle from the positive horizontal axis, in radians within `[0, 2π]`.
    ///
    /// Points just below the positive x axis fold to `2π - ε`, which rounds
    /// to exactly `2π` once `ε` falls under half an ulp of `2π`.
    pub arg: f64,
}

impl PolarPoint {
    /// Convert a Cartesian plane point.
    ///
    /// The raw angle is `atan2(-y, x)`. Negative values are negated, positive
    /// values are subtracted from `2π`, and an exact zero is kept. NaN inputs
    /// propagate.
    pub fn from_cartesian(point: PlanePoint) -> Self {
        let abs = (point.x.powi(2) + point.y.powi(2)).sqrt();
        let mut arg = (-point.y).atan2(point.x);
        if arg < 0.0 {
            arg = -arg;
        } else if arg > 0.0 {
            arg = 2.0 * PI - arg;
        } else if arg == 0.0 {
            // atan2 yields -0.0 for points on the positive x axis.
            arg = 0.0;
        }
        Self { abs, arg }
    }
}

impl From<PlanePoint> for PolarPoint {
    fn from(point: PlanePoint) -> Self {
        Self::from_cartesian(point)
    }
}
