//! Plane windows: intervals and bounds.
//!
//! Both types are immutable values. Reconfiguring a surface means building a
//! new [`Bounds`] and handing it over whole.

use crate::error::RangeError;
use crate::geom::PlanePoint;

/// Closed numeric interval `[min, max]` with `max > min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    min: f64,
    max: f64,
    length: f64,
    center: f64,
}

impl Interval {
    /// Build an interval from its bounds.
    ///
    /// Fails when `max` is not strictly greater than `min` (NaN included).
    pub fn from_min_max(min: f64, max: f64) -> Result<Self, RangeError> {
        if !(max > min) {
            return Err(RangeError::MaxNotAboveMin { min, max });
        }
        Ok(Self {
            min,
            max,
            length: max - min,
            center: (max + min) / 2.0,
        })
    }

    /// Build an interval from its length and center.
    ///
    /// Fails when `length` is not strictly positive (NaN included).
    pub fn from_len_cen(length: f64, center: f64) -> Result<Self, RangeError> {
        if !(length > 0.0) {
            return Err(RangeError::NonPositiveLength { length });
        }
        Ok(Self {
            min: center - length / 2.0,
            max: center + length / 2.0,
            length,
            center,
        })
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// `max - min`.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Midpoint.
    pub fn center(&self) -> f64 {
        self.center
    }

    /// Check whether a value lies in the interval, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Rectangular plane window shown by a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Horizontal extent.
    pub horizontal: Interval,
    /// Vertical extent.
    pub vertical: Interval,
}

impl Bounds {
    /// Create bounds from two intervals.
    pub fn new(horizontal: Interval, vertical: Interval) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Square window of half-width `radius` centered at `(center_x, center_y)`.
    pub fn from_center_radius(
        center_x: f64,
        center_y: f64,
        radius: f64,
    ) -> Result<Self, RangeError> {
        Ok(Self::new(
            Interval::from_len_cen(radius * 2.0, center_x)?,
            Interval::from_len_cen(radius * 2.0, center_y)?,
        ))
    }

    /// Center of the window.
    pub fn center(&self) -> PlanePoint {
        PlanePoint::new(self.horizontal.center(), self.vertical.center())
    }

    /// Check whether a plane point lies in the window.
    pub fn contains(&self, point: PlanePoint) -> bool {
        self.horizontal.contains(point.x) && self.vertical.contains(point.y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        let unit = Interval {
            min: -1.0,
            max: 1.0,
            length: 2.0,
            center: 0.0,
        };
        Self::new(unit, unit)
    }
}
