//! Geometric primitives for the two coordinate spaces.
//!
//! [`PlanePoint`] lives in the application-defined plane, while [`PixelPoint`]
//! and [`ScreenRect`] are measured in device pixels.

/// A point in plane space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanePoint {
    /// Horizontal plane coordinate.
    pub x: f64,
    /// Vertical plane coordinate (grows upward).
    pub y: f64,
}

impl PlanePoint {
    /// Create a new plane point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in pixel space, relative to a surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    /// X value in pixels.
    pub x: f32,
    /// Y value in pixels (grows downward).
    pub y: f32,
}

impl PixelPoint {
    /// Create a new pixel point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset of this point from `other`.
    pub fn relative_to(self, other: PixelPoint) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// A rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: PixelPoint,
    /// Bottom-right corner.
    pub max: PixelPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub fn new(min: PixelPoint, max: PixelPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from its top-left corner and size.
    pub fn from_origin_size(origin: PixelPoint, width: f32, height: f32) -> Self {
        Self::new(origin, PixelPoint::new(origin.x + width, origin.y + height))
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_from_origin_size() {
        let rect = ScreenRect::from_origin_size(PixelPoint::new(10.0, 20.0), 30.0, 40.0);
        assert_eq!(rect.max, PixelPoint::new(40.0, 60.0));
        assert!(rect.is_valid());
        assert_eq!(rect.width(), 30.0);
        assert_eq!(rect.height(), 40.0);
    }

    #[test]
    fn zero_width_rect_is_invalid() {
        let rect = ScreenRect::from_origin_size(PixelPoint::new(0.0, 0.0), 0.0, 10.0);
        assert!(!rect.is_valid());
    }
}
