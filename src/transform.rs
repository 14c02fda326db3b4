//! Coordinate transforms between pixel and plane space.

use crate::error::TrackerError;
use crate::geom::{PixelPoint, PlanePoint};
use crate::view::Bounds;

/// Pixels per plane unit on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    /// Horizontal pixels per unit.
    pub h: f64,
    /// Vertical pixels per unit.
    pub v: f64,
}

/// Derived drawing geometry for one bounds/size combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    /// Pixels per plane unit.
    pub scale: Scale,
    /// Pixel location of the plane origin. May lie outside the surface.
    pub origin: PixelPoint,
}

impl SurfaceGeometry {
    /// The smaller of the two axis scales.
    pub fn min_scale(&self) -> f64 {
        self.scale.h.min(self.scale.v)
    }
}

/// Affine map between a measured surface and a plane window.
///
/// The vertical axis is inverted: pixel rows grow downward while plane
/// coordinates grow upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    bounds: Bounds,
    width: f32,
    height: f32,
}

impl CoordinateMapper {
    /// Create a mapper for the given bounds and measured size.
    ///
    /// Fails with [`TrackerError::DegenerateSurface`] unless both dimensions
    /// are finite and strictly positive.
    pub fn new(bounds: Bounds, width: f32, height: f32) -> Result<Self, TrackerError> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(TrackerError::DegenerateSurface { width, height });
        }
        Ok(Self {
            bounds,
            width,
            height,
        })
    }

    /// The plane window.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Measured size in pixels.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Map a pixel point into the plane. Points off the surface are not clamped.
    pub fn pixel_to_plane(&self, point: PixelPoint) -> PlanePoint {
        let h = self.bounds.horizontal;
        let v = self.bounds.vertical;
        PlanePoint::new(
            h.length() * point.x as f64 / self.width as f64 + h.min(),
            v.max() - v.length() * point.y as f64 / self.height as f64,
        )
    }

    /// Map a plane point back onto the surface.
    pub fn plane_to_pixel(&self, point: PlanePoint) -> PixelPoint {
        let h = self.bounds.horizontal;
        let v = self.bounds.vertical;
        let x = (point.x - h.min()) * self.width as f64 / h.length();
        let y = (v.max() - point.y) * self.height as f64 / v.length();
        PixelPoint::new(x as f32, y as f32)
    }

    /// Scale factors and pixel origin for the current window.
    pub fn geometry(&self) -> SurfaceGeometry {
        let h = self.bounds.horizontal;
        let v = self.bounds.vertical;
        let scale = Scale {
            h: self.width as f64 / (h.max() - h.min()),
            v: self.height as f64 / (v.max() - v.min()),
        };
        let origin = PixelPoint::new(
            (0.0 - scale.h * h.min()) as f32,
            (self.height as f64 + scale.v * v.min()) as f32,
        );
        SurfaceGeometry { scale, origin }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Interval;

    fn unit_mapper() -> CoordinateMapper {
        CoordinateMapper::new(Bounds::default(), 500.0, 500.0).expect("valid mapper")
    }

    #[test]
    fn corners_and_center() {
        let mapper = unit_mapper();
        assert_eq!(
            mapper.pixel_to_plane(PixelPoint::new(250.0, 250.0)),
            PlanePoint::new(0.0, 0.0)
        );
        assert_eq!(
            mapper.pixel_to_plane(PixelPoint::new(0.0, 0.0)),
            PlanePoint::new(-1.0, 1.0)
        );
        assert_eq!(
            mapper.pixel_to_plane(PixelPoint::new(500.0, 500.0)),
            PlanePoint::new(1.0, -1.0)
        );
    }

    #[test]
    fn pixel_roundtrip() {
        let bounds = Bounds::new(
            Interval::from_min_max(-3.5, 12.0).unwrap(),
            Interval::from_min_max(0.25, 0.75).unwrap(),
        );
        let mapper = CoordinateMapper::new(bounds, 640.0, 333.0).unwrap();
        for (x, y) in [(0.0, 0.0), (17.5, 301.25), (640.0, 333.0), (-20.0, 400.0)] {
            let pixel = PixelPoint::new(x, y);
            let back = mapper.plane_to_pixel(mapper.pixel_to_plane(pixel));
            assert!((back.x - pixel.x).abs() < 1e-3);
            assert!((back.y - pixel.y).abs() < 1e-3);
        }
    }

    #[test]
    fn geometry_locates_origin() {
        let bounds = Bounds::new(
            Interval::from_min_max(0.0, 4.0).unwrap(),
            Interval::from_min_max(-1.0, 1.0).unwrap(),
        );
        let geometry = CoordinateMapper::new(bounds, 400.0, 200.0)
            .unwrap()
            .geometry();
        assert_eq!(geometry.scale, Scale { h: 100.0, v: 100.0 });
        assert_eq!(geometry.origin, PixelPoint::new(0.0, 100.0));
        assert_eq!(geometry.min_scale(), 100.0);
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        let result = CoordinateMapper::new(Bounds::default(), 0.0, 500.0);
        assert!(matches!(
            result,
            Err(TrackerError::DegenerateSurface { width, .. }) if width == 0.0
        ));
    }
}
