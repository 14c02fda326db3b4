//! Tracking state and its transitions.
//!
//! A [`Snapshot`] holds everything a mounted surface knows: the last
//! measurement, the coordinate mapper, the tracking flag and the last pointer
//! position. Transitions never mutate a snapshot; they return the next one,
//! so a failed transition leaves the current state untouched.

use crate::error::TrackerError;
use crate::geom::{PixelPoint, PlanePoint, ScreenRect};
use crate::polar::PolarPoint;
use crate::transform::{CoordinateMapper, SurfaceGeometry};
use crate::view::Bounds;

/// Measured size and placement of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Measured width in pixels.
    pub width: f32,
    /// Measured height in pixels.
    pub height: f32,
    /// Bounding rectangle in window coordinates.
    pub rect: ScreenRect,
}

impl Measurement {
    /// Create a measurement from a size and a bounding rectangle.
    pub fn new(width: f32, height: f32, rect: ScreenRect) -> Self {
        Self {
            width,
            height,
            rect,
        }
    }

    /// Measurement of a surface placed at `origin` in window coordinates.
    pub fn at(origin: PixelPoint, width: f32, height: f32) -> Self {
        Self::new(width, height, ScreenRect::from_origin_size(origin, width, height))
    }

    /// Whole surface in local pixel coordinates.
    pub fn local_rect(&self) -> ScreenRect {
        ScreenRect::from_origin_size(PixelPoint::new(0.0, 0.0), self.width, self.height)
    }
}

/// Tracked pointer position in all three coordinate spaces.
///
/// This is the payload handed to mouse-moved callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPoint {
    /// Pixel position relative to the surface's top-left corner.
    pub pixel: PixelPoint,
    /// Plane position.
    pub cartesian: PlanePoint,
    /// Polar form of the plane position.
    pub polar: PolarPoint,
}

impl TrackedPoint {
    /// Map a pixel position through `mapper`.
    pub fn map(mapper: &CoordinateMapper, pixel: PixelPoint) -> Self {
        let cartesian = mapper.pixel_to_plane(pixel);
        Self {
            pixel,
            cartesian,
            polar: PolarPoint::from_cartesian(cartesian),
        }
    }
}

/// Immutable state of a mounted surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    measurement: Measurement,
    mapper: CoordinateMapper,
    tracking: bool,
    last_pixel: PixelPoint,
    point: Option<TrackedPoint>,
}

impl Snapshot {
    /// First snapshot after layout.
    ///
    /// The last pixel position starts at `(0, 0)` and no point is tracked yet.
    pub fn mounted(
        measurement: Measurement,
        bounds: Bounds,
        tracking: bool,
    ) -> Result<Self, TrackerError> {
        let mapper = CoordinateMapper::new(bounds, measurement.width, measurement.height)?;
        Ok(Self {
            measurement,
            mapper,
            tracking,
            last_pixel: PixelPoint::default(),
            point: None,
        })
    }

    /// Snapshot after the surface was re-measured.
    ///
    /// A tracked point keeps its pixel position and is re-mapped.
    pub fn resized(&self, measurement: Measurement) -> Result<Self, TrackerError> {
        let mapper =
            CoordinateMapper::new(self.mapper.bounds(), measurement.width, measurement.height)?;
        Ok(Self {
            measurement,
            mapper,
            point: self.point.map(|point| TrackedPoint::map(&mapper, point.pixel)),
            ..*self
        })
    }

    /// Snapshot with the tracking flag flipped.
    pub fn toggled(&self) -> Self {
        Self {
            tracking: !self.tracking,
            ..*self
        }
    }

    /// Snapshot after the pointer moved to `client` (window coordinates).
    pub fn with_pointer(&self, client: PixelPoint) -> Self {
        let pixel = client.relative_to(self.measurement.rect.min);
        Self {
            last_pixel: pixel,
            point: Some(TrackedPoint::map(&self.mapper, pixel)),
            ..*self
        }
    }

    /// Snapshot after the plane window was replaced.
    ///
    /// The last pixel position is re-mapped through the new window, so a point
    /// is always present afterwards.
    pub fn with_bounds(&self, bounds: Bounds) -> Result<Self, TrackerError> {
        let mapper = CoordinateMapper::new(bounds, self.measurement.width, self.measurement.height)?;
        Ok(Self {
            mapper,
            point: Some(TrackedPoint::map(&mapper, self.last_pixel)),
            ..*self
        })
    }

    /// Last measurement.
    pub fn measurement(&self) -> Measurement {
        self.measurement
    }

    /// Current coordinate mapper.
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Current plane window.
    pub fn bounds(&self) -> Bounds {
        self.mapper.bounds()
    }

    /// Whether pointer moves are tracked.
    pub fn tracking(&self) -> bool {
        self.tracking
    }

    /// Last captured pixel position.
    pub fn last_pixel(&self) -> PixelPoint {
        self.last_pixel
    }

    /// Current tracked point, if any.
    pub fn point(&self) -> Option<&TrackedPoint> {
        self.point.as_ref()
    }

    /// Drawing geometry for the current window and size.
    pub fn geometry(&self) -> SurfaceGeometry {
        self.mapper.geometry()
    }
}
