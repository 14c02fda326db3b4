//! Tracking surface: lifecycle, pointer events and redraw dispatch.
//!
//! A [`TrackingSurface`] owns a [`DrawingSurface`], the resize-listener guard
//! handed over at mount, an injected [`Decorator`] and the host's mouse-moved
//! callback. Events are delivered serially by the host.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::error::{CallbackError, TrackerError};
use crate::geom::PixelPoint;
use crate::interaction::{Measurement, Snapshot, TrackedPoint};
use crate::render::DrawingSurface;
use crate::transform::SurfaceGeometry;
use crate::view::Bounds;

/// Everything a decorator needs to paint one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Current measurement.
    pub measurement: Measurement,
    /// Scale and pixel origin for the current window.
    pub geometry: SurfaceGeometry,
    /// Tracked point. `None` on idle frames.
    pub point: Option<&'a TrackedPoint>,
}

/// Redraw strategy plugged into a [`TrackingSurface`].
pub trait Decorator {
    /// Repaint the whole surface for `frame`.
    fn redraw(&self, frame: &Frame<'_>, surface: &mut dyn DrawingSurface);
}

/// Decorator that only clears the surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDecorations;

impl Decorator for NoDecorations {
    fn redraw(&self, frame: &Frame<'_>, surface: &mut dyn DrawingSurface) {
        surface.clear(frame.measurement.local_rect());
    }
}

/// Subscription to host resize notifications.
///
/// The release action runs exactly once: on [`ListenerGuard::release`] or
/// when the guard is dropped.
pub struct ListenerGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl ListenerGuard {
    /// Guard that runs `release` when the subscription ends.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Guard with nothing to release.
    pub fn noop() -> Self {
        Self { release: None }
    }

    /// End the subscription now.
    pub fn release(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Initialization-time configuration of a [`TrackingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Requested surface width in pixels.
    pub width: f32,
    /// Requested surface height in pixels.
    pub height: f32,
    /// Initial plane window.
    pub bounds: Bounds,
    /// Whether tracking is on right after mount.
    pub tracking: bool,
    /// Render at this multiple of the measured size.
    pub resolution: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            bounds: Bounds::default(),
            tracking: false,
            resolution: 2.0,
        }
    }
}

/// Host callback receiving tracked points.
pub type MouseMovedCallback = Box<dyn FnMut(&TrackedPoint) -> Result<(), CallbackError>>;

/// Externally visible lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    /// Not laid out yet.
    Unmounted,
    /// Laid out and receiving events.
    Mounted {
        /// Whether pointer moves are tracked.
        tracking: bool,
    },
    /// Unmounted for good. Further events are ignored.
    TornDown,
}

#[derive(Debug)]
enum Lifecycle {
    Unmounted,
    Mounted(Snapshot),
    TornDown,
}

/// Mouse-tracking drawing surface.
pub struct TrackingSurface<S> {
    config: TrackerConfig,
    surface: S,
    decorator: Box<dyn Decorator>,
    on_mouse_moved: Option<MouseMovedCallback>,
    lifecycle: Lifecycle,
    listener: Option<ListenerGuard>,
}

impl<S: DrawingSurface> TrackingSurface<S> {
    /// Create a surface with default configuration and no decorations.
    pub fn new(surface: S) -> Self {
        Self::builder(surface).build()
    }

    /// Start building a surface around `surface`.
    pub fn builder(surface: S) -> TrackingSurfaceBuilder<S> {
        TrackingSurfaceBuilder {
            surface,
            config: TrackerConfig::default(),
            decorator: Box::new(NoDecorations),
            on_mouse_moved: None,
        }
    }

    /// Access the configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Access the drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SurfaceState {
        match &self.lifecycle {
            Lifecycle::Unmounted => SurfaceState::Unmounted,
            Lifecycle::Mounted(snapshot) => SurfaceState::Mounted {
                tracking: snapshot.tracking(),
            },
            Lifecycle::TornDown => SurfaceState::TornDown,
        }
    }

    /// Current snapshot, when mounted.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match &self.lifecycle {
            Lifecycle::Mounted(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// Whether the surface is mounted.
    pub fn is_mounted(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Whether pointer moves are currently tracked.
    pub fn tracking(&self) -> bool {
        self.snapshot().is_some_and(Snapshot::tracking)
    }

    /// Current plane window.
    pub fn bounds(&self) -> Bounds {
        self.snapshot()
            .map_or(self.config.bounds, Snapshot::bounds)
    }

    /// Last tracked point.
    pub fn point(&self) -> Option<TrackedPoint> {
        self.snapshot().and_then(|snapshot| snapshot.point().copied())
    }

    /// Replace the mouse-moved callback.
    pub fn set_on_mouse_moved(
        &mut self,
        callback: impl FnMut(&TrackedPoint) -> Result<(), CallbackError> + 'static,
    ) {
        self.on_mouse_moved = Some(Box::new(callback));
    }

    /// Replace the redraw strategy and repaint.
    pub fn set_decorator(&mut self, decorator: impl Decorator + 'static) {
        self.decorator = Box::new(decorator);
        self.draw();
    }

    /// Lay out the surface.
    ///
    /// Takes ownership of the resize listener and draws the idle frame. A
    /// second mount re-measures and replaces the listener, keeping the rest
    /// of the state.
    pub fn mount(
        &mut self,
        measurement: Measurement,
        listener: ListenerGuard,
    ) -> Result<(), TrackerError> {
        let snapshot = match &self.lifecycle {
            Lifecycle::TornDown => {
                warn!("mount after teardown ignored");
                return Ok(());
            }
            Lifecycle::Unmounted => {
                Snapshot::mounted(measurement, self.config.bounds, self.config.tracking)?
            }
            Lifecycle::Mounted(current) => current.resized(measurement)?,
        };
        debug!(
            width = measurement.width,
            height = measurement.height,
            tracking = snapshot.tracking(),
            "tracking surface mounted"
        );
        self.surface.set_resolution(self.config.resolution);
        self.listener = Some(listener);
        self.lifecycle = Lifecycle::Mounted(snapshot);
        self.draw();
        Ok(())
    }

    /// Re-measure after the host reported a size change.
    ///
    /// Repaints the current frame. Tracking and the callback are untouched.
    pub fn resize(&mut self, measurement: Measurement) -> Result<(), TrackerError> {
        let next = match &self.lifecycle {
            Lifecycle::Unmounted => return Err(TrackerError::NotMounted),
            Lifecycle::TornDown => {
                warn!("resize after teardown ignored");
                return Ok(());
            }
            Lifecycle::Mounted(current) => current.resized(measurement)?,
        };
        debug!(
            width = measurement.width,
            height = measurement.height,
            "tracking surface resized"
        );
        self.surface.set_resolution(self.config.resolution);
        self.lifecycle = Lifecycle::Mounted(next);
        self.draw();
        Ok(())
    }

    /// Toggle tracking and return the new flag.
    ///
    /// After teardown the click is ignored and `false` is returned.
    pub fn click(&mut self) -> Result<bool, TrackerError> {
        let next = match &self.lifecycle {
            Lifecycle::Unmounted => return Err(TrackerError::NotMounted),
            Lifecycle::TornDown => {
                warn!("click after teardown ignored");
                return Ok(false);
            }
            Lifecycle::Mounted(current) => current.toggled(),
        };
        let tracking = next.tracking();
        debug!(tracking, "tracking toggled");
        self.lifecycle = Lifecycle::Mounted(next);
        Ok(tracking)
    }

    /// Handle a pointer move at `client`, in window coordinates.
    ///
    /// While tracking, the point is mapped, the surface redrawn and the
    /// callback invoked. Returns the tracked point, or `None` when the move
    /// was not tracked.
    pub fn pointer_move(
        &mut self,
        client: PixelPoint,
    ) -> Result<Option<TrackedPoint>, TrackerError> {
        let next = match &self.lifecycle {
            Lifecycle::Unmounted => return Err(TrackerError::NotMounted),
            Lifecycle::TornDown => {
                warn!("pointer move after teardown ignored");
                return Ok(None);
            }
            Lifecycle::Mounted(current) if !current.tracking() => return Ok(None),
            Lifecycle::Mounted(current) => current.with_pointer(client),
        };
        self.commit(next)
    }

    /// Replace the plane window.
    ///
    /// The last pixel position is re-mapped, the surface redrawn and the
    /// callback invoked, whether or not tracking is on.
    pub fn set_bounds(&mut self, bounds: Bounds) -> Result<Option<TrackedPoint>, TrackerError> {
        let next = match &self.lifecycle {
            Lifecycle::Unmounted => return Err(TrackerError::NotMounted),
            Lifecycle::TornDown => {
                warn!("bounds change after teardown ignored");
                return Ok(None);
            }
            Lifecycle::Mounted(current) => current.with_bounds(bounds)?,
        };
        debug!(
            h_min = bounds.horizontal.min(),
            h_max = bounds.horizontal.max(),
            v_min = bounds.vertical.min(),
            v_max = bounds.vertical.max(),
            "bounds replaced"
        );
        self.commit(next)
    }

    /// Repaint the current frame.
    pub fn redraw(&mut self) -> Result<(), TrackerError> {
        match self.lifecycle {
            Lifecycle::Unmounted => Err(TrackerError::NotMounted),
            Lifecycle::TornDown => Ok(()),
            Lifecycle::Mounted(_) => {
                self.draw();
                Ok(())
            }
        }
    }

    /// Tear the surface down and release the resize listener.
    pub fn unmount(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.release();
        }
        if !matches!(self.lifecycle, Lifecycle::TornDown) {
            debug!("tracking surface torn down");
        }
        self.lifecycle = Lifecycle::TornDown;
    }

    fn commit(&mut self, next: Snapshot) -> Result<Option<TrackedPoint>, TrackerError> {
        let point = next.point().copied();
        self.lifecycle = Lifecycle::Mounted(next);
        self.draw();
        if let Some(point) = point {
            trace!(
                x = point.cartesian.x,
                y = point.cartesian.y,
                abs = point.polar.abs,
                arg = point.polar.arg,
                "point tracked"
            );
            if let Some(callback) = self.on_mouse_moved.as_mut() {
                callback(&point).map_err(TrackerError::Callback)?;
            }
        }
        Ok(point)
    }

    fn draw(&mut self) {
        if let Lifecycle::Mounted(snapshot) = &self.lifecycle {
            let frame = Frame {
                measurement: snapshot.measurement(),
                geometry: snapshot.geometry(),
                point: snapshot.point(),
            };
            self.decorator.redraw(&frame, &mut self.surface);
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for TrackingSurface<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackingSurface")
            .field("config", &self.config)
            .field("surface", &self.surface)
            .field("lifecycle", &self.lifecycle)
            .field("listener", &self.listener)
            .field("has_callback", &self.on_mouse_moved.is_some())
            .finish()
    }
}

/// Builder for configuring a [`TrackingSurface`] before construction.
pub struct TrackingSurfaceBuilder<S> {
    surface: S,
    config: TrackerConfig,
    decorator: Box<dyn Decorator>,
    on_mouse_moved: Option<MouseMovedCallback>,
}

impl<S: DrawingSurface> TrackingSurfaceBuilder<S> {
    /// Replace the whole configuration.
    pub fn config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the requested surface size.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Set the initial plane window.
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.config.bounds = bounds;
        self
    }

    /// Set whether tracking is on right after mount.
    pub fn tracking(mut self, tracking: bool) -> Self {
        self.config.tracking = tracking;
        self
    }

    /// Set the resolution multiplier.
    pub fn resolution(mut self, resolution: f32) -> Self {
        self.config.resolution = resolution;
        self
    }

    /// Set the redraw strategy.
    pub fn decorator(mut self, decorator: impl Decorator + 'static) -> Self {
        self.decorator = Box::new(decorator);
        self
    }

    /// Set the mouse-moved callback.
    pub fn on_mouse_moved(
        mut self,
        callback: impl FnMut(&TrackedPoint) -> Result<(), CallbackError> + 'static,
    ) -> Self {
        self.on_mouse_moved = Some(Box::new(callback));
        self
    }

    /// Build the surface.
    pub fn build(self) -> TrackingSurface<S> {
        TrackingSurface {
            config: self.config,
            surface: self.surface,
            decorator: self.decorator,
            on_mouse_moved: self.on_mouse_moved,
            lifecycle: Lifecycle::Unmounted,
            listener: None,
        }
    }
}
