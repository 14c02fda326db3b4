//! gpui_tracker_plane tracks the mouse over a drawable surface and maps it
//! between pixels, a bounded Cartesian plane window and polar coordinates.
//! The core is backend-agnostic; the `gpui` feature adds a ready-made view.

#![forbid(unsafe_code)]

pub mod control;
pub mod error;
pub mod geom;
pub mod interaction;
pub mod plane;
pub mod polar;
pub mod render;
pub mod style;
pub mod surface;
pub mod transform;
pub mod view;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

#[cfg(feature = "gpui")]
pub use gpui_backend::{GpuiTrackerView, TrackerViewConfig};

pub use control::{ControlPanel, FormError, Readout};
pub use error::{CallbackError, RangeError, TrackerError};
pub use geom::{PixelPoint, PlanePoint, ScreenRect};
pub use interaction::{Measurement, Snapshot, TrackedPoint};
pub use plane::{AnnotatedPlane, Decorations};
pub use polar::PolarPoint;
pub use render::{
    Affine, ArcSpec, Color, Dash, DrawingSurface, FontSpec, LineStyle, RenderCommand, RenderList,
    TextAlign, TextBaseline, TextStyle,
};
pub use style::PlaneStyle;
pub use surface::{
    Decorator, Frame, ListenerGuard, MouseMovedCallback, NoDecorations, SurfaceState,
    TrackerConfig, TrackingSurface, TrackingSurfaceBuilder,
};
pub use transform::{CoordinateMapper, Scale, SurfaceGeometry};
pub use view::{Bounds, Interval};
