//! GPUI integration for gpui_tracker_plane.
//!
//! This module provides a GPUI view that measures a canvas, feeds click,
//! pointer and resize events to a [`TrackingSurface`](crate::surface::TrackingSurface)
//! and paints the frames it records.

mod config;
mod paint;
mod view;

pub use config::TrackerViewConfig;
pub use view::GpuiTrackerView;
