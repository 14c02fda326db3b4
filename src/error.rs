//! Error types shared by the tracking core.

/// Error returned by a host callback.
///
/// Callbacks may fail with any error; the surface hands it back to its caller
/// wrapped in [`TrackerError::Callback`].
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Reasons an [`Interval`](crate::view::Interval) cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RangeError {
    /// The upper bound does not exceed the lower bound.
    #[error("max ({max}) needs to be greater than min ({min})")]
    MaxNotAboveMin {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
    /// The requested length is zero, negative or NaN.
    #[error("length ({length}) needs to be strictly greater than zero")]
    NonPositiveLength {
        /// Requested length.
        length: f64,
    },
}

/// Errors produced by the tracking core.
///
/// All variants are synchronous precondition failures. None of them is
/// retried internally.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Bad numeric range handed to an interval factory.
    #[error("invalid range: {0}")]
    InvalidRange(#[from] RangeError),
    /// Mapping attempted against a surface without positive measured area.
    #[error("degenerate surface: measured size is {width}x{height}")]
    DegenerateSurface {
        /// Measured width in pixels.
        width: f32,
        /// Measured height in pixels.
        height: f32,
    },
    /// Operation attempted before the surface was laid out.
    #[error("surface is not mounted")]
    NotMounted,
    /// The host's mouse-moved callback failed.
    #[error("mouse-moved callback failed: {0}")]
    Callback(#[source] CallbackError),
}
