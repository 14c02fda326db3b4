//! Headless control panel for reconfiguring the plane window.
//!
//! The panel keeps the raw text of its inputs. Submitting validates it and
//! either produces new [`Bounds`] or a [`FormError`] to show to the user.

use crate::interaction::TrackedPoint;
use crate::view::Bounds;

/// Validation failure of a control panel submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// A center coordinate is not a finite number.
    #[error("please enter a valid center")]
    InvalidCenter,
    /// The radius is not a finite, strictly positive number.
    #[error("please enter a positive radius")]
    InvalidRadius,
}

/// Center and radius inputs of the plane window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPanel {
    /// Horizontal center, as typed.
    pub center_x: String,
    /// Vertical center, as typed.
    pub center_y: String,
    /// Half-width of the window, as typed.
    pub radius: String,
}

impl ControlPanel {
    /// Create a panel with the default inputs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the inputs and build the requested window.
    ///
    /// Nothing is applied on error.
    pub fn submit(&self) -> Result<Bounds, FormError> {
        let center_x = parse_finite(&self.center_x).ok_or(FormError::InvalidCenter)?;
        let center_y = parse_finite(&self.center_y).ok_or(FormError::InvalidCenter)?;
        let radius = parse_finite(&self.radius)
            .filter(|radius| *radius > 0.0)
            .ok_or(FormError::InvalidRadius)?;
        Bounds::from_center_radius(center_x, center_y, radius).map_err(|_| FormError::InvalidRadius)
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            center_x: "0".to_string(),
            center_y: "0".to_string(),
            radius: "1".to_string(),
        }
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Text readout of the last tracked point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    /// Horizontal coordinate.
    pub x: String,
    /// Vertical coordinate.
    pub y: String,
    /// Modulus.
    pub abs: String,
    /// Angle.
    pub arg: String,
}

impl Readout {
    /// Readout for `point`, or placeholders when nothing is tracked yet.
    pub fn new(point: Option<&TrackedPoint>, decimal_places: usize) -> Self {
        let Some(point) = point else {
            return Self::default();
        };
        let fmt = |value: f64| format!("{value:.decimal_places$}");
        Self {
            x: fmt(point.cartesian.x),
            y: fmt(point.cartesian.y),
            abs: fmt(point.polar.abs),
            arg: fmt(point.polar.arg),
        }
    }

    /// Labeled lines, one per value.
    pub fn lines(&self) -> [String; 4] {
        [
            format!("x = {}", self.x),
            format!("y = {}", self.y),
            format!("r = {}", self.abs),
            format!("θ = {}", self.arg),
        ]
    }
}

impl Default for Readout {
    fn default() -> Self {
        Self {
            x: "-".to_string(),
            y: "-".to_string(),
            abs: "-".to_string(),
            arg: "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::PixelPoint;
    use crate::transform::CoordinateMapper;

    fn panel(center_x: &str, center_y: &str, radius: &str) -> ControlPanel {
        ControlPanel {
            center_x: center_x.to_string(),
            center_y: center_y.to_string(),
            radius: radius.to_string(),
        }
    }

    #[test]
    fn defaults_give_unit_window() {
        assert_eq!(ControlPanel::new().submit(), Ok(Bounds::default()));
    }

    #[test]
    fn valid_inputs_build_bounds() {
        let bounds = panel(" 1 ", "1", "2").submit().unwrap();
        assert_eq!(bounds.horizontal.min(), -1.0);
        assert_eq!(bounds.horizontal.max(), 3.0);
        assert_eq!(bounds.vertical.length(), 4.0);
    }

    #[test]
    fn bad_center_is_rejected() {
        assert_eq!(panel("abc", "0", "1").submit(), Err(FormError::InvalidCenter));
        assert_eq!(panel("0", "inf", "1").submit(), Err(FormError::InvalidCenter));
        assert_eq!(panel("", "0", "1").submit(), Err(FormError::InvalidCenter));
    }

    #[test]
    fn bad_radius_is_rejected() {
        for radius in ["0", "-1", "NaN", "one"] {
            assert_eq!(
                panel("0", "0", radius).submit(),
                Err(FormError::InvalidRadius),
                "radius {radius:?}"
            );
        }
        assert_eq!(
            FormError::InvalidRadius.to_string(),
            "please enter a positive radius"
        );
    }

    #[test]
    fn readout_formats_point() {
        assert_eq!(Readout::new(None, 3).lines()[0], "x = -");
        let mapper = CoordinateMapper::new(Bounds::default(), 500.0, 500.0).unwrap();
        let point = TrackedPoint::map(&mapper, PixelPoint::new(500.0, 250.0));
        let readout = Readout::new(Some(&point), 2);
        assert_eq!(
            readout.lines(),
            [
                "x = 1.00".to_string(),
                "y = 0.00".to_string(),
                "r = 1.00".to_string(),
                "θ = 0.00".to_string(),
            ]
        );
    }
}
