//! Styling for plane annotations.

use crate::render::{Color, FontSpec};

/// Colors, sizes and number formatting used by
/// [`AnnotatedPlane`](crate::plane::AnnotatedPlane).
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneStyle {
    /// Reference circle stroke color.
    pub circle: Color,
    /// Axis line color.
    pub axes: Color,
    /// Guide line color, shared by the abs, h and v guides and the angle marker.
    pub guide: Color,
    /// Tracked point fill color.
    pub point: Color,
    /// Tracked point radius in pixels.
    pub point_radius: f32,
    /// Digits after the decimal point in labels.
    pub decimal_places: usize,
    /// Label font.
    pub font: FontSpec,
    /// Label color.
    pub label: Color,
}

impl PlaneStyle {
    /// Create the default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Format a number for a label.
    pub fn format_number(&self, value: f64) -> String {
        format!("{:.*}", self.decimal_places, value)
    }
}

impl Default for PlaneStyle {
    fn default() -> Self {
        Self {
            circle: Color::BLACK,
            axes: Color::BLACK,
            guide: Color::from_hex(0xFF6A6A),
            point: Color::from_rgb8(200, 0, 0),
            point_radius: 4.0,
            decimal_places: 3,
            font: FontSpec::default(),
            label: Color::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_use_configured_precision() {
        let mut style = PlaneStyle::new();
        assert_eq!(style.format_number(0.5), "0.500");
        style.decimal_places = 1;
        assert_eq!(style.format_number(-2.27), "-2.3");
    }
}
