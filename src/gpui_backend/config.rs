use crate::render::Color;

/// Configuration for the GPUI tracker view.
#[derive(Debug, Clone)]
pub struct TrackerViewConfig {
    /// Background painted behind the plane.
    pub background: Color,
    /// Show the text readout below the plane.
    pub show_readout: bool,
    /// Digits after the decimal point in the readout.
    pub readout_decimal_places: usize,
}

impl Default for TrackerViewConfig {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            show_readout: true,
            readout_decimal_places: 3,
        }
    }
}
