//! Drawing-surface contract and render primitives.
//!
//! [`DrawingSurface`] is the immediate-mode 2-D API the tracking core draws
//! through. [`RenderList`] implements it by recording device-pixel commands,
//! which render backends (such as the GPUI backend) replay.

mod affine;

use std::f64::consts::{PI, TAU};

pub use affine::Affine;

use crate::geom::{PixelPoint, ScreenRect};

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Opaque color from a `0xRRGGBB` value.
    pub const fn from_hex(rgb: u32) -> Self {
        Self::from_rgb8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

/// Dash pattern: `on` pixels drawn, then `off` pixels skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    /// Length of each drawn dash.
    pub on: f32,
    /// Length of each gap.
    pub off: f32,
}

/// Line stroke styling.
///
/// The width is expressed in pixels of the current coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
    /// Optional dash pattern. `None` draws a solid line.
    pub dash: Option<Dash>,
}

impl LineStyle {
    /// Solid one-pixel line in the given color.
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            width: 1.0,
            dash: None,
        }
    }

    /// Same style with a dash pattern.
    pub fn dashed(mut self, on: f32, off: f32) -> Self {
        self.dash = Some(Dash { on, off });
        self
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::solid(Color::BLACK)
    }
}

/// Font selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Font size in pixels.
    pub size: f32,
    /// Font family name.
    pub family: String,
}

impl FontSpec {
    /// Create a font spec.
    pub fn new(size: f32, family: impl Into<String>) -> Self {
        Self {
            size,
            family: family.into(),
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(13.0, "Georgia")
    }
}

/// Vertical anchoring of text relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    /// Position is the top of the em box.
    Top,
    /// Position is the middle of the em box.
    Middle,
    /// Position is the alphabetic baseline.
    #[default]
    Alphabetic,
    /// Position is below the descenders.
    Ideographic,
    /// Position is the bottom of the em box.
    Bottom,
}

/// Horizontal anchoring of text relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Text starts at the position.
    #[default]
    Left,
    /// Text is centered on the position.
    Center,
    /// Text ends at the position.
    Right,
}

/// Text styling.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    /// Fill color.
    pub color: Color,
    /// Font.
    pub font: FontSpec,
    /// Vertical anchor.
    pub baseline: TextBaseline,
    /// Horizontal anchor.
    pub align: TextAlign,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Circular arc with 2-D canvas `arc()` semantics.
///
/// Angles are in radians, measured clockwise on screen from the positive x
/// axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    /// Center of the circle.
    pub center: PixelPoint,
    /// Radius in pixels.
    pub radius: f32,
    /// Start angle.
    pub start_angle: f64,
    /// End angle.
    pub end_angle: f64,
    /// Sweep direction.
    pub anticlockwise: bool,
}

impl ArcSpec {
    /// Full circle around `center`.
    pub fn circle(center: PixelPoint, radius: f32) -> Self {
        Self {
            center,
            radius,
            start_angle: 0.0,
            end_angle: 2.0 * PI,
            anticlockwise: true,
        }
    }

    /// Signed sweep angle, normalized like a canvas context does.
    ///
    /// Positive sweeps run clockwise on screen. The magnitude never exceeds `2π`.
    pub fn sweep(&self) -> f64 {
        let (start, end) = (self.start_angle, self.end_angle);
        if !self.anticlockwise && end - start >= TAU {
            TAU
        } else if self.anticlockwise && start - end >= TAU {
            -TAU
        } else if !self.anticlockwise && start > end {
            TAU - (start - end) % TAU
        } else if self.anticlockwise && start < end {
            -(TAU - (end - start) % TAU)
        } else {
            end - start
        }
    }

    /// Check whether the arc covers the whole circle.
    pub fn is_full_circle(&self) -> bool {
        self.sweep().abs() >= TAU
    }
}

/// Immediate-mode 2-D drawing API required from the host.
///
/// Stroke style, dash pattern and font are passed with each call rather than
/// held as context state. `save`/`restore` cover the transform only.
pub trait DrawingSurface {
    /// Render at `multiplier` times the measured size and scale the context
    /// to match. Resets the transform stack.
    fn set_resolution(&mut self, multiplier: f32);
    /// Clear a rectangle in local coordinates.
    fn clear(&mut self, rect: ScreenRect);
    /// Push the current transform.
    fn save(&mut self);
    /// Pop the last saved transform. Does nothing when none is saved.
    fn restore(&mut self);
    /// Translate the local coordinate system.
    fn translate(&mut self, x: f32, y: f32);
    /// Rotate the local coordinate system by `angle` radians.
    fn rotate(&mut self, angle: f64);
    /// Scale the local coordinate system.
    fn scale(&mut self, x: f32, y: f32);
    /// Stroke a straight line.
    fn stroke_line(&mut self, from: PixelPoint, to: PixelPoint, style: &LineStyle);
    /// Stroke an arc.
    fn stroke_arc(&mut self, arc: &ArcSpec, style: &LineStyle);
    /// Fill the sector bounded by an arc.
    fn fill_arc(&mut self, arc: &ArcSpec, color: Color);
    /// Fill a line of text.
    fn fill_text(&mut self, text: &str, at: PixelPoint, style: &TextStyle);
}

/// Recorded drawing command, in device pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Clear a rectangle.
    Clear(ScreenRect),
    /// Stroke a straight line.
    Line {
        /// Line start.
        start: PixelPoint,
        /// Line end.
        end: PixelPoint,
        /// Stroke styling, scaled to device pixels.
        style: LineStyle,
    },
    /// Stroke an arc.
    Arc {
        /// Arc geometry.
        arc: ArcSpec,
        /// Stroke styling, scaled to device pixels.
        style: LineStyle,
    },
    /// Fill an arc sector.
    FillArc {
        /// Arc geometry.
        arc: ArcSpec,
        /// Fill color.
        color: Color,
    },
    /// Draw text.
    Text {
        /// Anchor position.
        position: PixelPoint,
        /// Rotation of the text run around its anchor, in radians.
        rotation: f64,
        /// Text content.
        text: String,
        /// Text styling, with the font scaled to device pixels.
        style: TextStyle,
    },
}

/// Recording [`DrawingSurface`].
///
/// Commands are stored with the transform stack already applied. The stack
/// composes translations, rotations and uniform scales; arcs and text assume
/// no shear or non-uniform scale. Clearing starts a new frame.
#[derive(Debug, Clone)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
    transform: Affine,
    saved: Vec<Affine>,
    resolution: f32,
}

impl RenderList {
    /// Create an empty render list at 1x resolution.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            transform: Affine::IDENTITY,
            saved: Vec::new(),
            resolution: 1.0,
        }
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Resolution multiplier between measured and device pixels.
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Current transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    fn scaled_line(&self, style: &LineStyle) -> LineStyle {
        let factor = self.transform.scale_factor() as f32;
        LineStyle {
            color: style.color,
            width: style.width * factor,
            dash: style.dash.map(|dash| Dash {
                on: dash.on * factor,
                off: dash.off * factor,
            }),
        }
    }

    fn device_arc(&self, arc: &ArcSpec) -> ArcSpec {
        let rotation = self.transform.rotation();
        ArcSpec {
            center: self.transform.apply(arc.center),
            radius: arc.radius * self.transform.scale_factor() as f32,
            start_angle: arc.start_angle + rotation,
            end_angle: arc.end_angle + rotation,
            anticlockwise: arc.anticlockwise,
        }
    }
}

impl Default for RenderList {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSurface for RenderList {
    fn set_resolution(&mut self, multiplier: f32) {
        self.resolution = multiplier;
        self.transform = Affine::IDENTITY;
        self.saved.clear();
        self.scale(multiplier, multiplier);
    }

    fn clear(&mut self, rect: ScreenRect) {
        self.commands.clear();
        let rect = ScreenRect::new(self.transform.apply(rect.min), self.transform.apply(rect.max));
        self.commands.push(RenderCommand::Clear(rect));
    }

    fn save(&mut self) {
        self.saved.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.saved.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.transform.translate(x as f64, y as f64);
    }

    fn rotate(&mut self, angle: f64) {
        self.transform.rotate(angle);
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.transform.scale(x as f64, y as f64);
    }

    fn stroke_line(&mut self, from: PixelPoint, to: PixelPoint, style: &LineStyle) {
        self.commands.push(RenderCommand::Line {
            start: self.transform.apply(from),
            end: self.transform.apply(to),
            style: self.scaled_line(style),
        });
    }

    fn stroke_arc(&mut self, arc: &ArcSpec, style: &LineStyle) {
        self.commands.push(RenderCommand::Arc {
            arc: self.device_arc(arc),
            style: self.scaled_line(style),
        });
    }

    fn fill_arc(&mut self, arc: &ArcSpec, color: Color) {
        self.commands.push(RenderCommand::FillArc {
            arc: self.device_arc(arc),
            color,
        });
    }

    fn fill_text(&mut self, text: &str, at: PixelPoint, style: &TextStyle) {
        let mut style = style.clone();
        style.font.size *= self.transform.scale_factor() as f32;
        self.commands.push(RenderCommand::Text {
            position: self.transform.apply(at),
            rotation: self.transform.rotation(),
            text: text.to_string(),
            style,
        });
    }
}

/// Approximate an arc by a polyline.
///
/// Emits at least two points; one segment per `π/32` of sweep.
pub fn flatten_arc(arc: &ArcSpec) -> Vec<PixelPoint> {
    let sweep = arc.sweep();
    let steps = ((sweep.abs() / (PI / 32.0)).ceil() as usize).max(1);
    let cx = arc.center.x as f64;
    let cy = arc.center.y as f64;
    let r = arc.radius as f64;
    (0..=steps)
        .map(|i| {
            let theta = arc.start_angle + sweep * i as f64 / steps as f64;
            PixelPoint::new((cx + r * theta.cos()) as f32, (cy + r * theta.sin()) as f32)
        })
        .collect()
}

/// Split a segment into its visible dashes.
///
/// Returns the whole segment when the pattern has no positive dash length.
pub fn dash_segments(start: PixelPoint, end: PixelPoint, dash: Dash) -> Vec<(PixelPoint, PixelPoint)> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length = (dx * dx + dy * dy).sqrt();
    if dash.on <= 0.0 || dash.off < 0.0 || length <= 0.0 {
        return vec![(start, end)];
    }
    let at = |t: f32| PixelPoint::new(start.x + dx * t / length, start.y + dy * t / length);
    let mut out = Vec::new();
    let mut cursor = 0.0_f32;
    while cursor < length {
        let stop = (cursor + dash.on).min(length);
        out.push((at(cursor), at(stop)));
        cursor = stop + dash.off;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn hex_colors() {
        let c = Color::from_hex(0xFF6A6A);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 106.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn arc_sweep_follows_canvas_rules() {
        let center = PixelPoint::new(0.0, 0.0);
        assert_eq!(ArcSpec::circle(center, 1.0).sweep(), -TAU);
        let marker = ArcSpec {
            center,
            radius: 20.0,
            start_angle: 0.0,
            end_angle: -FRAC_PI_2,
            anticlockwise: true,
        };
        assert_eq!(marker.sweep(), -FRAC_PI_2);
        let wrapped = ArcSpec {
            anticlockwise: false,
            ..marker
        };
        assert!((wrapped.sweep() - 3.0 * FRAC_PI_2).abs() < 1e-12);
        let reversed = ArcSpec {
            start_angle: 0.0,
            end_angle: FRAC_PI_2,
            anticlockwise: true,
            ..marker
        };
        assert!((reversed.sweep() + 3.0 * FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn flatten_quarter_arc_endpoints() {
        let arc = ArcSpec {
            center: PixelPoint::new(10.0, 10.0),
            radius: 5.0,
            start_angle: 0.0,
            end_angle: FRAC_PI_2,
            anticlockwise: false,
        };
        let points = flatten_arc(&arc);
        assert_eq!(points.len(), 17);
        let first = points[0];
        let last = points[points.len() - 1];
        assert!((first.x - 15.0).abs() < 1e-4 && (first.y - 10.0).abs() < 1e-4);
        assert!((last.x - 10.0).abs() < 1e-4 && (last.y - 15.0).abs() < 1e-4);
    }

    #[test]
    fn dashes_cover_segment() {
        let dashes = dash_segments(
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(20.0, 0.0),
            Dash { on: 3.0, off: 3.0 },
        );
        assert_eq!(dashes.len(), 4);
        assert_eq!(dashes[0], (PixelPoint::new(0.0, 0.0), PixelPoint::new(3.0, 0.0)));
        assert_eq!(dashes[3], (PixelPoint::new(18.0, 0.0), PixelPoint::new(20.0, 0.0)));
    }

    #[test]
    fn recorder_applies_resolution_and_stack() {
        let mut list = RenderList::new();
        list.set_resolution(2.0);
        list.save();
        list.translate(5.0, 5.0);
        list.stroke_line(
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(10.0, 0.0),
            &LineStyle::solid(Color::BLACK).dashed(3.0, 3.0),
        );
        list.restore();
        list.fill_arc(&ArcSpec::circle(PixelPoint::new(1.0, 1.0), 4.0), Color::WHITE);
        match &list.commands()[0] {
            RenderCommand::Line { start, end, style } => {
                assert_eq!(*start, PixelPoint::new(10.0, 10.0));
                assert_eq!(*end, PixelPoint::new(30.0, 10.0));
                assert_eq!(style.width, 2.0);
                assert_eq!(style.dash, Some(Dash { on: 6.0, off: 6.0 }));
            }
            other => panic!("unexpected command {other:?}"),
        }
        match &list.commands()[1] {
            RenderCommand::FillArc { arc, .. } => {
                assert_eq!(arc.center, PixelPoint::new(2.0, 2.0));
                assert_eq!(arc.radius, 8.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn resolution_resets_earlier_transforms() {
        let mut list = RenderList::new();
        list.translate(40.0, 40.0);
        list.save();
        list.rotate(1.0);
        list.set_resolution(3.0);
        list.restore();
        assert_eq!(list.transform().scale_factor(), 3.0);
        list.stroke_line(
            PixelPoint::new(1.0, 2.0),
            PixelPoint::new(2.0, 2.0),
            &LineStyle::default(),
        );
        match &list.commands()[0] {
            RenderCommand::Line { start, end, .. } => {
                assert_eq!(*start, PixelPoint::new(3.0, 6.0));
                assert_eq!(*end, PixelPoint::new(6.0, 6.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn clear_starts_new_frame() {
        let mut list = RenderList::new();
        let style = LineStyle::default();
        list.stroke_line(PixelPoint::new(0.0, 0.0), PixelPoint::new(1.0, 1.0), &style);
        list.clear(ScreenRect::from_origin_size(PixelPoint::new(0.0, 0.0), 10.0, 10.0));
        assert_eq!(list.commands().len(), 1);
        assert!(matches!(list.commands()[0], RenderCommand::Clear(_)));
    }

    #[test]
    fn rotated_text_records_angle() {
        let mut list = RenderList::new();
        list.translate(100.0, 100.0);
        list.rotate(-FRAC_PI_2);
        list.fill_text("r", PixelPoint::new(10.0, 0.0), &TextStyle::default());
        match &list.commands()[0] {
            RenderCommand::Text {
                position, rotation, ..
            } => {
                assert!((position.x - 100.0).abs() < 1e-4);
                assert!((position.y - 90.0).abs() < 1e-4);
                assert!((rotation + FRAC_PI_2).abs() < 1e-12);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
