//! Annotated Cartesian plane.
//!
//! [`AnnotatedPlane`] is the [`Decorator`] that paints the reference circle,
//! axes, guides, labels and the tracked point. Stages run in a fixed order on
//! every redraw, later ones painting over earlier ones. Each stage is gated by
//! a [`Decorations`] switch, and stages that need a point are skipped on idle
//! frames.

use std::f64::consts::PI;

use crate::geom::PixelPoint;
use crate::interaction::TrackedPoint;
use crate::render::{
    ArcSpec, DrawingSurface, LineStyle, TextAlign, TextBaseline, TextStyle,
};
use crate::style::PlaneStyle;
use crate::surface::{Decorator, Frame};

/// Radius of the angle marker arc in pixels.
const ANGLE_MARKER_RADIUS: f32 = 20.0;
/// Distance of the angle label from the origin in pixels.
const ARG_LABEL_DISTANCE: f32 = 30.0;
/// Margin keeping the reference circle inside the surface.
const CIRCLE_MARGIN: f64 = 0.995;

/// Switches for the individual decoration stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decorations {
    /// Reference circle around the origin.
    pub circle: bool,
    /// Dashed horizontal axis.
    pub h_axis: bool,
    /// Dashed vertical axis.
    pub v_axis: bool,
    /// Line from the origin to the point.
    pub abs_guide: bool,
    /// Modulus label along the abs guide.
    pub abs_label: bool,
    /// Arc from the horizontal axis to the point's angle.
    pub angle_marker: bool,
    /// `θ` label inside the angle marker.
    pub arg_label: bool,
    /// Vertical line from the horizontal axis to the point.
    pub h_guide: bool,
    /// Horizontal coordinate label.
    pub h_label: bool,
    /// Horizontal line from the vertical axis to the point.
    pub v_guide: bool,
    /// Vertical coordinate label.
    pub v_label: bool,
    /// Filled disc at the point.
    pub point: bool,
    /// Polar coordinates next to the point.
    pub polar_label: bool,
}

impl Decorations {
    /// Every stage enabled.
    pub fn all() -> Self {
        Self {
            circle: true,
            h_axis: true,
            v_axis: true,
            abs_guide: true,
            abs_label: true,
            angle_marker: true,
            arg_label: true,
            h_guide: true,
            h_label: true,
            v_guide: true,
            v_label: true,
            point: true,
            polar_label: true,
        }
    }

    /// Every stage disabled. Only the clear runs.
    pub fn none() -> Self {
        Self {
            circle: false,
            h_axis: false,
            v_axis: false,
            abs_guide: false,
            abs_label: false,
            angle_marker: false,
            arg_label: false,
            h_guide: false,
            h_label: false,
            v_guide: false,
            v_label: false,
            point: false,
            polar_label: false,
        }
    }
}

impl Default for Decorations {
    fn default() -> Self {
        Self {
            abs_label: false,
            arg_label: false,
            polar_label: false,
            ..Self::all()
        }
    }
}

/// Decoration pipeline for a tracked Cartesian plane.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedPlane {
    decorations: Decorations,
    style: PlaneStyle,
    circle_radius: f64,
}

impl AnnotatedPlane {
    /// Create a plane with default decorations and style.
    pub fn new() -> Self {
        Self {
            decorations: Decorations::default(),
            style: PlaneStyle::default(),
            circle_radius: 1.0,
        }
    }

    /// Use a different set of decorations.
    pub fn with_decorations(mut self, decorations: Decorations) -> Self {
        self.decorations = decorations;
        self
    }

    /// Use a different style.
    pub fn with_style(mut self, style: PlaneStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the reference circle radius, in plane units.
    pub fn with_circle_radius(mut self, radius: f64) -> Self {
        self.circle_radius = radius;
        self
    }

    /// Active decorations.
    pub fn decorations(&self) -> &Decorations {
        &self.decorations
    }

    /// Active style.
    pub fn style(&self) -> &PlaneStyle {
        &self.style
    }

    /// Reference circle radius in plane units.
    pub fn circle_radius(&self) -> f64 {
        self.circle_radius
    }

    fn text_style(&self, baseline: TextBaseline, align: TextAlign) -> TextStyle {
        TextStyle {
            color: self.style.label,
            font: self.style.font.clone(),
            baseline,
            align,
        }
    }

    fn guide_style(&self) -> LineStyle {
        LineStyle::solid(self.style.guide)
    }

    fn draw_circle(&self, frame: &Frame<'_>, surface: &mut dyn DrawingSurface) {
        if !self.decorations.circle {
            return;
        }
        let scale = frame.geometry.min_scale() * CIRCLE_MARGIN;
        let radius = (scale * self.circle_radius) as f32;
        surface.stroke_arc(
            &ArcSpec::circle(frame.geometry.origin, radius),
            &LineStyle::solid(self.style.circle),
        );
    }

    fn draw_axes(&self, frame: &Frame<'_>, surface: &mut dyn DrawingSurface) {
        let origin = frame.geometry.origin;
        let style = LineStyle::solid(self.style.axes).dashed(3.0, 3.0);
        if self.decorations.h_axis {
            surface.stroke_line(
                PixelPoint::new(0.0, origin.y),
                PixelPoint::new(frame.measurement.width, origin.y),
                &style,
            );
        }
        if self.decorations.v_axis {
            surface.stroke_line(
                PixelPoint::new(origin.x, 0.0),
                PixelPoint::new(origin.x, frame.measurement.height),
                &style,
            );
        }
    }

    fn draw_abs(&self, frame: &Frame<'_>, point: &TrackedPoint, surface: &mut dyn DrawingSurface) {
        let origin = frame.geometry.origin;
        let pixel = point.pixel;
        if self.decorations.abs_guide {
            surface.stroke_line(origin, pixel, &self.guide_style());
        }
        if self.decorations.abs_label {
            let baseline = if pixel.y > origin.y {
                TextBaseline::Top
            } else {
                TextBaseline::Ideographic
            };
            let dx = pixel.x - origin.x;
            let dy = pixel.y - origin.y;
            let halfway = (dx * dx + dy * dy).sqrt() / 2.0;
            surface.save();
            surface.translate(origin.x, origin.y);
            surface.rotate(-point.polar.arg);
            surface.translate(halfway, 0.0);
            if pixel.x < origin.x {
                surface.rotate(PI);
            }
            let text = format!("r = {}", self.style.format_number(point.polar.abs));
            surface.fill_text(
                &text,
                PixelPoint::new(0.0, 0.0),
                &self.text_style(baseline, TextAlign::Left),
            );
            surface.restore();
        }
    }

    fn draw_arg(&self, frame: &Frame<'_>, point: &TrackedPoint, surface: &mut dyn DrawingSurface) {
        let origin = frame.geometry.origin;
        let arg = point.polar.arg;
        if self.decorations.angle_marker {
            let marker = ArcSpec {
                center: origin,
                radius: ANGLE_MARKER_RADIUS,
                start_angle: 0.0,
                end_angle: -arg,
                anticlockwise: true,
            };
            surface.stroke_arc(&marker, &self.guide_style());
        }
        if self.decorations.arg_label {
            surface.save();
            surface.translate(origin.x, origin.y);
            surface.rotate(-0.9 * arg / 2.0);
            surface.translate(ARG_LABEL_DISTANCE, 0.0);
            surface.fill_text(
                "θ",
                PixelPoint::new(0.0, 0.0),
                &self.text_style(TextBaseline::Alphabetic, TextAlign::Left),
            );
            surface.restore();
        }
    }

    fn draw_h(&self, frame: &Frame<'_>, point: &TrackedPoint, surface: &mut dyn DrawingSurface) {
        let origin = frame.geometry.origin;
        let pixel = point.pixel;
        let height = frame.measurement.height;
        if self.decorations.h_guide {
            surface.stroke_line(PixelPoint::new(pixel.x, origin.y), pixel, &self.guide_style());
        }
        if self.decorations.h_label {
            let baseline = if origin.y < height / 2.0 {
                TextBaseline::Top
            } else {
                TextBaseline::Bottom
            };
            let (align, offset) = if pixel.x < origin.x {
                (TextAlign::Left, 3.0)
            } else {
                (TextAlign::Right, -3.0)
            };
            let mut y = origin.y - 2.0;
            if y <= 2.0 {
                y = 2.0;
            }
            if y >= height {
                y = height - 3.0;
            }
            let text = self.style.format_number(point.cartesian.x);
            surface.fill_text(
                &text,
                PixelPoint::new(pixel.x + offset, y),
                &self.text_style(baseline, align),
            );
        }
    }

    fn draw_v(&self, frame: &Frame<'_>, point: &TrackedPoint, surface: &mut dyn DrawingSurface) {
        let origin = frame.geometry.origin;
        let pixel = point.pixel;
        let width = frame.measurement.width;
        if self.decorations.v_guide {
            surface.stroke_line(PixelPoint::new(origin.x, pixel.y), pixel, &self.guide_style());
        }
        if self.decorations.v_label {
            let baseline = if pixel.y < origin.y {
                TextBaseline::Top
            } else {
                TextBaseline::Bottom
            };
            let mut x = origin.x + 4.0;
            if x <= 2.0 {
                x = 2.0;
            }
            if x >= width {
                x = width - self.style.decimal_places as f32 * 13.0;
            }
            let text = self.style.format_number(point.cartesian.y);
            surface.fill_text(
                &text,
                PixelPoint::new(x, pixel.y),
                &self.text_style(baseline, TextAlign::Left),
            );
        }
    }

    fn draw_point(&self, point: &TrackedPoint, surface: &mut dyn DrawingSurface) {
        if self.decorations.point {
            surface.fill_arc(
                &ArcSpec::circle(point.pixel, self.style.point_radius),
                self.style.point,
            );
        }
    }

    fn draw_polar_label(&self, point: &TrackedPoint, surface: &mut dyn DrawingSurface) {
        if !self.decorations.polar_label {
            return;
        }
        let arg = point.polar.arg;
        let tilt = arg.powf(1.1);
        let offset = (10.0 * arg + 8.0).min(30.0) as f32;
        surface.save();
        surface.translate(point.pixel.x, point.pixel.y);
        surface.rotate(-tilt);
        surface.translate(offset, 0.0);
        surface.rotate(tilt);
        let text = format!(
            "({}, {})",
            self.style.format_number(point.polar.abs),
            self.style.format_number(arg)
        );
        surface.fill_text(
            &text,
            PixelPoint::new(0.0, 0.0),
            &self.text_style(TextBaseline::Alphabetic, TextAlign::Left),
        );
        surface.restore();
    }
}

impl Default for AnnotatedPlane {
    fn default() -> Self {
        Self::new()
    }
}

impl Decorator for AnnotatedPlane {
    fn redraw(&self, frame: &Frame<'_>, surface: &mut dyn DrawingSurface) {
        surface.clear(frame.measurement.local_rect());
        self.draw_circle(frame, surface);
        self.draw_axes(frame, surface);
        let Some(point) = frame.point else {
            return;
        };
        self.draw_abs(frame, point, surface);
        self.draw_arg(frame, point, surface);
        self.draw_h(frame, point, surface);
        self.draw_v(frame, point, surface);
        self.draw_point(point, surface);
        self.draw_polar_label(point, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    use crate::interaction::Measurement;
    use crate::render::{RenderCommand, RenderList};
    use crate::transform::CoordinateMapper;
    use crate::view::{Bounds, Interval};

    fn paint(plane: &AnnotatedPlane, pixel: Option<PixelPoint>) -> RenderList {
        paint_window(plane, Bounds::default(), 500.0, 500.0, pixel)
    }

    fn paint_window(
        plane: &AnnotatedPlane,
        bounds: Bounds,
        width: f32,
        height: f32,
        pixel: Option<PixelPoint>,
    ) -> RenderList {
        let measurement = Measurement::at(PixelPoint::new(0.0, 0.0), width, height);
        let mapper = CoordinateMapper::new(bounds, width, height).unwrap();
        let point = pixel.map(|pixel| TrackedPoint::map(&mapper, pixel));
        let frame = Frame {
            measurement,
            geometry: mapper.geometry(),
            point: point.as_ref(),
        };
        let mut list = RenderList::new();
        plane.redraw(&frame, &mut list);
        list
    }

    fn texts(list: &RenderList) -> Vec<(&str, &TextStyle, PixelPoint)> {
        list.commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Text {
                    text,
                    style,
                    position,
                    ..
                } => Some((text.as_str(), style, *position)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn idle_frame_draws_circle_and_axes() {
        let list = paint(&AnnotatedPlane::new(), None);
        let commands = list.commands();
        assert_eq!(commands.len(), 4);
        assert!(matches!(commands[0], RenderCommand::Clear(_)));
        match &commands[1] {
            RenderCommand::Arc { arc, .. } => {
                assert_eq!(arc.center, PixelPoint::new(250.0, 250.0));
                assert!((arc.radius - 250.0 * 0.995).abs() < 1e-3);
            }
            other => panic!("unexpected command {other:?}"),
        }
        for command in &commands[2..] {
            match command {
                RenderCommand::Line { style, .. } => assert!(style.dash.is_some()),
                other => panic!("unexpected command {other:?}"),
            }
        }
    }

    #[test]
    fn default_pipeline_with_point() {
        let list = paint(&AnnotatedPlane::new(), Some(PixelPoint::new(375.0, 125.0)));
        // clear, circle, 2 axes, abs guide, marker, h guide + label, v guide + label, point
        assert_eq!(list.commands().len(), 11);
        assert!(matches!(
            list.commands().last(),
            Some(RenderCommand::FillArc { .. })
        ));
        let labels = texts(&list);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].0, "0.500");
        assert_eq!(labels[0].1.align, TextAlign::Right);
        assert_eq!(labels[0].2, PixelPoint::new(372.0, 248.0));
        assert_eq!(labels[1].0, "0.500");
        assert_eq!(labels[1].1.baseline, TextBaseline::Top);
        assert_eq!(labels[1].2, PixelPoint::new(254.0, 125.0));
    }

    #[test]
    fn disabled_stages_are_skipped() {
        let plane = AnnotatedPlane::new().with_decorations(Decorations::none());
        let list = paint(&plane, Some(PixelPoint::new(100.0, 100.0)));
        assert_eq!(list.commands().len(), 1);

        let only_point = Decorations {
            point: true,
            ..Decorations::none()
        };
        let list = paint(
            &AnnotatedPlane::new().with_decorations(only_point),
            Some(PixelPoint::new(100.0, 100.0)),
        );
        match &list.commands()[1] {
            RenderCommand::FillArc { arc, color } => {
                assert_eq!(arc.center, PixelPoint::new(100.0, 100.0));
                assert_eq!(arc.radius, 4.0);
                assert_eq!(*color, PlaneStyle::default().point);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn angle_marker_sweeps_to_point() {
        let only_marker = Decorations {
            angle_marker: true,
            ..Decorations::none()
        };
        // Straight up from the origin: arg is π/2.
        let list = paint(
            &AnnotatedPlane::new().with_decorations(only_marker),
            Some(PixelPoint::new(250.0, 0.0)),
        );
        match &list.commands()[1] {
            RenderCommand::Arc { arc, .. } => {
                assert_eq!(arc.radius, ANGLE_MARKER_RADIUS);
                assert!((arc.sweep() + FRAC_PI_2).abs() < 1e-9);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn abs_label_flips_left_of_origin() {
        let only_abs = Decorations {
            abs_label: true,
            ..Decorations::none()
        };
        let plane = AnnotatedPlane::new().with_decorations(only_abs);
        let list = paint(&plane, Some(PixelPoint::new(50.0, 250.0)));
        match &list.commands()[1] {
            RenderCommand::Text {
                text,
                position,
                rotation,
                style,
            } => {
                assert_eq!(text, "r = 0.800");
                assert!((position.x - 150.0).abs() < 1e-3);
                assert!((position.y - 250.0).abs() < 1e-3);
                // -π from the point's angle, then flipped by π.
                assert!(rotation.abs() < 1e-9);
                assert_eq!(style.baseline, TextBaseline::Ideographic);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn polar_label_shows_point_values() {
        let only_polar = Decorations {
            polar_label: true,
            ..Decorations::none()
        };
        let plane = AnnotatedPlane::new().with_decorations(only_polar);
        let list = paint(&plane, Some(PixelPoint::new(500.0, 250.0)));
        let labels = texts(&list);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].0, "(1.000, 0.000)");
        assert_eq!(labels[0].2, PixelPoint::new(508.0, 250.0));
    }

    fn bounds(h: (f64, f64), v: (f64, f64)) -> Bounds {
        Bounds::new(
            Interval::from_min_max(h.0, h.1).unwrap(),
            Interval::from_min_max(v.0, v.1).unwrap(),
        )
    }

    #[test]
    fn v_label_clamps_inside_surface() {
        let only_v = Decorations {
            v_label: true,
            ..Decorations::none()
        };
        let list = paint_window(
            &AnnotatedPlane::new().with_decorations(only_v),
            bounds((-3.0, -1.0), (-1.0, 1.0)),
            500.0,
            500.0,
            Some(PixelPoint::new(100.0, 400.0)),
        );
        let labels = texts(&list);
        assert_eq!(labels[0].2, PixelPoint::new(500.0 - 39.0, 400.0));
        assert_eq!(labels[0].1.baseline, TextBaseline::Bottom);
    }

    #[test]
    fn circle_uses_smaller_scale() {
        // 400x200 over [-1, 1]²: 200 px per unit across, 100 px per unit down.
        let list = paint_window(&AnnotatedPlane::new(), Bounds::default(), 400.0, 200.0, None);
        match &list.commands()[1] {
            RenderCommand::Arc { arc, .. } => {
                assert_eq!(arc.center, PixelPoint::new(200.0, 100.0));
                assert!((arc.radius - 99.5).abs() < 1e-3);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn arg_label_bisects_angle() {
        let only_arg = Decorations {
            arg_label: true,
            ..Decorations::none()
        };
        // (-0.5, -0.5): arg is 5π/4, so the label turns by -0.9 * 5π/8.
        let list = paint_window(
            &AnnotatedPlane::new().with_decorations(only_arg),
            Bounds::default(),
            400.0,
            200.0,
            Some(PixelPoint::new(100.0, 150.0)),
        );
        assert_eq!(list.commands().len(), 2);
        match &list.commands()[1] {
            RenderCommand::Text {
                text,
                position,
                rotation,
                style,
            } => {
                assert_eq!(text, "θ");
                assert!((position.x - 194.147).abs() < 1e-2);
                assert!((position.y - 70.576).abs() < 1e-2);
                assert!((rotation + 0.9 * 5.0 * PI / 8.0).abs() < 1e-6);
                assert_eq!(style.baseline, TextBaseline::Alphabetic);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn h_label_clamps_to_bottom_edge() {
        let only_h = Decorations {
            h_label: true,
            ..Decorations::none()
        };
        // v = [1, 3] puts the origin 250 px below the surface.
        let list = paint_window(
            &AnnotatedPlane::new().with_decorations(only_h),
            bounds((-1.0, 1.0), (1.0, 3.0)),
            500.0,
            500.0,
            Some(PixelPoint::new(100.0, 250.0)),
        );
        let labels = texts(&list);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].0, "-0.600");
        assert_eq!(labels[0].1.baseline, TextBaseline::Bottom);
        assert_eq!(labels[0].1.align, TextAlign::Left);
        assert_eq!(labels[0].2, PixelPoint::new(103.0, 497.0));
    }

    #[test]
    fn h_label_clamps_to_top_edge() {
        let only_h = Decorations {
            h_label: true,
            ..Decorations::none()
        };
        // v = [-3, -1] puts the origin 250 px above the surface.
        let list = paint_window(
            &AnnotatedPlane::new().with_decorations(only_h),
            bounds((-1.0, 1.0), (-3.0, -1.0)),
            500.0,
            500.0,
            Some(PixelPoint::new(400.0, 250.0)),
        );
        let labels = texts(&list);
        assert_eq!(labels[0].0, "0.600");
        assert_eq!(labels[0].1.baseline, TextBaseline::Top);
        assert_eq!(labels[0].1.align, TextAlign::Right);
        assert_eq!(labels[0].2, PixelPoint::new(397.0, 2.0));
    }

    #[test]
    fn abs_label_sits_halfway_along_guide() {
        let only_abs = Decorations {
            abs_label: true,
            ..Decorations::none()
        };
        let plane = AnnotatedPlane::new().with_decorations(only_abs);

        let list = paint(&plane, Some(PixelPoint::new(375.0, 125.0)));
        match &list.commands()[1] {
            RenderCommand::Text {
                text,
                position,
                rotation,
                style,
            } => {
                assert_eq!(text, "r = 0.707");
                assert!((position.x - 312.5).abs() < 1e-3);
                assert!((position.y - 187.5).abs() < 1e-3);
                assert!((rotation + PI / 4.0).abs() < 1e-9);
                assert_eq!(style.baseline, TextBaseline::Ideographic);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let list = paint(&plane, Some(PixelPoint::new(450.0, 250.0)));
        let labels = texts(&list);
        assert_eq!(labels[0].0, "r = 0.800");
        assert_eq!(labels[0].2, PixelPoint::new(350.0, 250.0));
    }
}
