use gpui::{
    App, BorderStyle, Bounds, Corners, Edges, PathBuilder, Pixels, Point, TextRun, Window, font,
    point, px, quad,
};

use crate::geom::PixelPoint;
use crate::render::{
    ArcSpec, Color, LineStyle, RenderCommand, RenderList, TextAlign, TextBaseline, TextStyle,
    dash_segments, flatten_arc,
};

/// Replays a render list at `origin`, converting device pixels back to
/// logical pixels with the list's resolution.
pub(crate) fn paint_list(list: &RenderList, origin: Point<Pixels>, window: &mut Window, cx: &mut App) {
    let mapping = Mapping {
        origin,
        resolution: list.resolution().max(f32::EPSILON),
    };
    for command in list.commands() {
        match command {
            // Frames start empty.
            RenderCommand::Clear(_) => {}
            RenderCommand::Line { start, end, style } => {
                paint_polyline(window, &mapping, &[*start, *end], style);
            }
            RenderCommand::Arc { arc, style } => {
                paint_polyline(window, &mapping, &flatten_arc(arc), style);
            }
            RenderCommand::FillArc { arc, color } => {
                paint_sector(window, &mapping, arc, *color);
            }
            RenderCommand::Text {
                position,
                text,
                style,
                ..
            } => {
                paint_text(window, cx, &mapping, *position, text, style);
            }
        }
    }
}

struct Mapping {
    origin: Point<Pixels>,
    resolution: f32,
}

impl Mapping {
    fn point(&self, p: PixelPoint) -> Point<Pixels> {
        point(
            self.origin.x + px(p.x / self.resolution),
            self.origin.y + px(p.y / self.resolution),
        )
    }

    fn length(&self, value: f32) -> f32 {
        value / self.resolution
    }
}

fn paint_polyline(window: &mut Window, mapping: &Mapping, points: &[PixelPoint], style: &LineStyle) {
    if points.len() < 2 {
        return;
    }
    let width = mapping.length(style.width).max(0.5);
    let mut builder = PathBuilder::stroke(px(width));
    match style.dash {
        Some(dash) => {
            for pair in points.windows(2) {
                for (start, end) in dash_segments(pair[0], pair[1], dash) {
                    builder.move_to(mapping.point(start));
                    builder.line_to(mapping.point(end));
                }
            }
        }
        None => {
            builder.move_to(mapping.point(points[0]));
            for p in &points[1..] {
                builder.line_to(mapping.point(*p));
            }
        }
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn paint_sector(window: &mut Window, mapping: &Mapping, arc: &ArcSpec, color: Color) {
    if arc.is_full_circle() {
        let center = mapping.point(arc.center);
        let radius = px(mapping.length(arc.radius));
        let bounds = Bounds::from_corners(
            point(center.x - radius, center.y - radius),
            point(center.x + radius, center.y + radius),
        );
        window.paint_quad(quad(
            bounds,
            Corners::all(radius),
            to_rgba(color),
            Edges::all(px(0.0)),
            to_rgba(color),
            BorderStyle::default(),
        ));
        return;
    }
    let mut builder = PathBuilder::fill();
    builder.move_to(mapping.point(arc.center));
    for p in flatten_arc(arc) {
        builder.line_to(mapping.point(p));
    }
    builder.line_to(mapping.point(arc.center));
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(color));
    }
}

/// Text is anchored like a canvas context anchors it. Runs are painted
/// upright; the recorded rotation only moves the anchor.
fn paint_text(
    window: &mut Window,
    cx: &mut App,
    mapping: &Mapping,
    position: PixelPoint,
    text: &str,
    style: &TextStyle,
) {
    if text.is_empty() {
        return;
    }
    let font_size = px(mapping.length(style.font.size));
    let run = TextRun {
        len: text.len(),
        font: font(style.font.family.clone()),
        color: to_hsla(style.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), font_size, &[run], None);
    let line_height = shaped.ascent + shaped.descent;
    let anchor = mapping.point(position);
    let x = match style.align {
        TextAlign::Left => anchor.x,
        TextAlign::Center => anchor.x - shaped.width * 0.5,
        TextAlign::Right => anchor.x - shaped.width,
    };
    let y = match style.baseline {
        TextBaseline::Top => anchor.y,
        TextBaseline::Middle => anchor.y - line_height * 0.5,
        TextBaseline::Alphabetic => anchor.y - shaped.ascent,
        TextBaseline::Ideographic | TextBaseline::Bottom => anchor.y - line_height,
    };
    let _ = shaped.paint(point(x, y), line_height, window, cx);
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}
