//! Knob painter.
//!
//! Draw order: range arc, body, indicator dot, then the drag glow on top,
//! followed by the name and value labels.

use crate::geometry::{ARC_STROKE_WIDTH, KnobGeometry, Point, Rect};
use crate::theme::Theme;
use egui::{Align2, Color32, FontId, Painter, Pos2, Stroke, pos2, vec2};

const ARC_SEGMENTS: usize = 48;

fn to_screen(origin: Pos2, p: Point) -> Pos2 {
    origin + vec2(p.x, p.y)
}

fn rect_center(origin: Pos2, r: &Rect) -> Pos2 {
    to_screen(origin, r.center())
}

/// Paint a knob whose geometry is in surface coordinates relative to `origin`.
pub fn paint_knob(
    painter: &Painter,
    origin: Pos2,
    geometry: &KnobGeometry,
    label: &str,
    value_text: &str,
    dragging: bool,
    theme: &Theme,
) {
    let center = to_screen(origin, geometry.center);

    draw_arc(
        painter,
        center,
        geometry.arc_radius,
        geometry.arc_start(),
        geometry.arc_end(),
        theme.arc,
        ARC_STROKE_WIDTH,
    );

    painter.circle_filled(center, geometry.radius, theme.knob_body);
    painter.circle_filled(
        to_screen(origin, geometry.indicator),
        geometry.indicator_radius,
        theme.indicator,
    );

    if dragging {
        painter.circle_filled(center, geometry.glow_radius, theme.drag_glow);
    }

    let font = FontId::proportional(theme.font_size);
    painter.text(
        rect_center(origin, &geometry.label_rect),
        Align2::CENTER_CENTER,
        label,
        font.clone(),
        theme.label,
    );
    painter.text(
        rect_center(origin, &geometry.value_rect),
        Align2::CENTER_CENTER,
        value_text,
        font,
        theme.value,
    );
}

/// Draw an arc using line segments.
pub fn draw_arc(
    painter: &Painter,
    center: Pos2,
    radius: f32,
    start_angle: f32,
    end_angle: f32,
    color: Color32,
    stroke_width: f32,
) {
    let sweep = end_angle - start_angle;

    let points: Vec<Pos2> = (0..=ARC_SEGMENTS)
        .map(|i| {
            let t = i as f32 / ARC_SEGMENTS as f32;
            let angle = start_angle + t * sweep;
            pos2(
                center.x + angle.cos() * radius,
                center.y + angle.sin() * radius,
            )
        })
        .collect();

    for window in points.windows(2) {
        painter.line_segment([window[0], window[1]], Stroke::new(stroke_width, color));
    }
}
