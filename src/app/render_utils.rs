use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};

use crate::engine::{Emphasis, FillRole, Layer, StrokeStyle};

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let opacity = opacity.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as f32 * opacity) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = 56.0;
    let grid = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + (rect.width() / 2.0).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], grid);
        x += step;
    }

    let mut y = rect.top() + (rect.height() / 2.0).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], grid);
        y += step;
    }
}

pub(super) fn fill_color(role: FillRole) -> Color32 {
    match role {
        FillRole::Hub => Color32::from_rgb(236, 190, 92),
        FillRole::Primary => Color32::from_rgb(88, 166, 232),
        FillRole::Secondary(Layer::Markers) => Color32::from_rgb(154, 120, 230),
        FillRole::Secondary(Layer::Satellites) => Color32::from_rgb(96, 200, 160),
        FillRole::Secondary(_) => Color32::from_rgb(150, 160, 172),
    }
}

pub(super) fn edge_color(style: StrokeStyle) -> Color32 {
    match style {
        StrokeStyle::Solid => Color32::from_rgb(120, 150, 180),
        StrokeStyle::Dotted => Color32::from_rgb(110, 190, 160),
        StrokeStyle::Dashed => Color32::from_rgb(226, 132, 110),
        StrokeStyle::DashedMuted => Color32::from_rgb(96, 104, 116),
    }
}

/// Text colour for a label drawn on top of a node with the given emphasis.
pub(super) fn label_color(emphasis: Emphasis) -> Color32 {
    let base = Color32::from_rgb(214, 222, 232);
    match emphasis {
        Emphasis::Emphasized => Color32::WHITE,
        Emphasis::Normal => base,
        Emphasis::Dimmed => with_opacity(base, emphasis.opacity()),
    }
}
