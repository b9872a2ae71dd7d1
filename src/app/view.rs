use eframe::egui::{self, Align2, FontId, Pos2, Sense, Shape, Stroke, Ui, pos2};

use crate::engine::{
    Emphasis, EntityKind, FillRole, InteractionEvent, StrokeStyle, edge_stroke_width,
    truncate_label,
};

use super::ViewModel;
use super::render_utils::{
    blend_color, draw_background, edge_color, fill_color, label_color, with_opacity,
};

impl ViewModel {
    pub(super) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        self.screen
            .observe_viewport(rect.width() as f64, rect.height() as f64);
        self.screen.ensure_layout();

        let origin = rect.left_top();
        let pointer = response
            .hover_pos()
            .map(|pos| ((pos.x - origin.x) as f64, (pos.y - origin.y) as f64));
        self.screen.pointer_moved(pointer);

        if response.clicked() {
            let event = match self.screen.interaction().hovered.clone() {
                Some(id) => InteractionEvent::Click(id),
                None => InteractionEvent::ClearSelection,
            };
            self.screen.apply(event);
        }

        let to_screen = |x: f64, y: f64| pos2(origin.x + x as f32, origin.y + y as f32);
        let layout = self.screen.layout();
        let emphasis = self.screen.emphasis();
        let label_budget = self.screen.input().config.label_budget;

        for (index, edge) in layout.edges.iter().enumerate() {
            let edge_emphasis = emphasis.edge(index);
            let style = StrokeStyle::for_kind(edge.kind());
            let color = with_opacity(edge_color(style), edge_emphasis.opacity());
            let width = edge_stroke_width(edge.relation.weight, edge_emphasis);
            let points = [to_screen(edge.x1, edge.y1), to_screen(edge.x2, edge.y2)];

            match style {
                StrokeStyle::Solid => {
                    painter.line_segment(points, Stroke::new(width, color));
                }
                StrokeStyle::Dotted => {
                    painter.extend(Shape::dotted_line(&points, color, 6.0, width * 0.6));
                }
                StrokeStyle::Dashed | StrokeStyle::DashedMuted => {
                    painter.extend(Shape::dashed_line(
                        &points,
                        Stroke::new(width, color),
                        7.0,
                        5.0,
                    ));
                }
            }
        }

        let selected = self.screen.interaction().selected.as_deref();
        for (index, node) in layout.nodes.iter().enumerate() {
            let node_emphasis = emphasis.node(index);
            let center = to_screen(node.x, node.y);
            let radius = node.r as f32;
            let base = fill_color(FillRole::for_node(node));
            let fill = match node_emphasis {
                Emphasis::Emphasized => blend_color(base, egui::Color32::WHITE, 0.18),
                _ => with_opacity(base, node_emphasis.opacity()),
            };

            painter.circle_filled(center, radius, fill);
            if selected == Some(node.id()) {
                painter.circle_stroke(center, radius + 3.0, Stroke::new(2.0, egui::Color32::WHITE));
            }

            draw_node_label(
                &painter,
                center,
                radius,
                node.kind(),
                &truncate_label(&node.entity.label, label_budget),
                label_color(node_emphasis),
            );
        }

        if response.hovered() && self.screen.interaction().hovered.is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
    }
}

fn draw_node_label(
    painter: &egui::Painter,
    center: Pos2,
    radius: f32,
    kind: EntityKind,
    text: &str,
    color: egui::Color32,
) {
    match kind {
        EntityKind::Hub => {
            painter.text(center, Align2::CENTER_CENTER, text, FontId::proportional(13.0), color);
        }
        EntityKind::Primary => {
            painter.text(
                pos2(center.x, center.y + radius + 4.0),
                Align2::CENTER_TOP,
                text,
                FontId::proportional(12.0),
                color,
            );
        }
        EntityKind::Secondary => {
            painter.text(
                pos2(center.x, center.y + radius + 2.0),
                Align2::CENTER_TOP,
                text,
                FontId::proportional(10.0),
                color,
            );
        }
    }
}
