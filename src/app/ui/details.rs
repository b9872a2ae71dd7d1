use eframe::egui::{self, RichText, Ui};

use crate::engine::{DetailPanel, InteractionEvent, PanelBody};
use crate::graphs::layer_name;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let Some(selected_id) = self.screen.interaction().selected.clone() else {
            ui.label("Click a node to see its details.");
            return;
        };

        let Some(panel) = DetailPanel::for_node(self.screen.layout(), &selected_id) else {
            ui.label("The selected node is not in the current graph.");
            if ui.button("Clear selection").clicked() {
                self.screen.apply(InteractionEvent::ClearSelection);
            }
            return;
        };

        let mut close = false;
        ui.horizontal(|ui| {
            ui.label(RichText::new(panel.title.as_str()).strong());
            close = ui.small_button("✕").on_hover_text("Close").clicked();
        });
        if let Some(subtitle) = &panel.subtitle {
            ui.small(subtitle.as_str());
        }
        ui.add_space(6.0);

        match &panel.body {
            PanelBody::Hub {
                primary_count,
                secondary_count,
                total_magnitude,
            } => {
                ui.label(format!("Primary nodes: {primary_count}"));
                ui.label(format!("Outer nodes: {secondary_count}"));
                ui.label(format!("Total: {total_magnitude}"));
            }
            PanelBody::Primary {
                magnitude,
                facets,
                linked_secondaries,
                cross_links,
            } => {
                ui.label(format!("Total: {magnitude}"));
                ui.separator();
                for facet in facets {
                    ui.label(format!("{}: {}", facet.label, facet.value));
                }
                ui.separator();
                ui.label(format!("Linked outer nodes: {}", linked_secondaries.len()));
                ui.label(format!("Cross links: {}", cross_links.len()));
                egui::ScrollArea::vertical()
                    .id_salt("linked_nodes_scroll")
                    .max_height(240.0)
                    .show(ui, |ui| {
                        for label in linked_secondaries.iter().chain(cross_links) {
                            ui.label(format!("- {label}"));
                        }
                    });
            }
            PanelBody::Secondary {
                layer,
                metric,
                owners,
            } => {
                ui.label(layer_name(self.screen.kind(), *layer, self.language));
                ui.label(format!("Metric: {metric}"));
                ui.separator();
                ui.label(RichText::new(format!("Linked to {}", owners.len())).strong());
                for owner in owners {
                    ui.label(format!("- {owner}"));
                }
            }
        }

        if close {
            self.screen.apply(InteractionEvent::ClearSelection);
        }
    }
}
