use eframe::egui::{Key, Ui};

use crate::engine::{InteractionEvent, truncate_label};
use crate::graphs::{GraphKind, Language, layer_name};

use super::super::ViewModel;
use super::super::search::search_nodes;

const SEARCH_RESULTS: usize = 8;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Graph Controls");
        ui.separator();
        ui.add_space(4.0);

        let mut next_kind = self.screen.kind();
        ui.horizontal_wrapped(|ui| {
            for kind in GraphKind::ALL {
                ui.selectable_value(&mut next_kind, kind, kind.title(self.language));
            }
        });
        self.switch_screen(next_kind);

        let mut next_language = self.language;
        ui.horizontal(|ui| {
            for language in [Language::En, Language::Zh] {
                ui.selectable_value(&mut next_language, language, language.label());
            }
        });
        self.switch_language(next_language);

        ui.separator();
        ui.label("Layers");
        let kind = self.screen.kind();
        let layers = self
            .screen
            .interaction()
            .available_layers()
            .iter()
            .collect::<Vec<_>>();
        for layer in layers {
            let mut active = self.screen.interaction().active_layers.contains(layer);
            if ui
                .checkbox(&mut active, layer_name(kind, layer, self.language))
                .changed()
            {
                self.screen.apply(InteractionEvent::ToggleLayer(layer));
            }
        }

        ui.separator();
        ui.label("Find node")
            .on_hover_text("Fuzzy match on node labels; Enter selects the best match.");
        let search_response = ui.text_edit_singleline(&mut self.search);
        let submitted =
            search_response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter));

        let label_budget = self.screen.input().config.label_budget * 2;
        let mut chosen = None;
        {
            let layout = self.screen.layout();
            let matches = search_nodes(layout, &self.search, SEARCH_RESULTS);
            if submitted {
                chosen = matches.first().map(|id| (*id).to_owned());
            }
            for id in matches {
                let Some(node) = layout.node(id) else {
                    continue;
                };
                if ui
                    .link(truncate_label(&node.entity.label, label_budget))
                    .on_hover_text(id)
                    .clicked()
                {
                    chosen = Some(id.to_owned());
                }
            }
        }

        if let Some(id) = chosen {
            self.screen.select(&id);
        }
    }
}
