use eframe::egui::{self, Align, Color32, Context, Layout};
use tracing::info;

use crate::engine::LayoutConfig;
use crate::graphs::{GraphKind, Language, build_graph};
use crate::snapshot::Snapshot;

use super::super::ViewModel;
use super::super::screen::GraphScreen;

impl ViewModel {
    pub(in crate::app) fn new(
        snapshot: Snapshot,
        layout_config: LayoutConfig,
        kind: GraphKind,
        language: Language,
    ) -> Self {
        let input = build_graph(kind, &snapshot, language, &layout_config);
        Self {
            screen: GraphScreen::new(kind, input),
            snapshot,
            layout_config,
            language,
            search: String::new(),
            refresh_error: None,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(self.snapshot.product.as_str());
                    ui.separator();
                    ui.label(self.screen.kind().title(self.language));
                    ui.label(format!("roles: {}", self.snapshot.roles.len()));
                    ui.label(format!("nodes: {}", self.screen.layout().nodes.len()));
                    ui.label(format!("edges: {}", self.screen.layout().edges.len()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload snapshot"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if is_loading {
                            ui.spinner();
                        }
                        if let Some(error) = &self.refresh_error {
                            ui.colored_label(Color32::from_rgb(230, 120, 100), "refresh failed")
                                .on_hover_text(error.as_str());
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }

    pub(in crate::app) fn replace_snapshot(&mut self, snapshot: Snapshot) {
        info!(roles = snapshot.roles.len(), "snapshot replaced");
        self.snapshot = snapshot;
        self.refresh_error = None;
        self.rebuild_input();
    }

    pub(in crate::app) fn switch_screen(&mut self, kind: GraphKind) {
        if self.screen.kind() == kind {
            return;
        }

        self.screen.teardown();
        let input = build_graph(kind, &self.snapshot, self.language, &self.layout_config);
        self.screen = GraphScreen::new(kind, input);
        self.search.clear();
    }

    pub(in crate::app) fn switch_language(&mut self, language: Language) {
        if self.language == language {
            return;
        }

        self.language = language;
        self.rebuild_input();
    }

    fn rebuild_input(&mut self) {
        let input = build_graph(
            self.screen.kind(),
            &self.snapshot,
            self.language,
            &self.layout_config,
        );
        self.screen.replace_input(input);
    }
}
