use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use eframe::egui::{self, Context};
use tracing::warn;

use crate::engine::LayoutConfig;
use crate::graphs::{GraphKind, Language};
use crate::snapshot::{Snapshot, load_snapshot};

mod render_utils;
mod screen;
mod search;
mod ui;
mod view;

use screen::GraphScreen;

/// Startup choices taken from the command line.
#[derive(Clone, Debug)]
pub struct AppOptions {
    pub snapshot: Option<PathBuf>,
    pub screen: GraphKind,
    pub language: Option<Language>,
    pub refresh: Option<Duration>,
    pub layout: LayoutConfig,
}

pub struct KnowledgeOrbitApp {
    options: AppOptions,
    state: AppState,
    reload_rx: Option<Receiver<Result<Snapshot, String>>>,
    last_reload_secs: f64,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Snapshot, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    snapshot: Snapshot,
    layout_config: LayoutConfig,
    language: Language,
    screen: GraphScreen,
    search: String,
    refresh_error: Option<String>,
}

impl KnowledgeOrbitApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, options: AppOptions) -> Self {
        let state = Self::start_load(options.snapshot.clone());
        Self {
            options,
            state,
            reload_rx: None,
            last_reload_secs: 0.0,
        }
    }

    fn spawn_load(path: Option<PathBuf>) -> Receiver<Result<Snapshot, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = match path {
                Some(path) => load_snapshot(&path).map_err(|error| format!("{error:#}")),
                None => Ok(Snapshot::demo()),
            };
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(path: Option<PathBuf>) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(path),
        }
    }

    fn ready(options: &AppOptions, snapshot: Snapshot) -> AppState {
        let language = options.language.or(snapshot.language).unwrap_or_default();
        AppState::Ready(Box::new(ViewModel::new(
            snapshot,
            options.layout.clone(),
            options.screen,
            language,
        )))
    }

    fn refresh_due(&self, now: f64) -> bool {
        self.options.snapshot.is_some()
            && self.reload_rx.is_none()
            && self
                .options
                .refresh
                .is_some_and(|interval| now - self.last_reload_secs >= interval.as_secs_f64())
    }
}

impl eframe::App for KnowledgeOrbitApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let now = ctx.input(|input| input.time);
        let refresh_due = self.refresh_due(now);

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(snapshot)) => transition = Some(Self::ready(&self.options, snapshot)),
                    Ok(Err(error)) => transition = Some(AppState::Error(error)),
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error(
                            "Background load worker disconnected".to_owned(),
                        ));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading snapshot...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load snapshot");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.options.snapshot.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut reload_requested, is_reloading);

                if (reload_requested || refresh_due) && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.options.snapshot.clone()));
                    self.last_reload_secs = now;
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(snapshot)) => model.replace_snapshot(snapshot),
                        Ok(Err(error)) => {
                            warn!(%error, "snapshot refresh failed, keeping previous data");
                            model.refresh_error = Some(error);
                        }
                        Err(TryRecvError::Empty) => self.reload_rx = Some(rx),
                        Err(TryRecvError::Disconnected) => {
                            model.refresh_error =
                                Some("Background load worker disconnected".to_owned());
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.last_reload_secs = now;
            self.state = next_state;
        }

        if self.reload_rx.is_some() || matches!(self.state, AppState::Loading { .. }) {
            ctx.request_repaint_after(Duration::from_millis(100));
        } else if let Some(interval) = self.options.refresh {
            ctx.request_repaint_after(interval);
        }
    }
}
