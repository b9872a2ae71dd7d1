use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::Parser;
use knowledge_orbit::app::{AppOptions, KnowledgeOrbitApp};
use knowledge_orbit::engine::{LayoutConfig, load_layout_config};
use knowledge_orbit::graphs::{GraphKind, Language};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Snapshot JSON file; the built-in demo is shown when omitted.
    #[arg(long)]
    snapshot: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = GraphKind::RoleMemory)]
    screen: GraphKind,
    /// Overrides the language stored in the snapshot.
    #[arg(long, value_enum)]
    language: Option<Language>,
    /// Reload the snapshot file every N seconds.
    #[arg(long)]
    refresh_secs: Option<u64>,
    #[arg(long)]
    layout_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let layout = match &args.layout_config {
        Some(path) => load_layout_config(path)?,
        None => LayoutConfig::default(),
    };
    let options = AppOptions {
        snapshot: args.snapshot,
        screen: args.screen,
        language: args.language,
        refresh: args
            .refresh_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs),
        layout,
    };

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "knowledge-orbit",
        native_options,
        Box::new(move |cc| Ok(Box::new(KnowledgeOrbitApp::new(cc, options)))),
    )
    .map_err(|error| anyhow!("failed to start viewer: {error}"))
}
