use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::Snapshot;

pub fn parse_snapshot(raw: &str) -> Result<Snapshot> {
    let snapshot: Snapshot = serde_json::from_str(raw).context("invalid snapshot JSON")?;
    snapshot.validate().context("snapshot failed validation")?;
    Ok(snapshot)
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot =
        parse_snapshot(&raw).with_context(|| format!("failed to load snapshot {}", path.display()))?;

    info!(
        path = %path.display(),
        roles = snapshot.roles.len(),
        session_links = snapshot.shared_sessions.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}
