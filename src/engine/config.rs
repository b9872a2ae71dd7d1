use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Data-independent edge between two known primary ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackboneEdge {
    pub source: String,
    pub target: String,
    #[serde(default = "default_backbone_weight")]
    pub weight: f64,
}

impl BackboneEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

fn default_backbone_weight() -> f64 {
    0.6
}

/// Tunable constants of one layout pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Primary ring radius as a fraction of half the shorter viewport side.
    pub primary_ring: f64,
    /// Secondary ring radius as a multiple of the primary ring radius.
    pub secondary_ring: f64,
    pub hub_radius: f64,
    pub primary_r_min: f64,
    pub primary_r_max: f64,
    pub secondary_r_min: f64,
    pub secondary_r_max: f64,
    pub orbit_gap: f64,
    pub orbit_angle: f64,
    pub label_budget: usize,
    pub top_roles: usize,
    #[serde(skip)]
    pub backbone: Vec<BackboneEdge>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            primary_ring: 0.62,
            secondary_ring: 1.35,
            hub_radius: 34.0,
            primary_r_min: 11.0,
            primary_r_max: 24.0,
            secondary_r_min: 5.0,
            secondary_r_max: 12.0,
            orbit_gap: 20.0,
            orbit_angle: 0.35,
            label_budget: 14,
            top_roles: 6,
            backbone: Vec::new(),
        }
    }
}

impl LayoutConfig {
    pub fn with_backbone(mut self, backbone: Vec<BackboneEdge>) -> Self {
        self.backbone = backbone;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.primary_ring,
            self.secondary_ring,
            self.hub_radius,
            self.primary_r_min,
            self.primary_r_max,
            self.secondary_r_min,
            self.secondary_r_max,
            self.orbit_gap,
            self.orbit_angle,
        ];
        if finite.iter().any(|value| !value.is_finite()) {
            bail!("layout constants must be finite numbers");
        }
        if self.primary_ring <= 0.0 || self.primary_ring > 1.0 {
            bail!(
                "primary_ring must be within (0, 1], got {}",
                self.primary_ring
            );
        }
        if self.secondary_ring <= 1.0 {
            bail!(
                "secondary_ring must be greater than 1, got {}",
                self.secondary_ring
            );
        }
        if self.primary_r_min < 0.0 || self.primary_r_min > self.primary_r_max {
            bail!(
                "primary radius range is invalid: {}..{}",
                self.primary_r_min,
                self.primary_r_max
            );
        }
        if self.secondary_r_min < 0.0 || self.secondary_r_min > self.secondary_r_max {
            bail!(
                "secondary radius range is invalid: {}..{}",
                self.secondary_r_min,
                self.secondary_r_max
            );
        }
        if self.label_budget == 0 {
            bail!("label_budget must be at least 1");
        }
        Ok(())
    }
}

/// Reads layout constants from a JSON file; absent keys keep their defaults.
pub fn load_layout_config(path: &Path) -> Result<LayoutConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read layout config {}", path.display()))?;
    let config: LayoutConfig = serde_json::from_str(&raw)
        .with_context(|| format!("invalid layout config JSON in {}", path.display()))?;
    if let Err(error) = config.validate() {
        warn!(path = %path.display(), %error, "layout config rejected");
        return Err(error.context(format!("rejected layout config {}", path.display())));
    }

    info!(path = %path.display(), "layout config loaded");
    Ok(config)
}
