//! The two screens built on the radial engine.

pub mod connections;
mod labels;
pub mod role_memory;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::engine::{Entity, Layer, LayerSet, LayoutConfig, Relation};
use crate::snapshot::Snapshot;

pub use labels::{Concept, Language, Term, layer_name, term};

pub const HUB_ID: &str = "hub";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GraphKind {
    #[default]
    RoleMemory,
    Connections,
}

impl GraphKind {
    pub const ALL: [GraphKind; 2] = [GraphKind::RoleMemory, GraphKind::Connections];

    pub fn title(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::RoleMemory, Language::En) => "Role Memory",
            (Self::RoleMemory, Language::Zh) => "角色记忆图",
            (Self::Connections, Language::En) => "Connections",
            (Self::Connections, Language::Zh) => "关联图",
        }
    }

    /// Layers this screen offers for toggling.
    pub fn layers(self) -> LayerSet {
        match self {
            Self::RoleMemory => [Layer::Primary, Layer::Markers, Layer::Satellites, Layer::Cross]
                .into_iter()
                .collect(),
            Self::Connections => [Layer::Primary, Layer::Satellites, Layer::Backbone]
                .into_iter()
                .collect(),
        }
    }
}

/// Everything one layout pass needs besides the active layers and viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphInput {
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
    pub config: LayoutConfig,
}

pub fn build_graph(
    kind: GraphKind,
    snapshot: &Snapshot,
    language: Language,
    config: &LayoutConfig,
) -> GraphInput {
    match kind {
        GraphKind::RoleMemory => role_memory::build(snapshot, language, config),
        GraphKind::Connections => connections::build(snapshot, language, config),
    }
}

pub(crate) fn hub_entity(snapshot: &Snapshot) -> Entity {
    Entity::hub(HUB_ID, snapshot.product.clone())
}
