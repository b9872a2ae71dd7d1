use super::interaction::Emphasis;
use super::model::{EntityKind, Facet, Layer, Layout, LayoutNode, RelationKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeStyle {
    Solid,
    Dotted,
    Dashed,
    DashedMuted,
}

impl StrokeStyle {
    pub fn for_kind(kind: RelationKind) -> Self {
        match kind {
            RelationKind::Structural => Self::Solid,
            RelationKind::Derived => Self::Dotted,
            RelationKind::Cross => Self::Dashed,
            RelationKind::Backbone => Self::DashedMuted,
        }
    }
}

/// Fill identity of a node; the host maps each role to a colour or gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FillRole {
    Hub,
    Primary,
    Secondary(Layer),
}

impl FillRole {
    pub fn for_node(node: &LayoutNode) -> Self {
        match node.kind() {
            EntityKind::Hub => Self::Hub,
            EntityKind::Primary => Self::Primary,
            EntityKind::Secondary => Self::Secondary(node.entity.layer),
        }
    }
}

impl Emphasis {
    pub fn opacity(self) -> f32 {
        match self {
            Self::Normal => 0.85,
            Self::Emphasized => 1.0,
            Self::Dimmed => 0.18,
        }
    }

    pub fn stroke_multiplier(self) -> f32 {
        match self {
            Self::Normal => 1.0,
            Self::Emphasized => 1.8,
            Self::Dimmed => 0.6,
        }
    }
}

const EDGE_BASE_WIDTH: f32 = 0.8;
const EDGE_WEIGHT_WIDTH: f32 = 2.6;

pub fn edge_stroke_width(weight: f64, emphasis: Emphasis) -> f32 {
    let weight = if weight.is_finite() {
        weight.clamp(0.0, 1.0) as f32
    } else {
        0.0
    };
    (EDGE_BASE_WIDTH + weight * EDGE_WEIGHT_WIDTH) * emphasis.stroke_multiplier()
}

/// Cuts `label` to at most `budget` characters, ending with an ellipsis when shortened.
pub fn truncate_label(label: &str, budget: usize) -> String {
    if label.chars().count() <= budget {
        return label.to_owned();
    }
    if budget == 0 {
        return String::new();
    }

    let mut truncated = label.chars().take(budget - 1).collect::<String>();
    truncated.truncate(truncated.trim_end().len());
    truncated.push('…');
    truncated
}

#[derive(Clone, Debug, PartialEq)]
pub enum PanelBody {
    Hub {
        primary_count: usize,
        secondary_count: usize,
        total_magnitude: f64,
    },
    Primary {
        magnitude: f64,
        facets: Vec<Facet>,
        linked_secondaries: Vec<String>,
        cross_links: Vec<String>,
    },
    Secondary {
        layer: Layer,
        metric: f64,
        owners: Vec<String>,
    },
}

/// Content of the detail panel for the selected node.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailPanel {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub body: PanelBody,
}

impl DetailPanel {
    pub fn for_node(layout: &Layout, id: &str) -> Option<Self> {
        let node = layout.node(id)?;
        let label_of = |other: &str| {
            layout
                .node(other)
                .map(|node| node.entity.label.clone())
                .unwrap_or_else(|| other.to_owned())
        };

        let body = match node.kind() {
            EntityKind::Hub => PanelBody::Hub {
                primary_count: count_kind(layout, EntityKind::Primary),
                secondary_count: count_kind(layout, EntityKind::Secondary),
                total_magnitude: layout
                    .nodes
                    .iter()
                    .filter(|node| node.kind() == EntityKind::Primary)
                    .map(|node| node.entity.clamped_magnitude())
                    .sum(),
            },
            EntityKind::Primary => {
                let mut linked_secondaries = Vec::new();
                let mut cross_links = Vec::new();
                for edge in layout.edges_touching(id) {
                    let other = if edge.source() == id {
                        edge.target()
                    } else {
                        edge.source()
                    };
                    match edge.kind() {
                        RelationKind::Derived => linked_secondaries.push(label_of(other)),
                        RelationKind::Cross => cross_links.push(label_of(other)),
                        RelationKind::Structural | RelationKind::Backbone => {}
                    }
                }
                PanelBody::Primary {
                    magnitude: node.entity.clamped_magnitude(),
                    facets: node.entity.facets.clone(),
                    linked_secondaries,
                    cross_links,
                }
            }
            EntityKind::Secondary => PanelBody::Secondary {
                layer: node.entity.layer,
                metric: node.entity.clamped_magnitude(),
                owners: layout
                    .edges_touching(id)
                    .filter(|edge| edge.kind() == RelationKind::Derived)
                    .map(|edge| {
                        if edge.source() == id {
                            label_of(edge.target())
                        } else {
                            label_of(edge.source())
                        }
                    })
                    .collect(),
            },
        };

        Some(Self {
            id: id.to_owned(),
            title: node.entity.label.clone(),
            subtitle: node.entity.sublabel.clone(),
            body,
        })
    }
}

fn count_kind(layout: &Layout, kind: EntityKind) -> usize {
    layout.nodes.iter().filter(|node| node.kind() == kind).count()
}
