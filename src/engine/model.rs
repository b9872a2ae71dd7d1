use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Hub,
    Primary,
    Secondary,
}

/// Togglable category an entity or relation belongs to.
///
/// `Hub` is never filtered out; every other layer can be switched off,
/// which removes its members from the next layout pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Hub,
    Primary,
    Markers,
    Satellites,
    Cross,
    Backbone,
}

impl Layer {
    pub const TOGGLABLE: [Layer; 5] = [
        Layer::Primary,
        Layer::Markers,
        Layer::Satellites,
        Layer::Cross,
        Layer::Backbone,
    ];
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerSet {
    layers: BTreeSet<Layer>,
}

impl LayerSet {
    pub fn all() -> Self {
        Self {
            layers: Layer::TOGGLABLE.into_iter().collect(),
        }
    }

    pub fn none() -> Self {
        Self {
            layers: BTreeSet::new(),
        }
    }

    pub fn contains(&self, layer: Layer) -> bool {
        layer == Layer::Hub || self.layers.contains(&layer)
    }

    pub fn insert(&mut self, layer: Layer) {
        if layer != Layer::Hub {
            self.layers.insert(layer);
        }
    }

    pub fn remove(&mut self, layer: Layer) {
        self.layers.remove(&layer);
    }

    /// Flips membership and reports whether the set changed.
    pub fn toggle(&mut self, layer: Layer) -> bool {
        if layer == Layer::Hub {
            return false;
        }
        if !self.layers.remove(&layer) {
            self.layers.insert(layer);
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = Layer> + '_ {
        self.layers.iter().copied()
    }
}

impl Default for LayerSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Layer> for LayerSet {
    fn from_iter<T: IntoIterator<Item = Layer>>(iter: T) -> Self {
        let mut set = Self::none();
        for layer in iter {
            set.insert(layer);
        }
        set
    }
}

/// Labelled value shown in the detail panel of a node.
#[derive(Clone, Debug, PartialEq)]
pub struct Facet {
    pub label: String,
    pub value: f64,
}

impl Facet {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: String,
    pub kind: EntityKind,
    pub layer: Layer,
    pub label: String,
    pub sublabel: Option<String>,
    pub magnitude: f64,
    pub group_key: Option<String>,
    pub facets: Vec<Facet>,
}

impl Entity {
    pub fn hub(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::Hub,
            layer: Layer::Hub,
            label: label.into(),
            sublabel: None,
            magnitude: 0.0,
            group_key: None,
            facets: Vec::new(),
        }
    }

    pub fn primary(id: impl Into<String>, label: impl Into<String>, magnitude: f64) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::Primary,
            layer: Layer::Primary,
            label: label.into(),
            sublabel: None,
            magnitude,
            group_key: None,
            facets: Vec::new(),
        }
    }

    pub fn secondary(
        id: impl Into<String>,
        layer: Layer,
        label: impl Into<String>,
        magnitude: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::Secondary,
            layer,
            label: label.into(),
            sublabel: None,
            magnitude,
            group_key: None,
            facets: Vec::new(),
        }
    }

    pub fn with_sublabel(mut self, sublabel: impl Into<String>) -> Self {
        self.sublabel = Some(sublabel.into());
        self
    }

    pub fn with_group_key(mut self, group_key: impl Into<String>) -> Self {
        self.group_key = Some(group_key.into());
        self
    }

    pub fn with_facet(mut self, label: impl Into<String>, value: f64) -> Self {
        self.facets.push(Facet::new(label, value));
        self
    }

    /// Magnitude with negative and non-finite values clamped to zero.
    pub fn clamped_magnitude(&self) -> f64 {
        if self.magnitude.is_finite() {
            self.magnitude.max(0.0)
        } else {
            0.0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RelationKind {
    Structural,
    Derived,
    Cross,
    Backbone,
}

/// How the secondary endpoint of a derived relation is placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attachment {
    #[default]
    OrbitIndependent,
    OrbitOfParent,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Relation {
    pub source: String,
    pub target: String,
    pub kind: RelationKind,
    pub layer: Layer,
    pub weight: f64,
    pub attachment: Attachment,
}

impl Relation {
    pub fn structural(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: RelationKind::Structural,
            layer: Layer::Primary,
            weight,
            attachment: Attachment::OrbitIndependent,
        }
    }

    pub fn derived(
        source: impl Into<String>,
        target: impl Into<String>,
        layer: Layer,
        weight: f64,
        attachment: Attachment,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: RelationKind::Derived,
            layer,
            weight,
            attachment,
        }
    }

    pub fn clamped_weight(&self) -> f64 {
        clamp_unit(self.weight)
    }

    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }
}

pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const ZERO: Viewport = Viewport {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
    pub entity: Entity,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub angle: f64,
}

impl LayoutNode {
    pub fn id(&self) -> &str {
        &self.entity.id
    }

    pub fn kind(&self) -> EntityKind {
        self.entity.kind
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.distance_to(x, y) <= self.r
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutEdge {
    pub relation: Relation,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LayoutEdge {
    pub fn kind(&self) -> RelationKind {
        self.relation.kind
    }

    pub fn source(&self) -> &str {
        &self.relation.source
    }

    pub fn target(&self) -> &str {
        &self.relation.target
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub viewport: Viewport,
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

impl Layout {
    pub fn empty(viewport: Viewport) -> Self {
        Self {
            viewport,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn edges_touching<'a, 'b>(
        &'a self,
        id: &'b str,
    ) -> impl Iterator<Item = &'a LayoutEdge> + use<'a, 'b> {
        self.edges.iter().filter(move |edge| edge.relation.touches(id))
    }

    /// Ids directly connected to `id` by a surviving edge, in edge order.
    pub fn neighbors<'a>(&'a self, id: &str) -> Vec<&'a str> {
        let mut neighbors = Vec::new();
        for edge in self.edges_touching(id) {
            let other = if edge.source() == id {
                edge.target()
            } else {
                edge.source()
            };
            if other != id && !neighbors.contains(&other) {
                neighbors.push(other);
            }
        }
        neighbors
    }
}
