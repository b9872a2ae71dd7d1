use std::collections::HashSet;

use tracing::debug;

use super::model::{Layer, LayerSet, Layout};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionEvent {
    PointerEnter(String),
    PointerLeave(String),
    Click(String),
    ToggleLayer(Layer),
    ClearSelection,
}

/// What the host has to do after an event was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    /// Only emphasis changed; the current layout stays valid.
    Emphasis,
    /// Active layers changed; the layout must be recomputed.
    Relayout,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub hovered: Option<String>,
    pub selected: Option<String>,
    pub active_layers: LayerSet,
    available: LayerSet,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State of a graph instance that only offers `layers`, all switched on.
    pub fn with_layers(layers: LayerSet) -> Self {
        Self {
            hovered: None,
            selected: None,
            active_layers: layers.clone(),
            available: layers,
        }
    }

    pub fn available_layers(&self) -> &LayerSet {
        &self.available
    }

    /// Back to nothing hovered, nothing selected and every offered layer on.
    pub fn reset(&mut self) {
        self.hovered = None;
        self.selected = None;
        self.active_layers = self.available.clone();
    }

    pub fn apply(&mut self, event: InteractionEvent) -> Transition {
        let transition = match &event {
            InteractionEvent::PointerEnter(id) => {
                if self.hovered.as_deref() == Some(id.as_str()) {
                    Transition::Unchanged
                } else {
                    self.hovered = Some(id.clone());
                    Transition::Emphasis
                }
            }
            InteractionEvent::PointerLeave(id) => {
                if self.hovered.as_deref() == Some(id.as_str()) {
                    self.hovered = None;
                    Transition::Emphasis
                } else {
                    Transition::Unchanged
                }
            }
            InteractionEvent::Click(id) => {
                if self.selected.as_deref() == Some(id.as_str()) {
                    self.selected = None;
                } else {
                    self.selected = Some(id.clone());
                }
                Transition::Emphasis
            }
            InteractionEvent::ToggleLayer(layer) => {
                if self.available.contains(*layer) && self.active_layers.toggle(*layer) {
                    Transition::Relayout
                } else {
                    Transition::Unchanged
                }
            }
            InteractionEvent::ClearSelection => {
                if self.selected.take().is_some() {
                    Transition::Emphasis
                } else {
                    Transition::Unchanged
                }
            }
        };

        if transition != Transition::Unchanged {
            debug!(?event, ?transition, "interaction");
        }
        transition
    }

    pub fn focus(&self) -> impl Iterator<Item = &str> {
        self.hovered.as_deref().into_iter().chain(self.selected.as_deref())
    }

    pub fn has_focus(&self) -> bool {
        self.hovered.is_some() || self.selected.is_some()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Emphasis {
    #[default]
    Normal,
    Emphasized,
    Dimmed,
}

/// Per-node and per-edge emphasis for one frame, indexed like the layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmphasisMap {
    pub nodes: Vec<Emphasis>,
    pub edges: Vec<Emphasis>,
}

impl EmphasisMap {
    pub fn node(&self, index: usize) -> Emphasis {
        self.nodes.get(index).copied().unwrap_or_default()
    }

    pub fn edge(&self, index: usize) -> Emphasis {
        self.edges.get(index).copied().unwrap_or_default()
    }
}

pub fn emphasis(state: &InteractionState, layout: &Layout) -> EmphasisMap {
    let present = layout
        .nodes
        .iter()
        .map(|node| node.id())
        .collect::<HashSet<_>>();
    let focus = state
        .focus()
        .filter(|id| present.contains(id))
        .collect::<HashSet<_>>();

    if focus.is_empty() {
        return EmphasisMap {
            nodes: vec![Emphasis::Normal; layout.nodes.len()],
            edges: vec![Emphasis::Normal; layout.edges.len()],
        };
    }

    let mut connected = HashSet::new();
    let edges = layout
        .edges
        .iter()
        .map(|edge| {
            let source_focused = focus.contains(edge.source());
            let target_focused = focus.contains(edge.target());
            if source_focused || target_focused {
                connected.insert(edge.source());
                connected.insert(edge.target());
                Emphasis::Emphasized
            } else {
                Emphasis::Dimmed
            }
        })
        .collect::<Vec<_>>();

    let nodes = layout
        .nodes
        .iter()
        .map(|node| {
            if focus.contains(node.id()) {
                Emphasis::Emphasized
            } else if connected.contains(node.id()) {
                Emphasis::Normal
            } else {
                Emphasis::Dimmed
            }
        })
        .collect();

    EmphasisMap { nodes, edges }
}

/// Node under the pointer; the closest centre wins among overlapping circles.
pub fn hit_test(layout: &Layout, x: f64, y: f64) -> Option<&str> {
    layout
        .nodes
        .iter()
        .filter(|node| node.contains(x, y))
        .min_by(|a, b| a.distance_to(x, y).total_cmp(&b.distance_to(x, y)))
        .map(|node| node.id())
}

/// Converts per-frame hit results into enter/leave events.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    over: Option<String>,
}

impl PointerTracker {
    pub fn update(&mut self, hit: Option<&str>) -> Vec<InteractionEvent> {
        if self.over.as_deref() == hit {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(previous) = self.over.take() {
            events.push(InteractionEvent::PointerLeave(previous));
        }
        if let Some(id) = hit {
            self.over = Some(id.to_owned());
            events.push(InteractionEvent::PointerEnter(id.to_owned()));
        }
        events
    }

    pub fn reset(&mut self) {
        self.over = None;
    }
}
