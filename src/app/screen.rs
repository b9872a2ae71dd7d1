use tracing::debug;

use crate::engine::{
    self, EmphasisMap, InteractionEvent, InteractionState, Layout, PointerTracker, Transition,
    Viewport, ViewportTracker,
};
use crate::graphs::{GraphInput, GraphKind};

/// One mounted graph: its inputs, viewport, interaction state and the
/// layout derived from them.
pub(super) struct GraphScreen {
    kind: GraphKind,
    input: GraphInput,
    tracker: ViewportTracker,
    interaction: InteractionState,
    pointer: PointerTracker,
    layout: Layout,
    emphasis: EmphasisMap,
    layout_dirty: bool,
}

impl GraphScreen {
    pub(super) fn new(kind: GraphKind, input: GraphInput) -> Self {
        Self {
            kind,
            input,
            tracker: ViewportTracker::new(),
            interaction: InteractionState::with_layers(kind.layers()),
            pointer: PointerTracker::default(),
            layout: Layout::empty(Viewport::ZERO),
            emphasis: EmphasisMap::default(),
            layout_dirty: true,
        }
    }

    pub(super) fn kind(&self) -> GraphKind {
        self.kind
    }

    pub(super) fn input(&self) -> &GraphInput {
        &self.input
    }

    pub(super) fn layout(&self) -> &Layout {
        &self.layout
    }

    pub(super) fn emphasis(&self) -> &EmphasisMap {
        &self.emphasis
    }

    pub(super) fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Swaps in freshly built entities; hover and selection survive.
    pub(super) fn replace_input(&mut self, input: GraphInput) {
        self.input = input;
        self.layout_dirty = true;
    }

    /// Unmount: everything interactive returns to its initial state.
    pub(super) fn teardown(&mut self) {
        self.interaction.reset();
        self.pointer.reset();
        self.tracker.reset();
        self.layout = Layout::empty(Viewport::ZERO);
        self.emphasis = EmphasisMap::default();
        self.layout_dirty = true;
    }

    pub(super) fn observe_viewport(&mut self, width: f64, height: f64) {
        if self.tracker.observe(width, height).is_some() {
            self.layout_dirty = true;
        }
    }

    pub(super) fn apply(&mut self, event: InteractionEvent) -> Transition {
        let transition = self.interaction.apply(event);
        match transition {
            Transition::Relayout => self.layout_dirty = true,
            Transition::Emphasis => {
                self.emphasis = engine::emphasis(&self.interaction, &self.layout);
            }
            Transition::Unchanged => {}
        }
        transition
    }

    /// Selects `id` unless it already is; search results never deselect.
    pub(super) fn select(&mut self, id: &str) {
        if self.interaction.selected.as_deref() != Some(id) {
            self.apply(InteractionEvent::Click(id.to_owned()));
        }
    }

    pub(super) fn pointer_moved(&mut self, position: Option<(f64, f64)>) {
        let hit = position.and_then(|(x, y)| engine::hit_test(&self.layout, x, y));
        let events = self.pointer.update(hit);
        for event in events {
            self.apply(event);
        }
    }

    pub(super) fn ensure_layout(&mut self) {
        if !self.layout_dirty {
            return;
        }
        let Some(viewport) = self.tracker.current() else {
            return;
        };

        self.layout = engine::compute_layout(
            &self.input.entities,
            &self.input.relations,
            &self.interaction.active_layers,
            viewport,
            &self.input.config,
        );
        self.emphasis = engine::emphasis(&self.interaction, &self.layout);
        self.layout_dirty = false;
        debug!(
            kind = ?self.kind,
            nodes = self.layout.nodes.len(),
            edges = self.layout.edges.len(),
            "screen relayout"
        );
    }
}
