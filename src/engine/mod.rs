//! Radial layout engine: data model, layout pass, interaction reducer and
//! the rendering contract consumed by the host.

mod config;
mod interaction;
mod layout;
mod model;
mod render;
mod scale;
mod viewport;

pub use config::{BackboneEdge, LayoutConfig, load_layout_config};
pub use interaction::{
    Emphasis, EmphasisMap, InteractionEvent, InteractionState, PointerTracker, Transition,
    emphasis, hit_test,
};
pub use layout::{compute_layout, orbit_offset, primary_ring_radius, ring_angle};
pub use model::{
    Attachment, Entity, EntityKind, Facet, Layer, LayerSet, Layout, LayoutEdge, LayoutNode,
    Relation, RelationKind, Viewport,
};
pub use render::{DetailPanel, FillRole, PanelBody, StrokeStyle, edge_stroke_width, truncate_label};
pub use scale::{magnitude_ceiling, normalize, scaled_radius};
pub use viewport::ViewportTracker;
