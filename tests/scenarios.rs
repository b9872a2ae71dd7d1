use std::collections::HashSet;
use std::f64::consts::PI;

use knowledge_orbit::engine::{
    EntityKind, Layer, LayerSet, Layout, LayoutConfig, RelationKind, Viewport, compute_layout,
};
use knowledge_orbit::graphs::{GraphInput, GraphKind, Language, build_graph};
use knowledge_orbit::snapshot::{LayerCounts, RoleCounts, SessionLink, Snapshot};
use proptest::prelude::*;

fn role(id: &str, memories: u64, knowledge: u64, prompts: u64) -> RoleCounts {
    RoleCounts {
        id: id.to_owned(),
        name: String::new(),
        memories,
        knowledge,
        prompts,
    }
}

fn link(role: &str, session: &str) -> SessionLink {
    SessionLink {
        role: role.to_owned(),
        session: session.to_owned(),
    }
}

fn snapshot(roles: Vec<RoleCounts>, shared_sessions: Vec<SessionLink>) -> Snapshot {
    Snapshot {
        product: "Atlas".to_owned(),
        language: None,
        layers: LayerCounts::default(),
        roles,
        shared_sessions,
        sessions: Vec::new(),
    }
}

fn lay_out(input: &GraphInput, active: &LayerSet, viewport: Viewport) -> Layout {
    compute_layout(&input.entities, &input.relations, active, viewport, &input.config)
}

#[test]
fn six_layer_connections_scenario() {
    let mut snapshot = snapshot(
        (1..=7)
            .map(|index| role(&format!("r{index}"), index, index * 2, 8 - index))
            .collect(),
        Vec::new(),
    );
    snapshot.layers = LayerCounts {
        memory: 10,
        knowledge: 0,
        prompts: 5,
        tools: 0,
        files: 0,
        chronicle: 20,
    };

    let config = LayoutConfig::default();
    let input = build_graph(GraphKind::Connections, &snapshot, Language::En, &config);
    let layout = lay_out(&input, &GraphKind::Connections.layers(), Viewport::new(1000.0, 800.0));

    let primaries = layout
        .nodes
        .iter()
        .filter(|node| node.kind() == EntityKind::Primary)
        .collect::<Vec<_>>();
    assert_eq!(primaries.len(), 6);

    let expected_degrees = [-90.0, -30.0, 30.0, 90.0, 150.0, 210.0];
    for (node, degrees) in primaries.iter().zip(expected_degrees) {
        assert!((node.angle - degrees * PI / 180.0).abs() < 1e-9, "{}", node.id());
    }

    let largest = primaries
        .iter()
        .max_by(|a, b| a.r.total_cmp(&b.r))
        .unwrap();
    assert_eq!(largest.id(), "layer:chronicle");
    assert_eq!(largest.r, config.primary_r_max);
    for id in ["layer:knowledge", "layer:tools", "layer:files"] {
        assert_eq!(layout.node(id).unwrap().r, config.primary_r_min);
    }

    let backbone = layout
        .edges
        .iter()
        .filter(|edge| edge.kind() == RelationKind::Backbone)
        .count();
    assert_eq!(backbone, 3);

    let contributing = ["layer:memory", "layer:knowledge", "layer:prompts"]
        .into_iter()
        .collect::<HashSet<_>>();
    let derived_sources = layout
        .edges
        .iter()
        .filter(|edge| edge.kind() == RelationKind::Derived)
        .map(|edge| edge.source())
        .collect::<HashSet<_>>();
    assert_eq!(derived_sources, contributing);

    let bridges = layout
        .nodes
        .iter()
        .filter(|node| node.kind() == EntityKind::Secondary)
        .count();
    assert_eq!(bridges, config.top_roles);
}

#[test]
fn shared_session_scenario() {
    let snapshot = snapshot(
        vec![role("a", 1, 0, 0), role("b", 1, 0, 0)],
        vec![link("a", "s"), link("b", "s")],
    );
    let input = build_graph(
        GraphKind::RoleMemory,
        &snapshot,
        Language::En,
        &LayoutConfig::default(),
    );
    let layout = lay_out(&input, &GraphKind::RoleMemory.layers(), Viewport::new(600.0, 600.0));

    let cross = layout
        .edges
        .iter()
        .filter(|edge| edge.kind() == RelationKind::Cross)
        .collect::<Vec<_>>();
    assert_eq!(cross.len(), 1);
    assert_eq!(cross[0].relation.weight, 1.0);

    let sessions = layout
        .nodes
        .iter()
        .filter(|node| node.id() == "session:s")
        .count();
    assert_eq!(sessions, 1);

    let owners = layout
        .edges
        .iter()
        .filter(|edge| edge.target() == "session:s")
        .count();
    assert_eq!(owners, 2);
}

#[test]
fn zero_entities_and_degenerate_viewports_are_empty() {
    let config = LayoutConfig::default();
    assert!(compute_layout(&[], &[], &LayerSet::all(), Viewport::new(800.0, 600.0), &config).is_empty());

    let input = build_graph(
        GraphKind::RoleMemory,
        &Snapshot::demo(),
        Language::En,
        &config,
    );
    for viewport in [Viewport::ZERO, Viewport::new(0.0, 500.0), Viewport::new(500.0, 0.0)] {
        assert!(lay_out(&input, &LayerSet::all(), viewport).is_empty());
    }
}

fn snapshot_strategy() -> impl Strategy<Value = Snapshot> {
    (
        prop::collection::vec((0u64..40, 0u64..40, 0u64..40), 0..8),
        prop::collection::vec((0usize..8, 0usize..5), 0..14),
    )
        .prop_map(|(counts, links)| {
            let roles = counts
                .iter()
                .enumerate()
                .map(|(index, (memories, knowledge, prompts))| {
                    role(&format!("r{index}"), *memories, *knowledge, *prompts)
                })
                .collect::<Vec<_>>();
            let shared_sessions = if roles.is_empty() {
                Vec::new()
            } else {
                links
                    .into_iter()
                    .map(|(role, session)| {
                        link(&format!("r{}", role % roles.len()), &format!("s{session}"))
                    })
                    .collect()
            };
            snapshot(roles, shared_sessions)
        })
}

fn kind_strategy() -> impl Strategy<Value = GraphKind> {
    prop_oneof![Just(GraphKind::RoleMemory), Just(GraphKind::Connections)]
}

fn layers_strategy() -> impl Strategy<Value = LayerSet> {
    prop::collection::vec(any::<bool>(), Layer::TOGGLABLE.len()).prop_map(|flags| {
        Layer::TOGGLABLE
            .into_iter()
            .zip(flags)
            .filter_map(|(layer, on)| on.then_some(layer))
            .collect()
    })
}

proptest! {
    #[test]
    fn layout_is_deterministic(
        snapshot in snapshot_strategy(),
        kind in kind_strategy(),
        active in layers_strategy(),
        width in 1.0f64..2000.0,
        height in 1.0f64..2000.0,
    ) {
        let input = build_graph(kind, &snapshot, Language::En, &LayoutConfig::default());
        let viewport = Viewport::new(width, height);
        prop_assert_eq!(lay_out(&input, &active, viewport), lay_out(&input, &active, viewport));
    }

    #[test]
    fn node_ids_are_unique_and_edges_resolve(
        snapshot in snapshot_strategy(),
        kind in kind_strategy(),
        active in layers_strategy(),
    ) {
        let input = build_graph(kind, &snapshot, Language::En, &LayoutConfig::default());
        let layout = lay_out(&input, &active, Viewport::new(900.0, 700.0));

        let ids = layout.nodes.iter().map(|node| node.id()).collect::<HashSet<_>>();
        prop_assert_eq!(ids.len(), layout.nodes.len());
        for edge in &layout.edges {
            prop_assert!(ids.contains(edge.source()));
            prop_assert!(ids.contains(edge.target()));
            prop_assert!(active.contains(edge.relation.layer));
        }
        for node in &layout.nodes {
            prop_assert!(active.contains(node.entity.layer));
        }
    }

    #[test]
    fn primary_radius_grows_with_magnitude(
        snapshot in snapshot_strategy(),
        kind in kind_strategy(),
    ) {
        let input = build_graph(kind, &snapshot, Language::En, &LayoutConfig::default());
        let layout = lay_out(&input, &LayerSet::all(), Viewport::new(900.0, 700.0));
        let primaries = layout
            .nodes
            .iter()
            .filter(|node| node.kind() == EntityKind::Primary)
            .collect::<Vec<_>>();

        for a in &primaries {
            for b in &primaries {
                if a.entity.magnitude <= b.entity.magnitude {
                    prop_assert!(a.r <= b.r + 1e-9);
                }
            }
        }
    }

    #[test]
    fn toggling_a_layer_twice_restores_the_layout(
        snapshot in snapshot_strategy(),
        kind in kind_strategy(),
        layer in prop::sample::select(Layer::TOGGLABLE.to_vec()),
    ) {
        let input = build_graph(kind, &snapshot, Language::En, &LayoutConfig::default());
        let viewport = Viewport::new(800.0, 800.0);
        let mut active = kind.layers();
        let before = lay_out(&input, &active, viewport);

        active.toggle(layer);
        active.toggle(layer);
        prop_assert_eq!(lay_out(&input, &active, viewport), before);
    }
}
