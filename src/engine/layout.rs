use std::collections::{BTreeSet, HashMap, HashSet};
use std::f64::consts::{FRAC_PI_2, TAU};

use tracing::debug;

use super::config::LayoutConfig;
use super::model::{
    Attachment, Entity, EntityKind, Layer, LayerSet, Layout, LayoutEdge, LayoutNode, Relation,
    RelationKind, Viewport, clamp_unit,
};
use super::scale::{magnitude_ceiling, scaled_radius};

/// Angle of slot `index` out of `count`, starting at 12 o'clock and running clockwise.
pub fn ring_angle(index: usize, count: usize) -> f64 {
    if count == 0 {
        return -FRAC_PI_2;
    }
    TAU * index as f64 / count as f64 - FRAC_PI_2
}

/// Angular offset of the `slot`-th orbit child around its parent: `-a, +a, -2a, +2a, ...`.
pub fn orbit_offset(slot: usize, step: f64) -> f64 {
    let distance = (slot / 2 + 1) as f64 * step;
    if slot % 2 == 0 { -distance } else { distance }
}

pub fn primary_ring_radius(viewport: Viewport, config: &LayoutConfig) -> f64 {
    viewport.width.min(viewport.height) / 2.0 * config.primary_ring
}

struct Placement<'a> {
    attachment: Attachment,
    parent: &'a str,
}

/// Single deterministic layout pass.
///
/// Entities and relations in inactive layers are excluded entirely, as are
/// relations whose endpoints did not survive. Cross relations are derived
/// from shared secondary membership and backbone relations come from
/// `config.backbone`. A degenerate viewport yields an empty layout.
pub fn compute_layout(
    entities: &[Entity],
    relations: &[Relation],
    active: &LayerSet,
    viewport: Viewport,
    config: &LayoutConfig,
) -> Layout {
    if viewport.is_degenerate() || entities.is_empty() {
        return Layout::empty(viewport);
    }

    let mut seen = HashSet::new();
    let known = entities
        .iter()
        .filter(|entity| seen.insert(entity.id.as_str()))
        .collect::<Vec<_>>();
    let kind_by_id = known
        .iter()
        .map(|entity| (entity.id.as_str(), entity.kind))
        .collect::<HashMap<_, _>>();

    let visible = known
        .iter()
        .copied()
        .filter(|entity| active.contains(entity.layer))
        .collect::<Vec<_>>();

    let (cx, cy) = viewport.center();
    let ring = primary_ring_radius(viewport, config);
    let mut nodes: Vec<LayoutNode> = Vec::with_capacity(visible.len());
    let mut index_by_id: HashMap<&str, usize> = HashMap::with_capacity(visible.len());

    if let Some(hub) = visible.iter().find(|entity| entity.kind == EntityKind::Hub) {
        index_by_id.insert(hub.id.as_str(), nodes.len());
        nodes.push(LayoutNode {
            entity: (*hub).clone(),
            x: cx,
            y: cy,
            r: config.hub_radius,
            angle: 0.0,
        });
    }

    let primaries = visible
        .iter()
        .copied()
        .filter(|entity| entity.kind == EntityKind::Primary)
        .collect::<Vec<_>>();
    let primary_ceiling = magnitude_ceiling(primaries.iter().map(|entity| entity.clamped_magnitude()));
    for (index, entity) in primaries.iter().enumerate() {
        let angle = ring_angle(index, primaries.len());
        index_by_id.insert(entity.id.as_str(), nodes.len());
        nodes.push(LayoutNode {
            entity: (*entity).clone(),
            x: cx + ring * angle.cos(),
            y: cy + ring * angle.sin(),
            r: scaled_radius(
                entity.clamped_magnitude(),
                primary_ceiling,
                config.primary_r_min,
                config.primary_r_max,
            ),
            angle,
        });
    }

    let secondaries = visible
        .iter()
        .copied()
        .filter(|entity| entity.kind == EntityKind::Secondary)
        .collect::<Vec<_>>();
    let secondary_ids = secondaries
        .iter()
        .map(|entity| entity.id.as_str())
        .collect::<HashSet<_>>();

    let mut placements: HashMap<&str, Placement<'_>> = HashMap::new();
    for relation in relations {
        if relation.kind != RelationKind::Derived || !active.contains(relation.layer) {
            continue;
        }
        let Some((parent, child)) = primary_and_secondary(relation, &kind_by_id) else {
            continue;
        };
        if !index_by_id.contains_key(parent) || !secondary_ids.contains(child) {
            continue;
        }
        placements.entry(child).or_insert(Placement {
            attachment: relation.attachment,
            parent,
        });
    }

    let independent_count = secondaries
        .iter()
        .filter(|entity| {
            placements
                .get(entity.id.as_str())
                .is_none_or(|placement| placement.attachment == Attachment::OrbitIndependent)
        })
        .count();

    let mut layer_ceilings: HashMap<Layer, f64> = HashMap::new();
    for entity in &secondaries {
        let ceiling = layer_ceilings.entry(entity.layer).or_insert(1.0);
        *ceiling = ceiling.max(entity.clamped_magnitude());
    }

    let outer_ring = ring * config.secondary_ring;
    let orbit_distance = ring + config.orbit_gap;
    let mut independent_slot = 0usize;
    let mut orbit_slots: HashMap<&str, usize> = HashMap::new();

    for entity in &secondaries {
        let placement = placements.get(entity.id.as_str());
        let (distance, angle) = match placement {
            Some(placement) if placement.attachment == Attachment::OrbitOfParent => {
                let parent_angle = nodes[index_by_id[placement.parent]].angle;
                let slot = orbit_slots.entry(placement.parent).or_insert(0);
                let angle = parent_angle + orbit_offset(*slot, config.orbit_angle);
                *slot += 1;
                (orbit_distance, angle)
            }
            _ => {
                let angle = ring_angle(independent_slot, independent_count);
                independent_slot += 1;
                (outer_ring, angle)
            }
        };

        let ceiling = layer_ceilings.get(&entity.layer).copied().unwrap_or(1.0);
        index_by_id.insert(entity.id.as_str(), nodes.len());
        nodes.push(LayoutNode {
            entity: (*entity).clone(),
            x: cx + distance * angle.cos(),
            y: cy + distance * angle.sin(),
            r: scaled_radius(
                entity.clamped_magnitude(),
                ceiling,
                config.secondary_r_min,
                config.secondary_r_max,
            ),
            angle,
        });
    }

    let mut edges = Vec::new();
    for relation in relations {
        if !active.contains(relation.layer) {
            continue;
        }
        if let Some(edge) = resolve_edge(relation, &nodes, &index_by_id) {
            edges.push(edge);
        }
    }

    if active.contains(Layer::Cross) {
        for relation in cross_relations(&primaries, relations, &kind_by_id) {
            if let Some(edge) = resolve_edge(&relation, &nodes, &index_by_id) {
                edges.push(edge);
            }
        }
    }

    if active.contains(Layer::Backbone) {
        for backbone in &config.backbone {
            let relation = Relation {
                source: backbone.source.clone(),
                target: backbone.target.clone(),
                kind: RelationKind::Backbone,
                layer: Layer::Backbone,
                weight: backbone.weight,
                attachment: Attachment::OrbitIndependent,
            };
            if let Some(edge) = resolve_edge(&relation, &nodes, &index_by_id) {
                edges.push(edge);
            }
        }
    }

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        width = viewport.width,
        height = viewport.height,
        "layout pass"
    );

    Layout {
        viewport,
        nodes,
        edges,
    }
}

fn primary_and_secondary<'a>(
    relation: &'a Relation,
    kind_by_id: &HashMap<&str, EntityKind>,
) -> Option<(&'a str, &'a str)> {
    let source = kind_by_id.get(relation.source.as_str())?;
    let target = kind_by_id.get(relation.target.as_str())?;
    match (source, target) {
        (EntityKind::Primary, EntityKind::Secondary) => {
            Some((relation.source.as_str(), relation.target.as_str()))
        }
        (EntityKind::Secondary, EntityKind::Primary) => {
            Some((relation.target.as_str(), relation.source.as_str()))
        }
        _ => None,
    }
}

/// One cross relation per pair of primaries sharing at least one secondary.
///
/// Membership comes from every derived relation of the input, regardless of
/// whether the secondary's own layer is currently shown.
fn cross_relations(
    primaries: &[&Entity],
    relations: &[Relation],
    kind_by_id: &HashMap<&str, EntityKind>,
) -> Vec<Relation> {
    let mut members: HashMap<&str, BTreeSet<&str>> = HashMap::new();
    for relation in relations {
        if relation.kind != RelationKind::Derived {
            continue;
        }
        if let Some((parent, child)) = primary_and_secondary(relation, kind_by_id) {
            members.entry(parent).or_default().insert(child);
        }
    }

    let mut shared = Vec::new();
    for (left_index, left) in primaries.iter().enumerate() {
        let Some(left_members) = members.get(left.id.as_str()) else {
            continue;
        };
        for right in &primaries[left_index + 1..] {
            let Some(right_members) = members.get(right.id.as_str()) else {
                continue;
            };
            let count = left_members.intersection(right_members).count();
            if count > 0 {
                shared.push((left.id.as_str(), right.id.as_str(), count));
            }
        }
    }

    let max_shared = shared.iter().map(|(_, _, count)| *count).max().unwrap_or(1);
    shared
        .into_iter()
        .map(|(source, target, count)| Relation {
            source: source.to_owned(),
            target: target.to_owned(),
            kind: RelationKind::Cross,
            layer: Layer::Cross,
            weight: count as f64 / max_shared as f64,
            attachment: Attachment::OrbitIndependent,
        })
        .collect()
}

fn resolve_edge(
    relation: &Relation,
    nodes: &[LayoutNode],
    index_by_id: &HashMap<&str, usize>,
) -> Option<LayoutEdge> {
    let source = nodes.get(*index_by_id.get(relation.source.as_str())?)?;
    let target = nodes.get(*index_by_id.get(relation.target.as_str())?)?;
    if source.id() == target.id() {
        return None;
    }

    let mut relation = relation.clone();
    relation.weight = clamp_unit(relation.weight);
    Some(LayoutEdge {
        relation,
        x1: source.x,
        y1: source.y,
        x2: target.x,
        y2: target.y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::BackboneEdge;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    fn star(magnitudes: &[f64]) -> (Vec<Entity>, Vec<Relation>) {
        let mut entities = vec![Entity::hub("hub", "Hub")];
        let mut relations = Vec::new();
        for (index, magnitude) in magnitudes.iter().enumerate() {
            let id = format!("p{index}");
            entities.push(Entity::primary(id.clone(), id.clone(), *magnitude));
            relations.push(Relation::structural("hub", id, 1.0));
        }
        (entities, relations)
    }

    #[test]
    fn hub_sits_at_center() {
        let (entities, relations) = star(&[1.0, 2.0]);
        let layout = compute_layout(
            &entities,
            &relations,
            &LayerSet::all(),
            viewport(),
            &LayoutConfig::default(),
        );
        let hub = layout.node("hub").unwrap();
        assert_eq!((hub.x, hub.y), (400.0, 300.0));
        assert_eq!(hub.r, LayoutConfig::default().hub_radius);
    }

    #[test]
    fn no_primaries_renders_hub_only() {
        let (entities, relations) = star(&[]);
        let layout = compute_layout(
            &entities,
            &relations,
            &LayerSet::all(),
            viewport(),
            &LayoutConfig::default(),
        );
        assert_eq!(layout.nodes.len(), 1);
        assert!(layout.edges.is_empty());
    }

    #[test]
    fn single_primary_sits_at_twelve_o_clock() {
        let (entities, relations) = star(&[5.0]);
        let config = LayoutConfig::default();
        let layout = compute_layout(&entities, &relations, &LayerSet::all(), viewport(), &config);
        let primary = layout.node("p0").unwrap();
        let ring = primary_ring_radius(viewport(), &config);
        assert!((primary.x - 400.0).abs() < 1e-9);
        assert!((primary.y - (300.0 - ring)).abs() < 1e-9);
        assert_eq!(primary.r, config.primary_r_max);
    }

    #[test]
    fn all_zero_magnitudes_get_minimum_radius() {
        let (entities, relations) = star(&[0.0, 0.0, 0.0]);
        let config = LayoutConfig::default();
        let layout = compute_layout(&entities, &relations, &LayerSet::all(), viewport(), &config);
        for node in layout.nodes.iter().filter(|node| node.kind() == EntityKind::Primary) {
            assert_eq!(node.r, config.primary_r_min);
            assert!(node.x.is_finite() && node.y.is_finite());
        }
    }

    #[test]
    fn degenerate_viewport_is_empty() {
        let (entities, relations) = star(&[1.0, 2.0]);
        for viewport in [
            Viewport::ZERO,
            Viewport::new(-10.0, 300.0),
            Viewport::new(f64::NAN, 300.0),
        ] {
            let layout = compute_layout(
                &entities,
                &relations,
                &LayerSet::all(),
                viewport,
                &LayoutConfig::default(),
            );
            assert!(layout.nodes.is_empty());
            assert!(layout.edges.is_empty());
        }
    }

    #[test]
    fn relation_to_unknown_entity_is_dropped() {
        let (entities, mut relations) = star(&[1.0]);
        relations.push(Relation::structural("hub", "ghost", 1.0));
        let layout = compute_layout(
            &entities,
            &relations,
            &LayerSet::all(),
            viewport(),
            &LayoutConfig::default(),
        );
        assert_eq!(layout.edges.len(), 1);
        assert!(layout.edges.iter().all(|edge| edge.target() != "ghost"));
    }

    #[test]
    fn orbit_children_alternate_around_parent() {
        let (mut entities, mut relations) = star(&[4.0, 4.0]);
        for child in ["a", "b", "c"] {
            entities.push(Entity::secondary(child, Layer::Markers, child, 1.0));
            relations.push(Relation::derived(
                "p0",
                child,
                Layer::Markers,
                1.0,
                Attachment::OrbitOfParent,
            ));
        }
        let config = LayoutConfig::default();
        let layout = compute_layout(&entities, &relations, &LayerSet::all(), viewport(), &config);
        let parent = layout.node("p0").unwrap();
        let expected = [-0.35, 0.35, -0.70];
        for (child, offset) in ["a", "b", "c"].iter().zip(expected) {
            let node = layout.node(child).unwrap();
            assert!((node.angle - (parent.angle + offset)).abs() < 1e-9);
            let distance = node.distance_to(400.0, 300.0);
            let ring = primary_ring_radius(viewport(), &config);
            assert!((distance - (ring + config.orbit_gap)).abs() < 1e-9);
        }
    }

    #[test]
    fn independent_secondaries_share_outer_ring() {
        let (mut entities, mut relations) = star(&[1.0, 1.0]);
        for (owner, child) in [("p0", "s0"), ("p1", "s1")] {
            entities.push(Entity::secondary(child, Layer::Satellites, child, 2.0));
            relations.push(Relation::derived(
                owner,
                child,
                Layer::Satellites,
                1.0,
                Attachment::OrbitIndependent,
            ));
        }
        let config = LayoutConfig::default();
        let layout = compute_layout(&entities, &relations, &LayerSet::all(), viewport(), &config);
        let outer = primary_ring_radius(viewport(), &config) * config.secondary_ring;
        for child in ["s0", "s1"] {
            let node = layout.node(child).unwrap();
            assert!((node.distance_to(400.0, 300.0) - outer).abs() < 1e-9);
            assert_eq!(node.r, config.secondary_r_max);
        }
    }

    #[test]
    fn backbone_needs_both_endpoints() {
        let (entities, relations) = star(&[1.0, 1.0]);
        let config = LayoutConfig::default().with_backbone(vec![
            BackboneEdge::new("p0", "p1", 0.5),
            BackboneEdge::new("p1", "missing", 0.5),
        ]);
        let layout = compute_layout(&entities, &relations, &LayerSet::all(), viewport(), &config);
        let backbone = layout
            .edges
            .iter()
            .filter(|edge| edge.kind() == RelationKind::Backbone)
            .count();
        assert_eq!(backbone, 1);
    }

    #[test]
    fn weights_are_clamped_into_unit_range() {
        let (entities, mut relations) = star(&[1.0]);
        relations[0].weight = 4.0;
        let layout = compute_layout(
            &entities,
            &relations,
            &LayerSet::all(),
            viewport(),
            &LayoutConfig::default(),
        );
        assert_eq!(layout.edges[0].relation.weight, 1.0);
    }

    #[test]
    fn orbit_offsets_follow_alternating_sequence() {
        let offsets = (0..4).map(|slot| orbit_offset(slot, 0.5)).collect::<Vec<_>>();
        assert_eq!(offsets, vec![-0.5, 0.5, -1.0, 1.0]);
    }
}
