use crate::engine::{Attachment, BackboneEdge, Entity, Layer, LayoutConfig, Relation};
use crate::snapshot::{RoleCounts, Snapshot};

use super::{Concept, GraphInput, HUB_ID, Language, Term, hub_entity, term};

pub fn layer_id(concept: Concept) -> String {
    format!("layer:{}", concept.key())
}

pub fn bridge_id(role: &str) -> String {
    format!("bridge:{role}")
}

/// Conceptual pipeline drawn regardless of counts: files feed knowledge,
/// knowledge feeds memory, memory is written to the chronicle.
pub fn backbone() -> Vec<BackboneEdge> {
    [
        (Concept::Files, Concept::Knowledge),
        (Concept::Knowledge, Concept::Memory),
        (Concept::Memory, Concept::Chronicle),
    ]
    .into_iter()
    .map(|(source, target)| BackboneEdge::new(layer_id(source), layer_id(target), 0.6))
    .collect()
}

/// Roles with the largest total contribution, ties broken by id.
pub fn top_roles(snapshot: &Snapshot, limit: usize) -> Vec<&RoleCounts> {
    let mut roles = snapshot
        .roles
        .iter()
        .filter(|role| role.total() > 0)
        .collect::<Vec<_>>();
    roles.sort_by(|a, b| b.total().cmp(&a.total()).then_with(|| a.id.cmp(&b.id)));
    roles.truncate(limit);
    roles
}

pub fn build(snapshot: &Snapshot, language: Language, config: &LayoutConfig) -> GraphInput {
    let mut entities = vec![hub_entity(snapshot)];
    let mut relations = Vec::new();

    let max_layer = Concept::ALL
        .iter()
        .map(|concept| snapshot.layers.get(*concept))
        .max()
        .unwrap_or(0)
        .max(1);
    for concept in Concept::ALL {
        let count = snapshot.layers.get(concept);
        let id = layer_id(concept);
        entities.push(
            Entity::primary(id.clone(), concept.name(language), count as f64)
                .with_sublabel(concept.key())
                .with_facet(concept.name(language), count as f64),
        );
        relations.push(Relation::structural(
            HUB_ID,
            id,
            count as f64 / max_layer as f64,
        ));
    }

    let bridges = top_roles(snapshot, config.top_roles);
    let max_contribution = bridges
        .iter()
        .flat_map(|role| Concept::ALL.iter().filter_map(|concept| role.contribution(*concept)))
        .max()
        .unwrap_or(0)
        .max(1);

    for role in bridges {
        let id = bridge_id(&role.id);
        let mut entity = Entity::secondary(
            id.clone(),
            Layer::Satellites,
            role.display_name(),
            role.total() as f64,
        )
        .with_sublabel(format!("{} {}", role.total(), term(Term::Contribution, language)));

        for concept in Concept::ALL {
            let Some(count) = role.contribution(concept).filter(|count| *count > 0) else {
                continue;
            };
            entity = entity.with_facet(concept.name(language), count as f64);
            relations.push(Relation::derived(
                layer_id(concept),
                id.clone(),
                Layer::Satellites,
                count as f64 / max_contribution as f64,
                Attachment::OrbitIndependent,
            ));
        }
        entities.push(entity);
    }

    GraphInput {
        entities,
        relations,
        config: config.clone().with_backbone(backbone()),
    }
}
