use std::collections::{HashMap, HashSet};

use crate::engine::{Attachment, Entity, Layer, LayoutConfig, Relation};
use crate::snapshot::Snapshot;

use super::{GraphInput, HUB_ID, Language, Term, hub_entity, term};

pub fn role_id(role: &str) -> String {
    format!("role:{role}")
}

pub fn marker_id(role: &str) -> String {
    format!("knowledge:{role}")
}

pub fn session_id(session: &str) -> String {
    format!("session:{session}")
}

/// Roles around the product hub, each with a knowledge marker in its orbit,
/// plus the sessions they are linked to on the outer ring.
pub fn build(snapshot: &Snapshot, language: Language, config: &LayoutConfig) -> GraphInput {
    let mut entities = vec![hub_entity(snapshot)];
    let mut relations = Vec::new();

    let max_total = snapshot.roles.iter().map(|role| role.total()).max().unwrap_or(0).max(1);
    for role in &snapshot.roles {
        let id = role_id(&role.id);
        entities.push(
            Entity::primary(id.clone(), role.display_name(), role.total() as f64)
                .with_sublabel(role.id.clone())
                .with_facet(term(Term::Memories, language), role.memories as f64)
                .with_facet(term(Term::Knowledge, language), role.knowledge as f64)
                .with_facet(term(Term::Prompts, language), role.prompts as f64),
        );
        relations.push(Relation::structural(
            HUB_ID,
            id,
            role.total() as f64 / max_total as f64,
        ));
    }

    let max_knowledge = snapshot
        .roles
        .iter()
        .map(|role| role.knowledge)
        .max()
        .unwrap_or(0)
        .max(1);
    for role in snapshot.roles.iter().filter(|role| role.knowledge > 0) {
        let owner = role_id(&role.id);
        let id = marker_id(&role.id);
        entities.push(
            Entity::secondary(
                id.clone(),
                Layer::Markers,
                format!("{} {}", role.knowledge, term(Term::KnowledgeMarker, language)),
                role.knowledge as f64,
            )
            .with_group_key(owner.clone())
            .with_facet(term(Term::Knowledge, language), role.knowledge as f64),
        );
        relations.push(Relation::derived(
            owner,
            id,
            Layer::Markers,
            role.knowledge as f64 / max_knowledge as f64,
            Attachment::OrbitOfParent,
        ));
    }

    let mut session_order = Vec::new();
    let mut owners: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut seen_links = HashSet::new();
    for link in &snapshot.shared_sessions {
        if !seen_links.insert((link.role.as_str(), link.session.as_str())) {
            continue;
        }
        let entry = owners.entry(link.session.as_str()).or_default();
        if entry.is_empty() {
            session_order.push(link.session.as_str());
        }
        entry.push(link.role.as_str());
    }

    let info = snapshot.session_info();
    let session_metric = |session: &str| {
        let linked = owners.get(session).map_or(0, Vec::len) as u64;
        info.get(session)
            .map(|info| info.messages)
            .filter(|messages| *messages > 0)
            .unwrap_or(linked)
    };
    let max_metric = session_order
        .iter()
        .map(|session| session_metric(session))
        .max()
        .unwrap_or(0)
        .max(1);

    for session in &session_order {
        let id = session_id(session);
        let metric = session_metric(session);
        let label = info
            .get(session)
            .and_then(|info| info.title.clone())
            .unwrap_or_else(|| (*session).to_owned());
        let linked = owners.get(session).map_or(&[][..], Vec::as_slice);

        entities.push(
            Entity::secondary(id.clone(), Layer::Satellites, label, metric as f64)
                .with_sublabel(format!("{} {session}", term(Term::Session, language)))
                .with_facet(term(Term::Messages, language), metric as f64),
        );
        for role in linked {
            relations.push(Relation::derived(
                role_id(role),
                id.clone(),
                Layer::Satellites,
                metric as f64 / max_metric as f64,
                Attachment::OrbitIndependent,
            ));
        }
    }

    GraphInput {
        entities,
        relations,
        config: config.clone().with_backbone(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EntityKind, LayerSet, RelationKind, Viewport, compute_layout};
    use crate::graphs::GraphKind;
    use crate::snapshot::{RoleCounts, SessionLink};

    fn role(id: &str, knowledge: u64) -> RoleCounts {
        RoleCounts {
            id: id.to_owned(),
            name: id.to_uppercase(),
            memories: 2,
            knowledge,
            prompts: 1,
        }
    }

    fn link(role: &str, session: &str) -> SessionLink {
        SessionLink {
            role: role.to_owned(),
            session: session.to_owned(),
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            product: "Atlas".to_owned(),
            language: None,
            layers: Default::default(),
            roles: vec![role("r1", 4), role("r2", 0), role("r3", 1)],
            shared_sessions: vec![link("r1", "s"), link("r2", "s"), link("r1", "s"), link("r3", "t")],
            sessions: Vec::new(),
        }
    }

    #[test]
    fn roles_become_primaries_with_breakdown() {
        let input = build(&snapshot(), Language::En, &LayoutConfig::default());
        let r1 = input.entities.iter().find(|entity| entity.id == "role:r1").unwrap();
        assert_eq!(r1.kind, EntityKind::Primary);
        assert_eq!(r1.magnitude, 7.0);
        assert_eq!(r1.facets.len(), 3);
        assert_eq!(r1.facets[1].value, 4.0);
    }

    #[test]
    fn markers_only_for_roles_with_knowledge() {
        let input = build(&snapshot(), Language::En, &LayoutConfig::default());
        let markers = input
            .entities
            .iter()
            .filter(|entity| entity.layer == Layer::Markers)
            .map(|entity| entity.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(markers, vec!["knowledge:r1", "knowledge:r3"]);
        assert!(input.relations.iter().any(|relation| relation.target == "knowledge:r1"
            && relation.attachment == Attachment::OrbitOfParent));
    }

    #[test]
    fn shared_session_is_one_entity_with_two_owners() {
        let input = build(&snapshot(), Language::En, &LayoutConfig::default());
        let sessions = input
            .entities
            .iter()
            .filter(|entity| entity.id == "session:s")
            .count();
        assert_eq!(sessions, 1);
        let owners = input
            .relations
            .iter()
            .filter(|relation| relation.target == "session:s")
            .count();
        assert_eq!(owners, 2);

        let session = input.entities.iter().find(|entity| entity.id == "session:s").unwrap();
        assert_eq!(session.magnitude, 2.0);
    }

    #[test]
    fn session_messages_override_link_count() {
        let mut snapshot = snapshot();
        snapshot.sessions.push(crate::snapshot::SessionInfo {
            id: "t".to_owned(),
            title: Some("Trip".to_owned()),
            messages: 30,
        });
        let input = build(&snapshot, Language::En, &LayoutConfig::default());
        let session = input.entities.iter().find(|entity| entity.id == "session:t").unwrap();
        assert_eq!(session.label, "Trip");
        assert_eq!(session.magnitude, 30.0);
    }

    #[test]
    fn layout_links_roles_sharing_a_session() {
        let input = build(&snapshot(), Language::En, &LayoutConfig::default());
        let layout = compute_layout(
            &input.entities,
            &input.relations,
            &GraphKind::RoleMemory.layers(),
            Viewport::new(900.0, 700.0),
            &input.config,
        );
        let cross = layout
            .edges
            .iter()
            .filter(|edge| edge.kind() == RelationKind::Cross)
            .map(|edge| (edge.source(), edge.target()))
            .collect::<Vec<_>>();
        assert_eq!(cross, vec![("role:r1", "role:r2")]);

        let without_cross = compute_layout(
            &input.entities,
            &input.relations,
            &[Layer::Primary, Layer::Satellites].into_iter().collect::<LayerSet>(),
            Viewport::new(900.0, 700.0),
            &input.config,
        );
        assert!(without_cross.edges.iter().all(|edge| edge.kind() != RelationKind::Cross));
        assert!(without_cross.node("knowledge:r1").is_none());
    }
}
