//! Pre-aggregated counts the graphs are built from.
//!
//! The snapshot is produced by whatever store the host talks to; this crate
//! only reads it from JSON, validates it and replaces the previous one.

mod load;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graphs::{Concept, Language};

pub use load::{load_snapshot, parse_snapshot};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("role at position {0} has an empty id")]
    EmptyRoleId(usize),
    #[error("role id `{0}` appears more than once")]
    DuplicateRole(String),
    #[error("session `{session}` is linked to unknown role `{role}`")]
    UnknownSessionRole { role: String, session: String },
    #[error("session link for role `{0}` has an empty session id")]
    EmptySessionId(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerCounts {
    pub memory: u64,
    pub knowledge: u64,
    pub prompts: u64,
    pub tools: u64,
    pub files: u64,
    pub chronicle: u64,
}

impl LayerCounts {
    pub fn get(&self, concept: Concept) -> u64 {
        match concept {
            Concept::Memory => self.memory,
            Concept::Knowledge => self.knowledge,
            Concept::Prompts => self.prompts,
            Concept::Tools => self.tools,
            Concept::Files => self.files,
            Concept::Chronicle => self.chronicle,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCounts {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub memories: u64,
    #[serde(default)]
    pub knowledge: u64,
    #[serde(default)]
    pub prompts: u64,
}

impl RoleCounts {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn total(&self) -> u64 {
        self.memories
            .saturating_add(self.knowledge)
            .saturating_add(self.prompts)
    }

    /// Count this role contributes into a conceptual layer, if it feeds that layer at all.
    pub fn contribution(&self, concept: Concept) -> Option<u64> {
        match concept {
            Concept::Memory => Some(self.memories),
            Concept::Knowledge => Some(self.knowledge),
            Concept::Prompts => Some(self.prompts),
            Concept::Tools | Concept::Files | Concept::Chronicle => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLink {
    pub role: String,
    pub session: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub messages: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_product")]
    pub product: String,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub layers: LayerCounts,
    pub roles: Vec<RoleCounts>,
    #[serde(default)]
    pub shared_sessions: Vec<SessionLink>,
    #[serde(default)]
    pub sessions: Vec<SessionInfo>,
}

fn default_product() -> String {
    "Atlas".to_owned()
}

impl Snapshot {
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut role_ids = HashSet::with_capacity(self.roles.len());
        for (position, role) in self.roles.iter().enumerate() {
            if role.id.trim().is_empty() {
                return Err(SnapshotError::EmptyRoleId(position));
            }
            if !role_ids.insert(role.id.as_str()) {
                return Err(SnapshotError::DuplicateRole(role.id.clone()));
            }
        }

        for link in &self.shared_sessions {
            if !role_ids.contains(link.role.as_str()) {
                return Err(SnapshotError::UnknownSessionRole {
                    role: link.role.clone(),
                    session: link.session.clone(),
                });
            }
            if link.session.trim().is_empty() {
                return Err(SnapshotError::EmptySessionId(link.role.clone()));
            }
        }

        Ok(())
    }

    pub fn session_info(&self) -> HashMap<&str, &SessionInfo> {
        self.sessions
            .iter()
            .map(|session| (session.id.as_str(), session))
            .collect()
    }

    /// Built-in snapshot shown when no file is given.
    pub fn demo() -> Self {
        let role = |id: &str, name: &str, memories: u64, knowledge: u64, prompts: u64| RoleCounts {
            id: id.to_owned(),
            name: name.to_owned(),
            memories,
            knowledge,
            prompts,
        };
        let link = |role: &str, session: &str| SessionLink {
            role: role.to_owned(),
            session: session.to_owned(),
        };
        let session = |id: &str, title: &str, messages: u64| SessionInfo {
            id: id.to_owned(),
            title: Some(title.to_owned()),
            messages,
        };

        Self {
            product: default_product(),
            language: Some(Language::En),
            layers: LayerCounts {
                memory: 148,
                knowledge: 412,
                prompts: 57,
                tools: 12,
                files: 89,
                chronicle: 230,
            },
            roles: vec![
                role("analyst", "Research Analyst", 42, 120, 9),
                role("writer", "Technical Writer", 31, 64, 14),
                role("coder", "Code Reviewer", 27, 88, 11),
                role("tutor", "Language Tutor", 18, 0, 6),
                role("planner", "Trip Planner", 12, 23, 4),
                role("critic", "Film Critic", 9, 41, 3),
                role("coach", "Fitness Coach", 9, 0, 10),
            ],
            shared_sessions: vec![
                link("analyst", "s-roadmap"),
                link("writer", "s-roadmap"),
                link("coder", "s-review"),
                link("writer", "s-review"),
                link("tutor", "s-travel"),
                link("planner", "s-travel"),
                link("critic", "s-weekend"),
            ],
            sessions: vec![
                session("s-roadmap", "Q3 roadmap", 64),
                session("s-review", "API review", 38),
                session("s-travel", "Lisbon trip", 21),
                session("s-weekend", "Weekend picks", 7),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_snapshot_is_valid() {
        assert_eq!(Snapshot::demo().validate(), Ok(()));
    }

    #[test]
    fn duplicate_roles_are_rejected() {
        let mut snapshot = Snapshot::demo();
        let first = snapshot.roles[0].clone();
        snapshot.roles.push(first);
        assert_eq!(
            snapshot.validate(),
            Err(SnapshotError::DuplicateRole("analyst".to_owned()))
        );
    }

    #[test]
    fn links_to_unknown_roles_are_rejected() {
        let mut snapshot = Snapshot::demo();
        snapshot.shared_sessions.push(SessionLink {
            role: "ghost".to_owned(),
            session: "s-roadmap".to_owned(),
        });
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::UnknownSessionRole { .. })
        ));
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let role = RoleCounts {
            id: "r9".to_owned(),
            name: "  ".to_owned(),
            memories: 1,
            knowledge: 2,
            prompts: 3,
        };
        assert_eq!(role.display_name(), "r9");
        assert_eq!(role.total(), 6);
        assert_eq!(role.contribution(Concept::Tools), None);
    }
}
