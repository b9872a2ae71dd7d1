use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::engine::Layer;

use super::GraphKind;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Zh => "中文",
        }
    }
}

/// One of the six fixed conceptual layers of the connections screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Concept {
    Memory,
    Knowledge,
    Prompts,
    Tools,
    Files,
    Chronicle,
}

impl Concept {
    pub const ALL: [Concept; 6] = [
        Concept::Memory,
        Concept::Knowledge,
        Concept::Prompts,
        Concept::Tools,
        Concept::Files,
        Concept::Chronicle,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Knowledge => "knowledge",
            Self::Prompts => "prompts",
            Self::Tools => "tools",
            Self::Files => "files",
            Self::Chronicle => "chronicle",
        }
    }

    pub fn name(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Memory, Language::En) => "Role Memory",
            (Self::Memory, Language::Zh) => "角色记忆",
            (Self::Knowledge, Language::En) => "Knowledge",
            (Self::Knowledge, Language::Zh) => "知识库",
            (Self::Prompts, Language::En) => "Prompts",
            (Self::Prompts, Language::Zh) => "提示词",
            (Self::Tools, Language::En) => "Tools",
            (Self::Tools, Language::Zh) => "工具",
            (Self::Files, Language::En) => "Files",
            (Self::Files, Language::Zh) => "文件",
            (Self::Chronicle, Language::En) => "Chronicle",
            (Self::Chronicle, Language::Zh) => "编年史",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Term {
    Memories,
    Knowledge,
    Prompts,
    Messages,
    KnowledgeMarker,
    Session,
    Contribution,
}

pub fn term(term: Term, language: Language) -> &'static str {
    match (term, language) {
        (Term::Memories, Language::En) => "memories",
        (Term::Memories, Language::Zh) => "记忆",
        (Term::Knowledge, Language::En) => "knowledge chunks",
        (Term::Knowledge, Language::Zh) => "知识片段",
        (Term::Prompts, Language::En) => "prompts",
        (Term::Prompts, Language::Zh) => "提示词",
        (Term::Messages, Language::En) => "messages",
        (Term::Messages, Language::Zh) => "消息",
        (Term::KnowledgeMarker, Language::En) => "knowledge",
        (Term::KnowledgeMarker, Language::Zh) => "知识",
        (Term::Session, Language::En) => "session",
        (Term::Session, Language::Zh) => "会话",
        (Term::Contribution, Language::En) => "contributions",
        (Term::Contribution, Language::Zh) => "贡献",
    }
}

/// Legend text of a togglable layer as it appears on a given screen.
pub fn layer_name(kind: GraphKind, layer: Layer, language: Language) -> &'static str {
    let english = match (kind, layer) {
        (_, Layer::Hub) => "Hub",
        (GraphKind::RoleMemory, Layer::Primary) => "Roles",
        (GraphKind::RoleMemory, Layer::Markers) => "Knowledge markers",
        (GraphKind::RoleMemory, Layer::Satellites) => "Sessions",
        (GraphKind::RoleMemory, Layer::Cross) => "Shared-session links",
        (GraphKind::Connections, Layer::Primary) => "Conceptual layers",
        (GraphKind::Connections, Layer::Markers) => "Markers",
        (GraphKind::Connections, Layer::Satellites) => "Bridge roles",
        (GraphKind::Connections, Layer::Cross) => "Shared-role links",
        (_, Layer::Backbone) => "Backbone",
    };
    if language == Language::En {
        return english;
    }
    match (kind, layer) {
        (_, Layer::Hub) => "中心",
        (GraphKind::RoleMemory, Layer::Primary) => "角色",
        (GraphKind::RoleMemory, Layer::Markers) => "知识标记",
        (GraphKind::RoleMemory, Layer::Satellites) => "会话",
        (GraphKind::RoleMemory, Layer::Cross) => "共享会话连线",
        (GraphKind::Connections, Layer::Primary) => "概念层",
        (GraphKind::Connections, Layer::Markers) => "标记",
        (GraphKind::Connections, Layer::Satellites) => "桥接角色",
        (GraphKind::Connections, Layer::Cross) => "共享角色连线",
        (_, Layer::Backbone) => "主干",
    }
}
