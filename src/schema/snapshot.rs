use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::template::Phase;

/// Serialized history node: a nested shape preserving ids, texts, and child
/// order. Parent links are not stored; they are rebuilt on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: String,
    pub choice_text: String,
    #[serde(default)]
    pub children: Vec<NodeSnapshot>,
}

/// Whole-session persistence record exchanged with storage collaborators.
/// The engine only converts to and from this value; where it is written is
/// the host's business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub domain: String,
    pub root: Option<NodeSnapshot>,
    pub current_node_id: Option<String>,
    #[serde(default)]
    pub usage_counts: FxHashMap<String, u32>,
    pub current_phase: Phase,
    pub manual_phase_override: Option<Phase>,
}
