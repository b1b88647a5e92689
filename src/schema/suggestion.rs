use serde::{Deserialize, Serialize};

use super::template::Phase;

/// One presentable option: rendered text plus the key of the operator that
/// produced it. The key travels back on acceptance so usage counting can
/// attribute the choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub template_key: String,
}

/// A generated batch plus the context a host needs to present it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionBatch {
    /// Options in presentation order (highest ranked first).
    pub options: Vec<Suggestion>,
    pub phase: Phase,
    /// Choice texts from the root to the current node.
    pub path: Vec<String>,
}
