use serde::{Deserialize, Serialize};

/// How demanding an operator is to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

impl Difficulty {
    /// Returns the label string for this difficulty (e.g., "low").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// The ideation phase an operator is written for.
///
/// Sessions open wide (exploration), narrow down (refinement), and finish by
/// stress-testing what survived (validation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Exploration,
    Refinement,
    Validation,
}

impl Default for Phase {
    fn default() -> Self {
        Self::Exploration
    }
}

impl Phase {
    /// Returns the label string for this phase (e.g., "exploration").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Exploration => "exploration",
            Self::Refinement => "refinement",
            Self::Validation => "validation",
        }
    }

    /// The difficulty that tracks session progress: early phases favor easy
    /// moves, late phases favor hard ones.
    pub fn progressive_difficulty(&self) -> Difficulty {
        match self {
            Self::Exploration => Difficulty::Low,
            Self::Refinement => Difficulty::Medium,
            Self::Validation => Difficulty::High,
        }
    }
}

/// A normalized suggestion operator.
///
/// `text` may contain `{placeholder}` tokens resolved at render time. The raw
/// text doubles as the operator's key for usage counting and batch
/// bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub text: String,
    pub weight: f32,
    pub difficulty: Difficulty,
    pub phase: Phase,
}

impl Template {
    /// A bare pattern with the documented defaults: weight 1.0, medium
    /// difficulty, exploration phase.
    pub fn bare(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            weight: 1.0,
            difficulty: Difficulty::Medium,
            phase: Phase::Exploration,
        }
    }

    /// Usage-count and deduplication key: the raw, unexpanded pattern text.
    pub fn key(&self) -> &str {
        &self.text
    }
}

/// Config-side operator entry: either a bare pattern string or a full record
/// with per-field defaults. Normalized into a [`Template`] once at load time;
/// nothing downstream ever branches on the config shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OperatorSpec {
    Bare(String),
    Full {
        text: String,
        #[serde(default = "default_weight")]
        weight: f32,
        #[serde(default)]
        difficulty: Difficulty,
        #[serde(default)]
        phase: Phase,
    },
}

fn default_weight() -> f32 {
    1.0
}

impl OperatorSpec {
    /// Total, side-effect-free normalization into a [`Template`].
    pub fn normalize(self) -> Template {
        match self {
            Self::Bare(text) => Template::bare(text),
            Self::Full {
                text,
                weight,
                difficulty,
                phase,
            } => Template {
                text,
                weight,
                difficulty,
                phase,
            },
        }
    }
}
