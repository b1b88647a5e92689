use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::template::{OperatorSpec, Template};

/// Name of the category that always exists and backs unmatched domains.
pub const DEFAULT_CATEGORY: &str = "default";

/// A named group of operators gated by domain keywords.
///
/// Keyword matching is case-insensitive substring matching against the
/// session domain; the `default` category has no keywords and is chosen when
/// nothing else matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub keywords: FxHashSet<String>,
    pub templates: Vec<Template>,
}

impl Category {
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_CATEGORY
    }
}

/// Raw config shape for one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub operators: Vec<OperatorSpec>,
}

impl CategoryConfig {
    /// Normalize every operator entry; keywords are kept as written.
    pub fn normalize(self) -> Category {
        Category {
            name: self.name,
            keywords: self.keywords.into_iter().collect(),
            templates: self
                .operators
                .into_iter()
                .map(OperatorSpec::normalize)
                .collect(),
        }
    }
}

/// Raw config shape for a whole catalog: an ordered list of categories.
/// The list order is the repository iteration order seen by the matcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub categories: Vec<CategoryConfig>,
}
