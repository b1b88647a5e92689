/// Template catalog: categories loaded from RON, validated once, then
/// queried read-only for the rest of the session.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::schema::category::{CatalogConfig, Category, DEFAULT_CATEGORY};
use crate::schema::template::{Difficulty, Phase, Template};

/// Share of the `default` category blended into non-default candidate pools.
pub const DEFAULT_MIX_SHARE: f32 = 0.2;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog has no `default` category")]
    MissingDefault,
    #[error("duplicate category `{0}` in catalog")]
    DuplicateCategory(String),
    #[error("template `{text}` in category `{category}` has invalid weight {weight}")]
    InvalidWeight {
        category: String,
        text: String,
        weight: f32,
    },
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    categories: Vec<Category>,
}

impl TemplateCatalog {
    /// Validates and wraps an ordered category list. Category order is
    /// preserved; the matcher reports matches in this order.
    pub fn from_categories(categories: Vec<Category>) -> Result<Self, CatalogError> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for category in &categories {
            if !seen.insert(&category.name) {
                return Err(CatalogError::DuplicateCategory(category.name.clone()));
            }
            for template in &category.templates {
                if !template.weight.is_finite() || template.weight <= 0.0 {
                    return Err(CatalogError::InvalidWeight {
                        category: category.name.clone(),
                        text: template.text.clone(),
                        weight: template.weight,
                    });
                }
            }
        }
        if !seen.contains(DEFAULT_CATEGORY) {
            return Err(CatalogError::MissingDefault);
        }
        Ok(TemplateCatalog { categories })
    }

    pub fn parse_ron(source: &str) -> Result<Self, CatalogError> {
        let config: CatalogConfig = ron::from_str(source)?;
        let categories = config
            .categories
            .into_iter()
            .map(|c| c.normalize())
            .collect();
        Self::from_categories(categories)
    }

    pub fn load_from_ron(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let source = fs::read_to_string(path)?;
        Self::parse_ron(&source)
    }

    /// Loading never fails the session: an unreadable or malformed catalog
    /// degrades to the built-in fallback.
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Self {
        Self::load_from_ron(path).unwrap_or_else(|_| Self::fallback())
    }

    /// Minimal built-in catalog: one `default` category of broadly
    /// applicable prompts covering all three phases.
    pub fn fallback() -> Self {
        let exploration = [
            "What if you combined {domain} with something unexpected?",
            "How would {target} approach {domain}?",
            "What would {domain} look like with {constraint}?",
            "Challenge the assumption that {assumption}",
        ];
        let refinement = [
            "Strip {last} down to its single most useful part",
            "Scale {last} by {multiplier} and see what breaks",
            "List {number} ways {last} could fail",
        ];
        let validation = [
            "Sketch the smallest test that would prove {last} works",
            "Find {number} people who would use {last} this week",
            "Name the one result that would kill {last}",
        ];

        let mut templates: Vec<Template> =
            exploration.into_iter().map(Template::bare).collect();
        templates.extend(refinement.into_iter().map(|text| Template {
            phase: Phase::Refinement,
            ..Template::bare(text)
        }));
        templates.extend(validation.into_iter().map(|text| Template {
            difficulty: Difficulty::High,
            phase: Phase::Validation,
            ..Template::bare(text)
        }));

        let default = Category {
            name: DEFAULT_CATEGORY.to_string(),
            keywords: FxHashSet::default(),
            templates,
        };
        TemplateCatalog {
            categories: vec![default],
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Candidate templates for the given category names, in category order.
    ///
    /// When `default` is not among the names, a small random slice of the
    /// default category is blended in so niche domains still see generic
    /// prompts. The slice is drawn without repeats.
    pub fn candidates_for(&self, names: &[&str], rng: &mut StdRng) -> Vec<Template> {
        let mut candidates: Vec<Template> = Vec::new();
        for name in names {
            if let Some(category) = self.category(name) {
                candidates.extend(category.templates.iter().cloned());
            }
        }

        let wants_default = names.contains(&DEFAULT_CATEGORY);
        if !wants_default {
            if let Some(default) = self.category(DEFAULT_CATEGORY) {
                let take =
                    (default.templates.len() as f32 * DEFAULT_MIX_SHARE).round() as usize;
                candidates.extend(
                    default
                        .templates
                        .choose_multiple(rng, take)
                        .cloned(),
                );
            }
        }
        candidates
    }
}
