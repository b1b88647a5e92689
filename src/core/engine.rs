/// The main ideation pipeline: domain → ranked suggestion batch.
///
/// Wires together category matching, phase derivation, weighted selection,
/// placeholder expansion and ranking around a caller-owned session.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashSet;

use crate::core::catalog::TemplateCatalog;
use crate::core::expand;
use crate::core::history::HistoryError;
use crate::core::matcher;
use crate::core::ranker::{self, GeneratedOption};
use crate::core::selector;
use crate::core::session::Session;
use crate::packs;
use crate::schema::snapshot::SessionSnapshot;
use crate::schema::suggestion::{Suggestion, SuggestionBatch};
use crate::schema::template::Phase;

/// Selector draws allowed per requested option before a batch is returned
/// short. Guards against template sets too small to fill a batch.
const ATTEMPT_BUDGET_PER_OPTION: usize = 10;

/// The top-level suggestion engine. Built via `IdeationEngine::builder()`.
pub struct IdeationEngine {
    catalog: TemplateCatalog,
    session: Session,
    seed: u64,
    generation_count: u64,
}

/// Builder for constructing an `IdeationEngine`.
pub struct IdeationEngineBuilder {
    domain: String,
    catalog_path: Option<String>,
    seed: u64,
    /// Directly provided catalog (for testing without files).
    catalog: Option<TemplateCatalog>,
}

impl IdeationEngine {
    pub fn builder(domain: &str) -> IdeationEngineBuilder {
        IdeationEngineBuilder {
            domain: domain.to_string(),
            catalog_path: None,
            seed: 0,
            catalog: None,
        }
    }

    /// Engine over the built-in starter catalog with the default seed.
    pub fn new(domain: &str) -> Self {
        Self::builder(domain).build()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    /// Generates up to `count` ranked options for the current session state.
    ///
    /// Rendered texts within one batch are unique. When the candidate pool
    /// cannot produce `count` distinct strings inside the attempt budget the
    /// batch comes back short rather than failing.
    pub fn suggest(&mut self, count: usize) -> SuggestionBatch {
        let mut rng =
            StdRng::seed_from_u64(self.seed.wrapping_add(self.generation_count));
        self.generation_count += 1;

        let phase = self.session.phase();
        let matched = matcher::match_domain(self.session.domain(), self.catalog.categories());
        let candidates = self.catalog.candidates_for(&matched, &mut rng);

        let mut used_in_batch: FxHashSet<String> = FxHashSet::default();
        let mut seen_texts: FxHashSet<String> = FxHashSet::default();
        let mut options: Vec<GeneratedOption> = Vec::with_capacity(count);

        let budget = count.saturating_mul(ATTEMPT_BUDGET_PER_OPTION);
        for _ in 0..budget {
            if options.len() >= count {
                break;
            }
            let Some(template) = selector::select(
                &candidates,
                &used_in_batch,
                self.session.usage_counts(),
                &mut rng,
            ) else {
                break;
            };
            used_in_batch.insert(template.key().to_string());

            let text = expand::expand(
                &template.text,
                self.session.domain(),
                self.session.last_choice(),
                &mut rng,
            );
            if seen_texts.insert(text.clone()) {
                options.push(GeneratedOption {
                    text,
                    template: template.clone(),
                });
            }
        }

        ranker::rank(&mut options, phase, self.session.usage_counts());

        SuggestionBatch {
            options: options
                .into_iter()
                .map(|o| Suggestion {
                    template_key: o.key().to_string(),
                    text: o.text,
                })
                .collect(),
            phase,
            path: self.session.path(),
        }
    }

    /// Accepts a generated option, charging its template's usage count.
    pub fn accept_suggestion(&mut self, suggestion: &Suggestion) -> String {
        self.session
            .accept(&suggestion.text, Some(&suggestion.template_key))
            .id
            .clone()
    }

    /// Accepts caller-written free text. No template usage is charged.
    pub fn accept_custom(&mut self, text: &str) -> String {
        self.session.accept(text, None).id.clone()
    }

    pub fn navigate_to(&mut self, node_id: &str) -> bool {
        self.session.navigate_to(node_id)
    }

    pub fn toggle_phase_override(&mut self, requested: Phase) {
        self.session.toggle_phase_override(requested);
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Swaps in a session restored from a snapshot. The catalog, seed and
    /// generation counter are untouched.
    pub fn restore(&mut self, snapshot: SessionSnapshot) -> Result<(), HistoryError> {
        self.session = Session::restore(snapshot)?;
        Ok(())
    }
}

impl IdeationEngineBuilder {
    /// RON catalog to load at build time. Load failure falls back to the
    /// built-in minimal catalog instead of failing the build.
    pub fn catalog_path(mut self, path: &str) -> Self {
        self.catalog_path = Some(path.to_string());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Provide a catalog directly (for testing without files).
    pub fn with_catalog(mut self, catalog: TemplateCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn build(self) -> IdeationEngine {
        let catalog = match (self.catalog, self.catalog_path) {
            (Some(catalog), _) => catalog,
            (None, Some(path)) => TemplateCatalog::load_or_fallback(path),
            (None, None) => packs::starter_catalog(),
        };
        IdeationEngine {
            catalog,
            session: Session::new(&self.domain),
            seed: self.seed,
            generation_count: 0,
        }
    }
}
