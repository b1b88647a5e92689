/// Batch scoring and ordering.
///
/// Ranking decides presentation order only. Every generated option survives
/// ranking; low scores sink, they are never dropped.

use rustc_hash::FxHashMap;

use crate::schema::template::{Phase, Template};

/// A rendered option still tied to the template that produced it.
#[derive(Debug, Clone)]
pub struct GeneratedOption {
    pub text: String,
    pub template: Template,
}

impl GeneratedOption {
    pub fn key(&self) -> &str {
        self.template.key()
    }
}

/// Exact phase matches dominate; a template one phase behind the session
/// keeps a small nudge.
fn phase_bonus(template_phase: Phase, current: Phase) -> f32 {
    if template_phase == current {
        return 10.0;
    }
    match (template_phase, current) {
        (Phase::Exploration, Phase::Refinement) => 2.0,
        (Phase::Refinement, Phase::Validation) => 2.0,
        _ => 0.0,
    }
}

/// Difficulty tracks the session arc: easy openers, harder closers.
fn difficulty_bonus(template: &Template, current: Phase) -> f32 {
    if template.difficulty == current.progressive_difficulty() {
        2.0
    } else {
        0.0
    }
}

/// Score for one option against the current session state.
pub fn score(
    option: &GeneratedOption,
    current_phase: Phase,
    usage_counts: &FxHashMap<String, u32>,
) -> f32 {
    let usage = usage_counts.get(option.key()).copied().unwrap_or(0);
    let novelty = (5.0 - usage as f32).max(0.0);
    option.template.weight * 10.0
        + novelty
        + phase_bonus(option.template.phase, current_phase)
        + difficulty_bonus(&option.template, current_phase)
}

/// Orders a batch descending by score. Equal scores keep their generation
/// order.
pub fn rank(
    options: &mut [GeneratedOption],
    current_phase: Phase,
    usage_counts: &FxHashMap<String, u32>,
) {
    options.sort_by(|a, b| {
        score(b, current_phase, usage_counts)
            .total_cmp(&score(a, current_phase, usage_counts))
    });
}
