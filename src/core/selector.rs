/// Weighted template selection with lifetime-frequency bias.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::schema::template::Template;

/// Frequency penalty: selection weight decays as an operator accumulates
/// accepted uses, suppressing favorites without ever excluding them.
pub fn adjusted_weight(weight: f32, usage_count: u32) -> f32 {
    weight / (1.0 + usage_count as f32 * 0.1)
}

/// Draw one template with probability proportional to its adjusted weight.
///
/// Keys already drawn in the current batch are avoided until they exhaust the
/// pool, after which reuse is allowed. Returns `None` only for an empty
/// candidate list.
pub fn select<'a>(
    candidates: &'a [Template],
    used_in_batch: &FxHashSet<String>,
    usage_counts: &FxHashMap<String, u32>,
    rng: &mut StdRng,
) -> Option<&'a Template> {
    if candidates.is_empty() {
        return None;
    }

    let fresh: Vec<&Template> = candidates
        .iter()
        .filter(|t| !used_in_batch.contains(t.key()))
        .collect();
    let pool: Vec<&Template> = if fresh.is_empty() {
        candidates.iter().collect()
    } else {
        fresh
    };

    let usage_of =
        |t: &Template| -> u32 { usage_counts.get(t.key()).copied().unwrap_or(0) };

    let total: f32 = pool
        .iter()
        .map(|&t| adjusted_weight(t.weight, usage_of(t)))
        .sum();

    // Degenerate all-zero (or otherwise unusable) totals: uniform draw.
    if !total.is_finite() || total <= 0.0 {
        return pool.choose(rng).copied();
    }

    let mut roll = rng.gen_range(0.0..total);
    for &template in &pool {
        let w = adjusted_weight(template.weight, usage_of(template));
        if roll < w {
            return Some(template);
        }
        roll -= w;
    }

    // Floating-point accumulation can let the roll spill past the last bucket.
    pool.last().copied()
}
