/// Phase progression — derives the ideation phase from path depth.

use crate::schema::template::Phase;

/// Boundary below which a session is still exploring.
const REFINEMENT_AT: usize = 4;
/// Boundary at which a session moves to validation.
const VALIDATION_AT: usize = 8;

/// Phase for a path of `step_count` accepted choices. A manual override wins
/// unconditionally; otherwise steps 0–3 explore, 4–7 refine, 8+ validate.
///
/// Pure function: recompute after every tree mutation or override change.
pub fn phase_for(step_count: usize, manual_override: Option<Phase>) -> Phase {
    if let Some(phase) = manual_override {
        return phase;
    }
    if step_count < REFINEMENT_AT {
        Phase::Exploration
    } else if step_count < VALIDATION_AT {
        Phase::Refinement
    } else {
        Phase::Validation
    }
}
