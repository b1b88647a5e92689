//! Ideation Engine — template-driven suggestion generation for idea exploration.
//!
//! Given a free-text domain, repeatedly proposes small batches of randomized
//! "next move" operators drawn from weighted, phase-aware template catalogs,
//! and records accepted choices as a branching history tree that hosts can
//! navigate, snapshot, and restore.

pub mod core;
pub mod packs;
pub mod schema;
