/// Built-in catalog packs compiled into the crate.

use crate::core::catalog::TemplateCatalog;

/// Starter catalog source, embedded so the engine works with zero files.
pub const STARTER: &str = include_str!("../catalog_data/starter.ron");

/// Parsed starter catalog.
pub fn starter_catalog() -> TemplateCatalog {
    TemplateCatalog::parse_ron(STARTER).unwrap_or_else(|_| TemplateCatalog::fallback())
}
