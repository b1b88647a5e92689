//! Passive data model: serde types crossing the host boundary.

pub mod category;
pub mod snapshot;
pub mod suggestion;
pub mod template;
