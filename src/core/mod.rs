//! The suggestion machinery: catalog, matching, selection, expansion,
//! ranking, and the branching session history.

pub mod catalog;
pub mod engine;
pub mod expand;
pub mod history;
pub mod matcher;
pub mod phase;
pub mod ranker;
pub mod selector;
pub mod session;
