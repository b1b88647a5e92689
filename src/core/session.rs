/// Session state: one domain, one history tree, lifetime usage counts and
/// the manual phase latch. Owned by the caller and threaded through the
/// engine; there is no hidden global.

use rustc_hash::FxHashMap;

use crate::core::history::{HistoryError, HistoryNode, HistoryTree};
use crate::core::phase;
use crate::schema::snapshot::SessionSnapshot;
use crate::schema::template::Phase;

#[derive(Debug, Clone)]
pub struct Session {
    domain: String,
    tree: HistoryTree,
    usage_counts: FxHashMap<String, u32>,
    manual_phase_override: Option<Phase>,
}

impl Session {
    pub fn new(domain: &str) -> Self {
        Session {
            domain: domain.to_string(),
            tree: HistoryTree::new(),
            usage_counts: FxHashMap::default(),
            manual_phase_override: None,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn tree(&self) -> &HistoryTree {
        &self.tree
    }

    /// Effective phase, recomputed from the live tree on every call so it
    /// can never go stale against the path.
    pub fn phase(&self) -> Phase {
        phase::phase_for(self.tree.step_count(), self.manual_phase_override)
    }

    pub fn phase_override(&self) -> Option<Phase> {
        self.manual_phase_override
    }

    pub fn step_count(&self) -> usize {
        self.tree.step_count()
    }

    pub fn path(&self) -> Vec<String> {
        self.tree.path_from_root()
    }

    pub fn last_choice(&self) -> Option<&str> {
        self.tree.last_choice()
    }

    pub fn usage_count(&self, key: &str) -> u32 {
        self.usage_counts.get(key).copied().unwrap_or(0)
    }

    pub fn usage_counts(&self) -> &FxHashMap<String, u32> {
        &self.usage_counts
    }

    /// Records an accepted choice. `template_key` is present for generated
    /// options and absent for custom free-text entries, which leave the
    /// usage counts alone.
    pub fn accept(&mut self, text: &str, template_key: Option<&str>) -> &HistoryNode {
        if let Some(key) = template_key {
            *self.usage_counts.entry(key.to_string()).or_insert(0) += 1;
        }
        self.tree.accept(text)
    }

    pub fn navigate_to(&mut self, node_id: &str) -> bool {
        self.tree.navigate_to(node_id)
    }

    /// Latch semantics: requesting the phase that is already in effect
    /// returns control to the automatic depth-based progression, any other
    /// request pins the session to that phase.
    pub fn toggle_phase_override(&mut self, requested: Phase) {
        if self.phase() == requested {
            self.manual_phase_override = None;
        } else {
            self.manual_phase_override = Some(requested);
        }
    }

    /// Clears the tree, the usage counts and the latch, keeping the domain.
    pub fn reset(&mut self) {
        self.tree = HistoryTree::new();
        self.usage_counts.clear();
        self.manual_phase_override = None;
    }

    /// Plain-data image of the session, ready for serde.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            domain: self.domain.clone(),
            root: self.tree.serialize(),
            current_node_id: self.tree.current_id().map(str::to_string),
            usage_counts: self.usage_counts.clone(),
            current_phase: self.phase(),
            manual_phase_override: self.manual_phase_override,
        }
    }

    /// Rebuilds a session from its snapshot. Tree structure is validated;
    /// the stored phase is ignored in favor of recomputation, so a stale
    /// value cannot survive the round trip.
    pub fn restore(snapshot: SessionSnapshot) -> Result<Self, HistoryError> {
        let tree = HistoryTree::from_snapshot(
            snapshot.root.as_ref(),
            snapshot.current_node_id.as_deref(),
        )?;
        Ok(Session {
            domain: snapshot.domain,
            tree,
            usage_counts: snapshot.usage_counts,
            manual_phase_override: snapshot.manual_phase_override,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_starts_in_exploration() {
        let session = Session::new("coffee shops");
        assert_eq!(session.domain(), "coffee shops");
        assert_eq!(session.step_count(), 0);
        assert_eq!(session.phase(), Phase::Exploration);
        assert!(session.path().is_empty());
        assert_eq!(session.last_choice(), None);
    }

    #[test]
    fn accept_tracks_usage_only_for_template_choices() {
        let mut session = Session::new("d");
        session.accept("generated", Some("op-key"));
        session.accept("generated again", Some("op-key"));
        session.accept("my own idea", None);

        assert_eq!(session.usage_count("op-key"), 2);
        assert_eq!(session.usage_count("other"), 0);
        assert_eq!(session.usage_counts().len(), 1);
        assert_eq!(session.step_count(), 3);
    }

    #[test]
    fn phase_advances_with_path_depth() {
        let mut session = Session::new("d");
        for i in 0..4 {
            assert_eq!(session.phase(), Phase::Exploration, "step {}", i);
            session.accept(&format!("choice {}", i), None);
        }
        assert_eq!(session.phase(), Phase::Refinement);
        for i in 4..8 {
            session.accept(&format!("choice {}", i), None);
        }
        assert_eq!(session.phase(), Phase::Validation);
    }

    #[test]
    fn phase_recomputes_after_navigation() {
        let mut session = Session::new("d");
        let root = session.accept("root", None).id.clone();
        for i in 0..6 {
            session.accept(&format!("choice {}", i), None);
        }
        assert_eq!(session.phase(), Phase::Refinement);

        session.navigate_to(&root);
        assert_eq!(session.step_count(), 1);
        assert_eq!(session.phase(), Phase::Exploration);
    }

    #[test]
    fn override_latch_toggles_back_to_automatic() {
        let mut session = Session::new("d");
        assert_eq!(session.phase(), Phase::Exploration);

        session.toggle_phase_override(Phase::Validation);
        assert_eq!(session.phase(), Phase::Validation);
        assert_eq!(session.phase_override(), Some(Phase::Validation));

        // Requesting the pinned phase releases the latch.
        session.toggle_phase_override(Phase::Validation);
        assert_eq!(session.phase(), Phase::Exploration);
        assert_eq!(session.phase_override(), None);
    }

    #[test]
    fn override_latch_replaces_a_different_pin() {
        let mut session = Session::new("d");
        session.toggle_phase_override(Phase::Validation);
        session.toggle_phase_override(Phase::Refinement);
        assert_eq!(session.phase(), Phase::Refinement);
        assert_eq!(session.phase_override(), Some(Phase::Refinement));
    }

    #[test]
    fn requesting_the_automatic_phase_is_a_noop_latch() {
        let mut session = Session::new("d");
        session.toggle_phase_override(Phase::Exploration);
        assert_eq!(session.phase_override(), None);
        assert_eq!(session.phase(), Phase::Exploration);
    }

    #[test]
    fn reset_clears_everything_but_the_domain() {
        let mut session = Session::new("d");
        session.accept("a", Some("k"));
        session.toggle_phase_override(Phase::Validation);
        session.reset();

        assert_eq!(session.domain(), "d");
        assert_eq!(session.step_count(), 0);
        assert_eq!(session.usage_count("k"), 0);
        assert_eq!(session.phase(), Phase::Exploration);
        assert_eq!(session.phase_override(), None);
    }

    #[test]
    fn snapshot_round_trips_the_full_session() {
        let mut session = Session::new("coffee shops");
        let root = session.accept("root", Some("k1")).id.clone();
        session.accept("left", Some("k2"));
        session.navigate_to(&root);
        session.accept("right", Some("k1"));
        session.toggle_phase_override(Phase::Validation);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.current_phase, Phase::Validation);

        let restored = Session::restore(snapshot).unwrap();
        assert_eq!(restored.domain(), session.domain());
        assert_eq!(restored.path(), session.path());
        assert_eq!(restored.usage_count("k1"), 2);
        assert_eq!(restored.usage_count("k2"), 1);
        assert_eq!(restored.phase_override(), Some(Phase::Validation));
        assert_eq!(restored.phase(), Phase::Validation);
    }

    #[test]
    fn restore_rejects_a_corrupt_tree() {
        let mut session = Session::new("d");
        session.accept("root", None);

        let mut snapshot = session.snapshot();
        snapshot.current_node_id = Some("n999".to_string());
        assert!(Session::restore(snapshot).is_err());
    }
}
