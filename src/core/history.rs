/// Branching history of accepted choices.
///
/// Nodes live in an id-indexed arena. Children hold owned id lists and the
/// parent link is an id too, so walking up for path reconstruction never
/// competes with the ownership of subtrees.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::schema::snapshot::NodeSnapshot;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("duplicate node id `{0}` in history snapshot")]
    DuplicateId(String),
    #[error("current node id `{0}` is not present in the restored tree")]
    UnknownCurrentId(String),
    #[error("snapshot names a current node but carries no root")]
    CurrentWithoutRoot,
    #[error("snapshot carries a root but no current node")]
    MissingCurrent,
}

/// One accepted choice. Immutable after creation except for gaining children.
#[derive(Debug, Clone)]
pub struct HistoryNode {
    pub id: String,
    pub choice_text: String,
    pub parent: Option<String>,
    pub children: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HistoryTree {
    nodes: FxHashMap<String, HistoryNode>,
    root_id: Option<String>,
    current_id: Option<String>,
    counter: u64,
}

impl HistoryTree {
    pub fn new() -> Self {
        HistoryTree::default()
    }

    /// Rebuilds a tree from its snapshot form. The nested structure is the
    /// source of truth; parent links and the id counter are reconstructed,
    /// and structural defects in the snapshot are rejected rather than
    /// repaired.
    pub fn from_snapshot(
        root: Option<&NodeSnapshot>,
        current_id: Option<&str>,
    ) -> Result<Self, HistoryError> {
        let mut tree = HistoryTree::new();
        match (root, current_id) {
            (None, None) => Ok(tree),
            (None, Some(_)) => Err(HistoryError::CurrentWithoutRoot),
            (Some(_), None) => Err(HistoryError::MissingCurrent),
            (Some(snapshot), Some(id)) => {
                tree.insert_subtree(snapshot, None)?;
                tree.root_id = Some(snapshot.id.clone());
                if !tree.nodes.contains_key(id) {
                    return Err(HistoryError::UnknownCurrentId(id.to_string()));
                }
                tree.current_id = Some(id.to_string());
                Ok(tree)
            }
        }
    }

    fn insert_subtree(
        &mut self,
        snapshot: &NodeSnapshot,
        parent: Option<&str>,
    ) -> Result<(), HistoryError> {
        if self.nodes.contains_key(&snapshot.id) {
            return Err(HistoryError::DuplicateId(snapshot.id.clone()));
        }
        let node = HistoryNode {
            id: snapshot.id.clone(),
            choice_text: snapshot.choice_text.clone(),
            parent: parent.map(str::to_string),
            children: snapshot.children.iter().map(|c| c.id.clone()).collect(),
        };
        self.bump_counter(&snapshot.id);
        self.nodes.insert(snapshot.id.clone(), node);
        for child in &snapshot.children {
            self.insert_subtree(child, Some(&snapshot.id))?;
        }
        Ok(())
    }

    /// Generated ids are `n0`, `n1`, ... — restoring a snapshot advances the
    /// counter past any id of that shape so later accepts cannot collide.
    /// The counter saturates at the top of the range; `fresh_id` wraps past
    /// it and skips ids that are already taken.
    fn bump_counter(&mut self, id: &str) {
        if let Some(digits) = id.strip_prefix('n') {
            if let Ok(k) = digits.parse::<u64>() {
                if k >= self.counter {
                    self.counter = k.saturating_add(1);
                }
            }
        }
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = format!("n{}", self.counter);
            self.counter = self.counter.wrapping_add(1);
            if !self.nodes.contains_key(&id) {
                return id;
            }
        }
    }

    /// Records an accepted choice under the current node (or as the root of
    /// an empty tree) and moves the current pointer onto it.
    pub fn accept(&mut self, choice_text: &str) -> &HistoryNode {
        let id = self.fresh_id();
        let parent = self.current_id.clone();
        let node = HistoryNode {
            id: id.clone(),
            choice_text: choice_text.to_string(),
            parent: parent.clone(),
            children: Vec::new(),
        };
        match &parent {
            Some(parent_id) => {
                if let Some(p) = self.nodes.get_mut(parent_id) {
                    p.children.push(id.clone());
                }
            }
            None => self.root_id = Some(id.clone()),
        }
        self.current_id = Some(id.clone());
        self.nodes.entry(id).or_insert(node)
    }

    /// Moves the current pointer to `id` if it is reachable from the root.
    /// An unknown id changes nothing and reports `false`.
    pub fn navigate_to(&mut self, id: &str) -> bool {
        let Some(root) = self.root_id.as_deref() else {
            return false;
        };
        let mut stack: Vec<&str> = vec![root];
        let mut found = false;
        while let Some(next) = stack.pop() {
            if next == id {
                found = true;
                break;
            }
            if let Some(node) = self.nodes.get(next) {
                stack.extend(node.children.iter().map(String::as_str));
            }
        }
        if found {
            self.current_id = Some(id.to_string());
        }
        found
    }

    /// Choice texts from the root down to the current node.
    pub fn path_from_root(&self) -> Vec<String> {
        let mut texts = Vec::new();
        let mut cursor = self.current_id.as_deref();
        while let Some(id) = cursor {
            let Some(node) = self.nodes.get(id) else {
                break;
            };
            texts.push(node.choice_text.clone());
            cursor = node.parent.as_deref();
        }
        texts.reverse();
        texts
    }

    /// Accepted choices on the path from root to current; 0 when empty.
    pub fn step_count(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.current_id.as_deref();
        while let Some(id) = cursor {
            let Some(node) = self.nodes.get(id) else {
                break;
            };
            count += 1;
            cursor = node.parent.as_deref();
        }
        count
    }

    /// Text of the most recently accepted choice, if any.
    pub fn last_choice(&self) -> Option<&str> {
        let id = self.current_id.as_deref()?;
        self.nodes.get(id).map(|n| n.choice_text.as_str())
    }

    pub fn get(&self, id: &str) -> Option<&HistoryNode> {
        self.nodes.get(id)
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    pub fn root_id(&self) -> Option<&str> {
        self.root_id.as_deref()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nested snapshot of the whole tree, or `None` while empty. Parent
    /// links are implicit in the nesting and restored on the way back in.
    pub fn serialize(&self) -> Option<NodeSnapshot> {
        self.root_id.as_deref().and_then(|r| self.snapshot_node(r))
    }

    fn snapshot_node(&self, id: &str) -> Option<NodeSnapshot> {
        let node = self.nodes.get(id)?;
        let children = node
            .children
            .iter()
            .filter_map(|c| self.snapshot_node(c))
            .collect();
        Some(NodeSnapshot {
            id: node.id.clone(),
            choice_text: node.choice_text.clone(),
            children,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_accept_becomes_root_and_current() {
        let mut tree = HistoryTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.step_count(), 0);
        assert!(tree.path_from_root().is_empty());

        let id = tree.accept("open a cafe").id.clone();
        assert_eq!(tree.root_id(), Some(id.as_str()));
        assert_eq!(tree.current_id(), Some(id.as_str()));
        assert_eq!(tree.step_count(), 1);
        assert_eq!(tree.last_choice(), Some("open a cafe"));
    }

    #[test]
    fn accept_chain_builds_an_ordered_path() {
        let mut tree = HistoryTree::new();
        tree.accept("first");
        tree.accept("second");
        tree.accept("third");

        assert_eq!(tree.step_count(), 3);
        assert_eq!(
            tree.path_from_root(),
            vec!["first".to_string(), "second".to_string(), "third".to_string()]
        );
    }

    #[test]
    fn navigating_back_then_accepting_branches_the_tree() {
        let mut tree = HistoryTree::new();
        let root = tree.accept("root").id.clone();
        tree.accept("left");
        assert!(tree.navigate_to(&root));
        tree.accept("right");

        let children = tree.get(&root).map(|n| n.children.clone()).unwrap_or_default();
        assert_eq!(children.len(), 2);
        let texts: Vec<&str> = children
            .iter()
            .filter_map(|c| tree.get(c))
            .map(|n| n.choice_text.as_str())
            .collect();
        assert_eq!(texts, vec!["left", "right"]);
        assert_eq!(tree.path_from_root(), vec!["root".to_string(), "right".to_string()]);
    }

    #[test]
    fn navigate_to_unknown_id_is_a_noop() {
        let mut tree = HistoryTree::new();
        tree.accept("root");
        let current = tree.current_id().map(str::to_string);
        let count = tree.node_count();

        assert!(!tree.navigate_to("n999"));
        assert_eq!(tree.current_id().map(str::to_string), current);
        assert_eq!(tree.node_count(), count);

        let empty = &mut HistoryTree::new();
        assert!(!empty.navigate_to("n0"));
    }

    #[test]
    fn serialize_round_trips_shape_ids_and_path() {
        let mut tree = HistoryTree::new();
        let root = tree.accept("root").id.clone();
        tree.accept("a");
        tree.navigate_to(&root);
        tree.accept("b");
        tree.accept("b2");

        let snapshot = tree.serialize();
        let current = tree.current_id().map(str::to_string);
        let restored =
            HistoryTree::from_snapshot(snapshot.as_ref(), current.as_deref()).unwrap();

        assert_eq!(restored.node_count(), tree.node_count());
        assert_eq!(restored.root_id(), tree.root_id());
        assert_eq!(restored.current_id(), tree.current_id());
        assert_eq!(restored.path_from_root(), tree.path_from_root());
        assert_eq!(restored.serialize(), snapshot);

        let restored_root = restored.get(&root).unwrap();
        assert_eq!(restored_root.parent, None);
        assert_eq!(restored_root.children, tree.get(&root).unwrap().children);
    }

    #[test]
    fn empty_snapshot_restores_an_empty_tree() {
        let tree = HistoryTree::from_snapshot(None, None).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.current_id(), None);
    }

    #[test]
    fn restore_rejects_duplicate_ids() {
        let snapshot = NodeSnapshot {
            id: "n0".to_string(),
            choice_text: "root".to_string(),
            children: vec![NodeSnapshot {
                id: "n0".to_string(),
                choice_text: "child".to_string(),
                children: Vec::new(),
            }],
        };
        let err = HistoryTree::from_snapshot(Some(&snapshot), Some("n0")).unwrap_err();
        assert!(matches!(err, HistoryError::DuplicateId(id) if id == "n0"));
    }

    #[test]
    fn restore_rejects_inconsistent_pointers() {
        let snapshot = NodeSnapshot {
            id: "n0".to_string(),
            choice_text: "root".to_string(),
            children: Vec::new(),
        };

        let err = HistoryTree::from_snapshot(Some(&snapshot), Some("n7")).unwrap_err();
        assert!(matches!(err, HistoryError::UnknownCurrentId(id) if id == "n7"));

        let err = HistoryTree::from_snapshot(Some(&snapshot), None).unwrap_err();
        assert!(matches!(err, HistoryError::MissingCurrent));

        let err = HistoryTree::from_snapshot(None, Some("n0")).unwrap_err();
        assert!(matches!(err, HistoryError::CurrentWithoutRoot));
    }

    #[test]
    fn accept_after_restore_never_reuses_an_id() {
        let snapshot = NodeSnapshot {
            id: "n0".to_string(),
            choice_text: "root".to_string(),
            children: vec![NodeSnapshot {
                id: "n4".to_string(),
                choice_text: "child".to_string(),
                children: Vec::new(),
            }],
        };
        let mut tree = HistoryTree::from_snapshot(Some(&snapshot), Some("n4")).unwrap();
        let id = tree.accept("next").id.clone();
        assert_eq!(id, "n5");
        assert_eq!(tree.step_count(), 3);
    }

    #[test]
    fn accept_still_works_after_restoring_the_largest_numeric_id() {
        let top = format!("n{}", u64::MAX);
        let snapshot = NodeSnapshot {
            id: top.clone(),
            choice_text: "root".to_string(),
            children: Vec::new(),
        };
        let mut tree =
            HistoryTree::from_snapshot(Some(&snapshot), Some(top.as_str())).unwrap();

        let id = tree.accept("next").id.clone();
        assert_eq!(id, "n0");
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.step_count(), 2);
    }

    #[test]
    fn foreign_ids_restore_and_coexist_with_generated_ones() {
        let snapshot = NodeSnapshot {
            id: "imported-root".to_string(),
            choice_text: "root".to_string(),
            children: Vec::new(),
        };
        let mut tree =
            HistoryTree::from_snapshot(Some(&snapshot), Some("imported-root")).unwrap();
        let id = tree.accept("next").id.clone();
        assert_eq!(id, "n0");
        assert!(tree.navigate_to("imported-root"));
    }
}
