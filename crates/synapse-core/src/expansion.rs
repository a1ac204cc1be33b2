//! Folder expansion state for the navigation surface

use crate::tree::TreeModel;
use serde::Serialize;
use std::collections::HashSet;
use synapse_types::{Node, NodeKind};

/// Set of folder ids that are currently open.
///
/// Expansion is purely a view concern: it never changes search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    open: HashSet<String>,
}

/// One row of the rendered navigation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleRow {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub depth: usize,
    /// Always false for files
    pub is_open: bool,
}

impl ExpansionState {
    /// Initial state: only the root folder is open
    pub fn new(tree: &TreeModel) -> Self {
        let mut open = HashSet::new();
        open.insert(tree.root_id().to_string());
        Self { open }
    }

    pub fn is_open(&self, folder_id: &str) -> bool {
        self.open.contains(folder_id)
    }

    /// Ids of all open folders
    pub fn open_ids(&self) -> impl Iterator<Item = &str> {
        self.open.iter().map(String::as_str)
    }

    /// Flip a folder between open and closed.
    ///
    /// Unknown ids and file ids are ignored. Returns whether anything changed.
    pub fn toggle(&mut self, tree: &TreeModel, folder_id: &str) -> bool {
        match tree.find_by_id(folder_id) {
            Some(node) if node.is_folder() => {
                if !self.open.remove(folder_id) {
                    self.open.insert(folder_id.to_string());
                }
                true
            }
            _ => false,
        }
    }

    /// Open every folder between the root and `id` so that `id` is visible.
    ///
    /// Returns false when `id` is not in the tree.
    pub fn open_ancestors_of(&mut self, tree: &TreeModel, id: &str) -> bool {
        let Some(ancestors) = tree.ancestors_of(id) else {
            return false;
        };
        for folder in ancestors {
            self.open.insert(folder.id.clone());
        }
        true
    }

    pub fn expand_all(&mut self, tree: &TreeModel) {
        for entry in tree.walk() {
            if entry.node.is_folder() {
                self.open.insert(entry.node.id.clone());
            }
        }
    }

    /// Close everything except the root
    pub fn collapse_all(&mut self, tree: &TreeModel) {
        self.open.clear();
        self.open.insert(tree.root_id().to_string());
    }

    /// Flatten the tree into display rows, descending only into open folders
    pub fn visible_rows(&self, tree: &TreeModel) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        self.collect_visible(tree.root(), 0, &mut rows);
        rows
    }

    fn collect_visible(&self, node: &Node, depth: usize, rows: &mut Vec<VisibleRow>) {
        let is_open = node.is_folder() && self.is_open(&node.id);
        rows.push(VisibleRow {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind,
            depth,
            is_open,
        });

        if is_open {
            for child in &node.children {
                self.collect_visible(child, depth + 1, rows);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_workspace;

    fn sample_tree() -> TreeModel {
        let (root, metadata) = sample_workspace();
        TreeModel::with_metadata(root, metadata).unwrap()
    }

    #[test]
    fn test_root_open_by_default() {
        let tree = sample_tree();
        let state = ExpansionState::new(&tree);
        assert!(state.is_open("root"));
        assert!(!state.is_open("1"));
        assert!(!state.is_open("unknown"));
    }

    #[test]
    fn test_toggle_is_involutive() {
        let tree = sample_tree();
        let mut state = ExpansionState::new(&tree);

        assert!(state.toggle(&tree, "1"));
        assert!(state.is_open("1"));
        assert!(state.toggle(&tree, "1"));
        assert!(!state.is_open("1"));
    }

    #[test]
    fn test_toggle_ignores_files_and_unknown_ids() {
        let tree = sample_tree();
        let mut state = ExpansionState::new(&tree);
        let before = state.clone();

        assert!(!state.toggle(&tree, "1-1"));
        assert!(!state.toggle(&tree, "missing"));
        assert_eq!(state, before);
    }

    #[test]
    fn test_open_ancestors_of() {
        let tree = sample_tree();
        let mut state = ExpansionState::new(&tree);
        state.toggle(&tree, "root");
        assert!(!state.is_open("root"));

        assert!(state.open_ancestors_of(&tree, "2-2"));
        assert!(state.is_open("root"));
        assert!(state.is_open("2"));
        assert!(!state.is_open("1"));

        assert!(!state.open_ancestors_of(&tree, "missing"));
    }

    #[test]
    fn test_visible_rows_follow_expansion() {
        let tree = sample_tree();
        let mut state = ExpansionState::new(&tree);

        let ids: Vec<String> = state.visible_rows(&tree).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["root", "1", "2", "3"]);

        state.toggle(&tree, "2");
        let rows = state.visible_rows(&tree);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "1", "2", "2-1", "2-2", "3"]);
        assert_eq!(rows[3].depth, 2);
        assert!(rows[2].is_open);
        assert!(!rows[1].is_open);
    }

    #[test]
    fn test_expand_and_collapse_all() {
        let tree = sample_tree();
        let mut state = ExpansionState::new(&tree);

        state.expand_all(&tree);
        assert_eq!(state.visible_rows(&tree).len(), tree.len());

        state.collapse_all(&tree);
        assert_eq!(state.open_ids().count(), 1);
        assert!(state.is_open("root"));
    }
}
