//! In-memory workspace tree
//!
//! The tree is built once from a caller-supplied nested [`Node`] structure.
//! Lookups go through an id index; traversal is depth-first pre-order, which
//! is also the top-to-bottom display order.

use crate::error::{Result, SynapseError};
use std::collections::HashMap;
use synapse_types::{FileMetadata, Node};
use tracing::warn;

/// Workspace tree with an id index and a metadata side-table
#[derive(Debug, Clone)]
pub struct TreeModel {
    root: Node,
    /// Child-index path from the root to each node
    index: HashMap<String, Vec<usize>>,
    /// Per-file metadata keyed by node id
    metadata: HashMap<String, FileMetadata>,
}

impl TreeModel {
    /// Build a tree without metadata
    ///
    /// # Errors
    ///
    /// Returns an error if an id appears twice anywhere in the tree, or if a
    /// file node carries children.
    pub fn new(root: Node) -> Result<Self> {
        Self::with_metadata(root, HashMap::new())
    }

    /// Build a tree and join the metadata side-table to it.
    ///
    /// Entries keyed by unknown ids or by folder ids are dropped.
    pub fn with_metadata(root: Node, metadata: HashMap<String, FileMetadata>) -> Result<Self> {
        let mut index = HashMap::new();
        let mut path = Vec::new();
        index_node(&root, &mut path, &mut index)?;

        let mut tree = Self {
            root,
            index,
            metadata: HashMap::with_capacity(metadata.len()),
        };

        for (id, meta) in metadata {
            match tree.find_by_id(&id).map(Node::is_file) {
                Some(true) => {
                    tree.metadata.insert(id, meta);
                }
                Some(false) => warn!("Ignoring metadata for folder {}", id),
                None => warn!("Ignoring metadata for unknown node {}", id),
            }
        }

        Ok(tree)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_id(&self) -> &str {
        &self.root.id
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// No entries below the root.
    ///
    /// The root always counts toward [`len`](Self::len), so an empty tree
    /// still has `len() == 1`.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a node by id
    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        let path = self.index.get(id)?;
        let mut node = &self.root;
        for &i in path {
            node = node.children.get(i)?;
        }
        Some(node)
    }

    /// Metadata for a file, if any was supplied
    pub fn metadata(&self, id: &str) -> Option<&FileMetadata> {
        self.metadata.get(id)
    }

    /// Folders on the path from the root down to `id`, root first.
    ///
    /// The node itself is not included; the root has no ancestors.
    pub fn ancestors_of(&self, id: &str) -> Option<Vec<&Node>> {
        let path = self.index.get(id)?;
        let mut ancestors = Vec::with_capacity(path.len());
        let mut node = &self.root;
        for &i in path {
            ancestors.push(node);
            node = node.children.get(i)?;
        }
        Some(ancestors)
    }

    /// Fresh pre-order traversal from the root
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(&self.root, 0)],
            path: Vec::new(),
        }
    }
}

fn index_node(
    node: &Node,
    path: &mut Vec<usize>,
    index: &mut HashMap<String, Vec<usize>>,
) -> Result<()> {
    if index.contains_key(&node.id) {
        return Err(SynapseError::DuplicateNodeId(node.id.clone()));
    }
    if node.is_file() && !node.children.is_empty() {
        return Err(SynapseError::FileWithChildren(node.id.clone()));
    }
    index.insert(node.id.clone(), path.clone());

    for (i, child) in node.children.iter().enumerate() {
        path.push(i);
        index_node(child, path, index)?;
        path.pop();
    }
    Ok(())
}

/// One step of a traversal
#[derive(Debug, Clone)]
pub struct WalkEntry<'a> {
    pub node: &'a Node,
    pub depth: usize,
    /// Folders from the root down to the node's parent
    pub ancestors: Vec<&'a Node>,
}

impl<'a> WalkEntry<'a> {
    /// Display path such as `Workspace/Documents/Q4_Report.pdf`
    pub fn display_path(&self) -> String {
        self.ancestors
            .iter()
            .map(|n| n.name.as_str())
            .chain(std::iter::once(self.node.name.as_str()))
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Lazy depth-first pre-order iterator over a [`TreeModel`]
pub struct Walk<'a> {
    stack: Vec<(&'a Node, usize)>,
    path: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = WalkEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;

        // Everything deeper than this node's parent has been fully visited
        self.path.truncate(depth);
        let entry = WalkEntry {
            node,
            depth,
            ancestors: self.path.clone(),
        };

        if node.is_folder() {
            self.path.push(node);
            for child in node.children.iter().rev() {
                self.stack.push((child, depth + 1));
            }
        }

        Some(entry)
    }
}
