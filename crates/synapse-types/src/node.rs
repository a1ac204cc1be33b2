//! Workspace tree nodes

use serde::{Deserialize, Serialize};

/// Whether a node is a file or a folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Folder => "folder",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One file or folder entry in the workspace tree.
///
/// Folder children keep their insertion order, which is also the display
/// order. Files never carry children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a file node
    pub fn file(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    /// Create a folder node with the given children
    pub fn folder(id: impl Into<String>, name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: NodeKind::Folder,
            children,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// Extension of the node name: the text after the last `.`.
    pub fn extension(&self) -> Option<&str> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }

    /// Name without its extension
    pub fn stem(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => stem,
            _ => &self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!(Node::file("1", "Q4_Report.pdf").extension(), Some("pdf"));
        assert_eq!(Node::file("2", "archive.tar.gz").extension(), Some("gz"));
        assert_eq!(Node::file("3", "Makefile").extension(), None);
        assert_eq!(Node::file("4", "trailing.").extension(), None);
    }

    #[test]
    fn test_stem() {
        assert_eq!(Node::file("1", "Budget_2024.xlsx").stem(), "Budget_2024");
        assert_eq!(Node::file("2", "README").stem(), "README");
        assert_eq!(Node::file("3", ".env").stem(), ".env");
    }

    #[test]
    fn test_deserialize_uses_type_tag() {
        let json = r#"{
            "id": "root",
            "name": "Workspace",
            "type": "folder",
            "children": [{ "id": "1", "name": "notes.md", "type": "file" }]
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert!(node.is_folder());
        assert_eq!(node.children.len(), 1);
        assert!(node.children[0].is_file());
        assert!(node.children[0].children.is_empty());
    }

    #[test]
    fn test_empty_folder_has_children_list() {
        let node: Node =
            serde_yaml::from_str("id: empty\nname: Empty\ntype: folder\n").unwrap();
        assert!(node.is_folder());
        assert!(node.children.is_empty());
    }
}
