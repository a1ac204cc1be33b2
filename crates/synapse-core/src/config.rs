//! Workspace manifest loading and saving

use crate::error::{Result, SynapseError};
use crate::ops::OperationTimings;
use crate::sample::sample_workspace;
use crate::tree::TreeModel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use synapse_types::{FileMetadata, Node};
use tracing::debug;

/// Manifest file names to search for
pub const MANIFEST_FILE_NAMES: &[&str] = &[
    "synapse.workspace.yaml",
    "synapse.workspace.yml",
    "synapse.workspace.json",
];

fn default_rejected_credential() -> String {
    "wrong".to_string()
}

/// A workspace description: the tree, its metadata and simulation timings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceManifest {
    pub root: Node,
    #[serde(default)]
    pub metadata: HashMap<String, FileMetadata>,
    #[serde(default)]
    pub timings: OperationTimings,
    /// Credential the password check refuses
    #[serde(default = "default_rejected_credential")]
    pub rejected_credential: String,
}

impl Default for WorkspaceManifest {
    fn default() -> Self {
        Self::sample()
    }
}

impl WorkspaceManifest {
    /// The built-in sample workspace
    pub fn sample() -> Self {
        let (root, metadata) = sample_workspace();
        Self {
            root,
            metadata,
            timings: OperationTimings::default(),
            rejected_credential: default_rejected_credential(),
        }
    }

    /// Build and validate the tree model
    pub fn tree(&self) -> Result<TreeModel> {
        TreeModel::with_metadata(self.root.clone(), self.metadata.clone())
    }
}

/// Loads manifests from disk, caching by modification time
pub struct ManifestLoader {
    cache: HashMap<PathBuf, CachedManifest>,
}

struct CachedManifest {
    manifest: WorkspaceManifest,
    modified_time: SystemTime,
}

impl Default for ManifestLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map(|e| e == "json").unwrap_or(false)
}

impl ManifestLoader {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Find a manifest file in a directory
    pub fn find_manifest(dir: &Path) -> Option<PathBuf> {
        MANIFEST_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Load a manifest from a file; the tree is validated before it is returned
    pub fn load(&mut self, path: &Path) -> Result<WorkspaceManifest> {
        let modified_time = std::fs::metadata(path)?
            .modified()
            .unwrap_or(SystemTime::UNIX_EPOCH);

        if let Some(cached) = self.cache.get(path) {
            if cached.modified_time == modified_time {
                debug!("Manifest cache hit for {}", path.display());
                return Ok(cached.manifest.clone());
            }
        }

        let content = std::fs::read_to_string(path)?;
        let manifest: WorkspaceManifest = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        if manifest.root.is_file() {
            return Err(SynapseError::Config(format!(
                "workspace root '{}' must be a folder",
                manifest.root.id
            )));
        }
        manifest.tree()?;

        debug!("Loaded manifest {}", path.display());
        self.cache.insert(
            path.to_path_buf(),
            CachedManifest {
                manifest: manifest.clone(),
                modified_time,
            },
        );
        Ok(manifest)
    }

    /// Load the manifest found in a directory
    pub fn load_from_directory(&mut self, dir: &Path) -> Result<(WorkspaceManifest, PathBuf)> {
        let path = Self::find_manifest(dir)
            .ok_or_else(|| SynapseError::ConfigNotFound(dir.display().to_string()))?;
        let manifest = self.load(&path)?;
        Ok((manifest, path))
    }

    /// Load from a manifest file or a directory containing one
    pub fn load_path(&mut self, path: &Path) -> Result<WorkspaceManifest> {
        if path.is_dir() {
            Ok(self.load_from_directory(path)?.0)
        } else {
            self.load(path)
        }
    }

    pub fn save(&self, manifest: &WorkspaceManifest, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(manifest)?
        } else {
            serde_yaml::to_string(manifest)?
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
root:
  id: root
  name: Workspace
  type: folder
  children:
    - id: docs
      name: Docs
      type: folder
      children:
        - id: plan
          name: plan.md
          type: file
metadata:
  plan:
    summary: Quarterly plan
    date_modified: 2024-04-01
    size: 2 KB
timings:
  answer_delay_ms: 10
"#;

    #[test]
    fn test_load_yaml_manifest() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("synapse.workspace.yaml");
        std::fs::write(&path, MANIFEST)?;

        let mut loader = ManifestLoader::new();
        let (manifest, found) = loader.load_from_directory(dir.path())?;
        assert_eq!(found, path);
        assert_eq!(manifest.timings.answer_delay_ms, 10);
        assert_eq!(manifest.timings.sync_delay_ms, 2000);
        assert_eq!(manifest.rejected_credential, "wrong");

        let tree = manifest.tree()?;
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.metadata("plan").map(|m| m.size.as_str()), Some("2 KB"));
        Ok(())
    }

    #[test]
    fn test_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let mut loader = ManifestLoader::new();
        let err = loader.load_from_directory(dir.path()).unwrap_err();
        assert!(matches!(err, SynapseError::ConfigNotFound(_)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("synapse.workspace.json");
        let root = Node::folder("root", "W", vec![Node::file("a", "x.txt"), Node::file("a", "y.txt")]);
        std::fs::write(&path, serde_json::json!({ "root": root }).to_string()).unwrap();

        let err = ManifestLoader::new().load(&path).unwrap_err();
        assert!(matches!(err, SynapseError::DuplicateNodeId(ref id) if id == "a"));
    }

    #[test]
    fn test_save_and_reload_json() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("synapse.workspace.json");

        let mut loader = ManifestLoader::new();
        loader.save(&WorkspaceManifest::sample(), &path)?;
        let reloaded = loader.load_path(&path)?;
        assert_eq!(reloaded, WorkspaceManifest::sample());
        Ok(())
    }
}
