//! CLI commands

pub mod ask;
pub mod auth;
pub mod convert;
pub mod formats;
pub mod info;
pub mod open;
pub mod search;
pub mod sync;
pub mod tree;
pub mod unlock;

use crate::config::SettingsManager;
use anyhow::{Context, Result};
use std::path::Path;
use synapse_core::{ManifestLoader, Workspace, WorkspaceManifest};
use tracing::debug;

/// Load the manifest at `path`, or the sample workspace when none is given
pub fn load_manifest(path: Option<&Path>) -> Result<WorkspaceManifest> {
    match path {
        Some(path) => {
            let mut loader = ManifestLoader::new();
            loader
                .load_path(path)
                .with_context(|| format!("Failed to load workspace from {}", path.display()))
        }
        None => {
            debug!("No workspace given, using the sample workspace");
            Ok(WorkspaceManifest::sample())
        }
    }
}

/// Open the workspace for the signed-in user
pub fn open_workspace(path: Option<&Path>) -> Result<Workspace> {
    let session = SettingsManager::session_store()?
        .load()
        .context("Not signed in. Run `synapse login` first")?;
    let manifest = load_manifest(path)?;
    Ok(Workspace::open(&manifest, session)?)
}
