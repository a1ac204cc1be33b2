//! Persisted sign-in state

use crate::error::Result;
use std::path::{Path, PathBuf};
use synapse_types::SessionContext;
use tracing::{debug, warn};

/// Stores the signed-in [`SessionContext`] as JSON at a fixed path
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current session, if any. An unreadable file counts as signed out.
    pub fn load(&self) -> Option<SessionContext> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Ignoring corrupt session file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    pub fn sign_in(&self, user: impl Into<String>) -> Result<SessionContext> {
        let session = SessionContext::new(user);
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&session)?)?;
        debug!("Signed in as {}", session.user);
        Ok(session)
    }

    /// Remove the session. Signing out twice is fine.
    pub fn sign_out(&self) -> Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
