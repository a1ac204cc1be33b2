//! Settings directory and persisted CLI state

use anyhow::{Context, Result};
use std::path::PathBuf;
use synapse_core::ops::SyncSettings;
use synapse_core::SessionStore;

pub struct SettingsManager;

impl SettingsManager {
    /// Get the synapse home directory (~/.synapse)
    pub fn synapse_home() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("SYNAPSE_HOME") {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".synapse"))
    }

    /// Get the session file path
    pub fn session_path() -> Result<PathBuf> {
        Ok(Self::synapse_home()?.join("session.json"))
    }

    /// Get the cloud sync settings path
    pub fn sync_path() -> Result<PathBuf> {
        Ok(Self::synapse_home()?.join("sync.json"))
    }

    pub fn session_store() -> Result<SessionStore> {
        Ok(SessionStore::new(Self::session_path()?))
    }

    /// Load sync settings, defaulting when none were saved
    pub fn load_sync() -> Result<SyncSettings> {
        let path = Self::sync_path()?;
        if !path.exists() {
            return Ok(SyncSettings::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read sync settings from {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse sync settings from {:?}", path))
    }

    pub fn save_sync(settings: &SyncSettings) -> Result<()> {
        let path = Self::sync_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(settings).context("Failed to serialize sync settings")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write sync settings to {:?}", path))?;
        Ok(())
    }
}
