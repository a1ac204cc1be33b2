//! Simulated cloud storage sync

use super::{OperationKind, ProgressReporter, SimulatedOperation};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    OneDrive,
    GoogleDrive,
}

impl CloudProvider {
    pub const ALL: [CloudProvider; 2] = [CloudProvider::OneDrive, CloudProvider::GoogleDrive];

    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::OneDrive => "onedrive",
            CloudProvider::GoogleDrive => "googledrive",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CloudProvider::OneDrive => "OneDrive",
            CloudProvider::GoogleDrive => "Google Drive",
        }
    }
}

impl std::fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for CloudProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "onedrive" => Ok(CloudProvider::OneDrive),
            "googledrive" | "gdrive" => Ok(CloudProvider::GoogleDrive),
            other => Err(format!("unknown provider '{}' (expected onedrive or googledrive)", other)),
        }
    }
}

/// Which providers are connected and when the last sync finished
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSettings {
    #[serde(default)]
    pub connected: BTreeSet<CloudProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
}

impl SyncSettings {
    /// Connect or disconnect a provider; returns the new connection state
    pub fn toggle(&mut self, provider: CloudProvider) -> bool {
        if self.connected.remove(&provider) {
            false
        } else {
            self.connected.insert(provider);
            true
        }
    }

    pub fn is_connected(&self, provider: CloudProvider) -> bool {
        self.connected.contains(&provider)
    }

    pub fn has_connection(&self) -> bool {
        !self.connected.is_empty()
    }

    pub fn status_label(&self, provider: CloudProvider) -> &'static str {
        if self.is_connected(provider) {
            "Connected"
        } else {
            "Not connected"
        }
    }

    pub fn last_sync_label(&self) -> String {
        match self.last_sync {
            Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => "Never".to_string(),
        }
    }
}

/// Succeeds with the completion time after a fixed delay
#[derive(Debug, Clone)]
pub struct CloudSync {
    delay: Duration,
}

impl CloudSync {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl SimulatedOperation for CloudSync {
    type Input = Vec<CloudProvider>;
    type Output = DateTime<Utc>;

    fn kind(&self) -> OperationKind {
        OperationKind::CloudSync
    }

    async fn run(
        &self,
        providers: Vec<CloudProvider>,
        _progress: &ProgressReporter<DateTime<Utc>>,
    ) -> Result<DateTime<Utc>, String> {
        if providers.is_empty() {
            return Err("No cloud provider connected".to_string());
        }
        tokio::time::sleep(self.delay).await;
        Ok(Utc::now())
    }
}
