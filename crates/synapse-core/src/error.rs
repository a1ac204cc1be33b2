//! Error types for Synapse

use thiserror::Error;

/// Main error type for Synapse.
///
/// Lookups that miss are not errors; they return `Option`.
#[derive(Error, Debug)]
pub enum SynapseError {
    #[error("{0}")]
    ValidationRejected(String),

    #[error("{0}")]
    OperationFailed(String),

    #[error("Operation already running for {0}")]
    AlreadyRunning(String),

    #[error("Duplicate node id: {0}")]
    DuplicateNodeId(String),

    #[error("File node {0} cannot have children")]
    FileWithChildren(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Workspace manifest not found in {0}")]
    ConfigNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<synapse_types::ValidationError> for SynapseError {
    fn from(e: synapse_types::ValidationError) -> Self {
        SynapseError::ValidationRejected(e.0)
    }
}

impl SynapseError {
    /// Whether the error is a user-correctable rejection rather than a fault
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            SynapseError::ValidationRejected(_)
                | SynapseError::OperationFailed(_)
                | SynapseError::AlreadyRunning(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SynapseError>;
