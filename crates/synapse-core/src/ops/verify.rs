//! Simulated password verification for protected files

use super::{OperationKind, ProgressReporter, SimulatedOperation};
use async_trait::async_trait;
use std::time::Duration;

pub const INCORRECT_PASSWORD: &str = "Incorrect password. Please try again.";

/// Rejects one configured credential and accepts everything else
#[derive(Debug, Clone)]
pub struct PasswordVerification {
    rejected_credential: String,
    delay: Duration,
}

impl PasswordVerification {
    pub fn new(rejected_credential: impl Into<String>, delay: Duration) -> Self {
        Self {
            rejected_credential: rejected_credential.into(),
            delay,
        }
    }
}

impl Default for PasswordVerification {
    fn default() -> Self {
        Self::new("wrong", Duration::from_millis(1000))
    }
}

#[async_trait]
impl SimulatedOperation for PasswordVerification {
    type Input = String;
    type Output = ();

    fn kind(&self) -> OperationKind {
        OperationKind::PasswordVerification
    }

    async fn run(&self, credential: String, _progress: &ProgressReporter<()>) -> Result<(), String> {
        tokio::time::sleep(self.delay).await;
        if credential == self.rejected_credential {
            Err(INCORRECT_PASSWORD.to_string())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynapseError;
    use crate::ops::start;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_rejected_credential_fails() {
        let op = Arc::new(PasswordVerification::default());
        let err = start(op, "wrong".to_string()).wait().await.unwrap_err();
        assert!(matches!(err, SynapseError::OperationFailed(ref msg) if msg == INCORRECT_PASSWORD));
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_credentials_succeed() {
        let op = Arc::new(PasswordVerification::default());
        let started = tokio::time::Instant::now();
        assert!(start(op, "hunter2".to_string()).wait().await.is_ok());
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }
}
