//! Simulated long-running operations
//!
//! Every backing operation (assistant answer, format conversion, cloud sync,
//! password verification) follows one contract: `start` returns a handle
//! immediately, the operation is `Running` (optionally reporting progress)
//! and reaches exactly one terminal state, `Succeeded` or `Failed`, after a
//! bounded delay. A real backend can replace a simulation by implementing
//! [`SimulatedOperation`] without changing callers.

pub mod answer;
pub mod convert;
pub mod slot;
pub mod sync;
pub mod verify;

pub use answer::{AnswerRequest, AssistantAnswer};
pub use convert::{available_targets, ConversionRequest, ConvertedFile, FormatConversion};
pub use slot::{OperationSlot, SlotCloser};
pub use sync::{CloudProvider, CloudSync, SyncSettings};
pub use verify::{PasswordVerification, INCORRECT_PASSWORD};

use crate::error::{Result, SynapseError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// The four kinds of simulated work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    AssistantAnswer,
    Conversion,
    CloudSync,
    PasswordVerification,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::AssistantAnswer => write!(f, "assistant answer"),
            OperationKind::Conversion => write!(f, "conversion"),
            OperationKind::CloudSync => write!(f, "cloud sync"),
            OperationKind::PasswordVerification => write!(f, "password verification"),
        }
    }
}

/// Observable state of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationState<T> {
    /// In progress; `progress` is only reported by progress-aware operations
    Running { progress: Option<u8> },
    Succeeded(T),
    Failed(String),
}

impl<T> OperationState<T> {
    pub fn is_running(&self) -> bool {
        matches!(self, OperationState::Running { .. })
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_running()
    }

    pub fn progress(&self) -> Option<u8> {
        match self {
            OperationState::Running { progress } => *progress,
            _ => None,
        }
    }
}

/// Delays used by the simulations, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationTimings {
    pub answer_delay_ms: u64,
    pub conversion_tick_ms: u64,
    pub conversion_step: u8,
    pub conversion_settle_ms: u64,
    pub sync_delay_ms: u64,
    pub verify_delay_ms: u64,
}

impl Default for OperationTimings {
    fn default() -> Self {
        Self {
            answer_delay_ms: 1500,
            conversion_tick_ms: 200,
            conversion_step: 10,
            conversion_settle_ms: 500,
            sync_delay_ms: 2000,
            verify_delay_ms: 1000,
        }
    }
}

impl OperationTimings {
    pub fn answer_delay(&self) -> Duration {
        Duration::from_millis(self.answer_delay_ms)
    }

    pub fn conversion_tick(&self) -> Duration {
        Duration::from_millis(self.conversion_tick_ms)
    }

    pub fn conversion_settle(&self) -> Duration {
        Duration::from_millis(self.conversion_settle_ms)
    }

    pub fn sync_delay(&self) -> Duration {
        Duration::from_millis(self.sync_delay_ms)
    }

    pub fn verify_delay(&self) -> Duration {
        Duration::from_millis(self.verify_delay_ms)
    }
}

/// Progress sink handed to a running operation.
///
/// Values are clamped to 0..=100 and never move backwards.
pub struct ProgressReporter<T> {
    tx: watch::Sender<OperationState<T>>,
}

impl<T> ProgressReporter<T> {
    pub fn report(&self, percent: u8) {
        let percent = percent.min(100);
        self.tx.send_modify(|state| {
            if let OperationState::Running { progress } = state {
                *progress = Some(progress.map_or(percent, |current| current.max(percent)));
            }
        });
    }

    pub fn current(&self) -> Option<u8> {
        self.tx.borrow().progress()
    }

    fn finish(&self, state: OperationState<T>) {
        self.tx.send_replace(state);
    }
}

/// Behaviour of one simulated operation
#[async_trait]
pub trait SimulatedOperation: Send + Sync + 'static {
    type Input: Send + 'static;
    type Output: Clone + Send + Sync + 'static;

    fn kind(&self) -> OperationKind;

    /// Do the work. An `Err` carries the user-facing failure reason.
    async fn run(
        &self,
        input: Self::Input,
        progress: &ProgressReporter<Self::Output>,
    ) -> std::result::Result<Self::Output, String>;
}

/// Launch an operation on the current runtime and return at once
pub fn start<O: SimulatedOperation>(op: Arc<O>, input: O::Input) -> OperationHandle<O::Output> {
    let kind = op.kind();
    let (tx, rx) = watch::channel(OperationState::Running { progress: None });
    debug!("Starting {}", kind);

    let task = tokio::spawn(async move {
        let reporter = ProgressReporter { tx };
        let terminal = match op.run(input, &reporter).await {
            Ok(output) => {
                info!("{} succeeded", kind);
                OperationState::Succeeded(output)
            }
            Err(reason) => {
                warn!("{} failed: {}", kind, reason);
                OperationState::Failed(reason)
            }
        };
        reporter.finish(terminal);
    });

    OperationHandle { kind, rx, task }
}

/// Caller's view of a started operation
pub struct OperationHandle<T> {
    kind: OperationKind,
    rx: watch::Receiver<OperationState<T>>,
    task: JoinHandle<()>,
}

impl<T: Clone> OperationHandle<T> {
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn state(&self) -> OperationState<T> {
        self.rx.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.rx.borrow().is_running()
    }

    pub fn progress(&self) -> Option<u8> {
        self.rx.borrow().progress()
    }

    /// Wait for the next state change and return the new state
    pub async fn changed(&mut self) -> OperationState<T> {
        // A closed channel means the final state is already in place
        let _ = self.rx.changed().await;
        self.rx.borrow_and_update().clone()
    }

    /// Wait for the terminal state
    pub async fn wait(self) -> Result<T> {
        self.wait_with_progress(|_| {}).await
    }

    /// Wait for the terminal state, reporting each distinct progress value seen
    pub async fn wait_with_progress(mut self, mut on_progress: impl FnMut(u8)) -> Result<T> {
        let mut last_seen = None;
        loop {
            let state = self.rx.borrow_and_update().clone();
            match state {
                OperationState::Succeeded(output) => return Ok(output),
                OperationState::Failed(reason) => return Err(SynapseError::OperationFailed(reason)),
                OperationState::Running { progress } => {
                    if let Some(p) = progress {
                        if last_seen != Some(p) {
                            last_seen = Some(p);
                            on_progress(p);
                        }
                    }
                }
            }

            if self.rx.changed().await.is_err() {
                // Sender gone: take whatever it left behind
                let final_state = self.rx.borrow().clone();
                return match final_state {
                    OperationState::Succeeded(output) => Ok(output),
                    OperationState::Failed(reason) => Err(SynapseError::OperationFailed(reason)),
                    OperationState::Running { .. } => Err(SynapseError::OperationFailed(format!(
                        "{} ended without a result",
                        self.kind
                    ))),
                };
            }
        }
    }
}

impl<T> Drop for OperationHandle<T> {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            debug!("Detaching {} handle; its result will be discarded", self.kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    struct Countdown;

    #[async_trait]
    impl SimulatedOperation for Countdown {
        type Input = u64;
        type Output = &'static str;

        fn kind(&self) -> OperationKind {
            OperationKind::CloudSync
        }

        async fn run(&self, ms: u64, progress: &ProgressReporter<&'static str>) -> std::result::Result<&'static str, String> {
            progress.report(40);
            // Lower values never move progress backwards
            progress.report(20);
            sleep(Duration::from_millis(ms)).await;
            if ms == 0 {
                return Err("zero delay".to_string());
            }
            Ok("done")
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_returns_running_handle() {
        let handle = start(Arc::new(Countdown), 100);
        assert!(handle.is_running());
        assert_eq!(handle.kind(), OperationKind::CloudSync);
        assert_eq!(handle.wait().await.unwrap(), "done");
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_is_monotonic() {
        let mut handle = start(Arc::new(Countdown), 100);
        let state = handle.changed().await;
        assert_eq!(state.progress(), Some(40));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_terminal() {
        let handle = start(Arc::new(Countdown), 0);
        let err = handle.wait().await.unwrap_err();
        assert!(matches!(err, SynapseError::OperationFailed(ref msg) if msg == "zero delay"));
    }

    #[test]
    fn test_default_timings() {
        let timings = OperationTimings::default();
        assert_eq!(timings.answer_delay(), Duration::from_millis(1500));
        assert_eq!(timings.conversion_step, 10);
    }
}
