//! One in-flight operation per target, with stale-result suppression

use super::{start, OperationHandle, SimulatedOperation};
use crate::error::{Result, SynapseError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

struct Pending<T> {
    generation: u64,
    handle: OperationHandle<T>,
}

/// Holds at most one operation for a single target (a file, a dialog).
///
/// Every `start` is stamped with the slot's generation. Closing the owning
/// surface bumps the generation, so a result that arrives afterwards is
/// dropped instead of being applied.
pub struct OperationSlot<T> {
    target: String,
    generation: Arc<AtomicU64>,
    pending: Option<Pending<T>>,
}

/// Cloneable handle that invalidates a slot's pending result
#[derive(Debug, Clone)]
pub struct SlotCloser {
    target: String,
    generation: Arc<AtomicU64>,
}

impl SlotCloser {
    pub fn close(&self) {
        let next = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Closed {} (generation {})", self.target, next);
    }
}

impl<T: Clone + Send + Sync + 'static> OperationSlot<T> {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn live(&self) -> Option<&Pending<T>> {
        self.pending
            .as_ref()
            .filter(|p| p.generation == self.current_generation())
    }

    /// Start `op` unless a current operation is still running
    pub fn start<O>(&mut self, op: Arc<O>, input: O::Input) -> Result<()>
    where
        O: SimulatedOperation<Output = T>,
    {
        if self.is_running() {
            return Err(SynapseError::AlreadyRunning(self.target.clone()));
        }
        self.pending = Some(Pending {
            generation: self.current_generation(),
            handle: start(op, input),
        });
        Ok(())
    }

    /// A current operation exists and has not reached a terminal state
    pub fn is_running(&self) -> bool {
        self.live().map_or(false, |p| p.handle.is_running())
    }

    pub fn has_pending(&self) -> bool {
        self.live().is_some()
    }

    pub fn progress(&self) -> Option<u8> {
        self.live().and_then(|p| p.handle.progress())
    }

    /// Wait for the pending operation.
    ///
    /// `None` when nothing is pending or the result went stale while waiting.
    pub async fn settle(&mut self) -> Option<Result<T>> {
        self.settle_with_progress(|_| {}).await
    }

    pub async fn settle_with_progress(&mut self, on_progress: impl FnMut(u8)) -> Option<Result<T>> {
        let pending = self.pending.take()?;
        if pending.generation != self.current_generation() {
            debug!("Dropping stale {} operation for {}", pending.handle.kind(), self.target);
            return None;
        }

        let kind = pending.handle.kind();
        let outcome = pending.handle.wait_with_progress(on_progress).await;
        if pending.generation != self.current_generation() {
            debug!("Discarding late {} result for {}", kind, self.target);
            return None;
        }
        Some(outcome)
    }

    /// Forget the pending operation; its result will never be applied
    pub fn invalidate(&mut self) {
        self.closer().close();
        self.pending = None;
    }

    pub fn closer(&self) -> SlotCloser {
        SlotCloser {
            target: self.target.clone(),
            generation: Arc::clone(&self.generation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{OperationKind, ProgressReporter};
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::time::sleep;

    struct Delay;

    #[async_trait]
    impl SimulatedOperation for Delay {
        type Input = u64;
        type Output = u64;

        fn kind(&self) -> OperationKind {
            OperationKind::CloudSync
        }

        async fn run(&self, ms: u64, _progress: &ProgressReporter<u64>) -> std::result::Result<u64, String> {
            sleep(Duration::from_millis(ms)).await;
            Ok(ms)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_rejected_while_running() {
        let mut slot = OperationSlot::new("report.pdf");
        slot.start(Arc::new(Delay), 100).unwrap();
        assert!(slot.is_running());

        let err = slot.start(Arc::new(Delay), 50).unwrap_err();
        assert!(matches!(err, SynapseError::AlreadyRunning(ref t) if t == "report.pdf"));

        assert_eq!(slot.settle().await.unwrap().unwrap(), 100);
        assert!(!slot.has_pending());
        assert!(slot.settle().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_discards_result() {
        let mut slot = OperationSlot::new("sync");
        slot.start(Arc::new(Delay), 100).unwrap();
        slot.invalidate();

        assert!(!slot.is_running());
        assert!(slot.settle().await.is_none());

        // A fresh start is allowed straight away
        slot.start(Arc::new(Delay), 10).unwrap();
        assert_eq!(slot.settle().await.unwrap().unwrap(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_while_settling_drops_late_result() {
        let mut slot = OperationSlot::new("dialog");
        slot.start(Arc::new(Delay), 1000).unwrap();
        let closer = slot.closer();

        let (settled, _) = tokio::join!(slot.settle(), async {
            sleep(Duration::from_millis(10)).await;
            closer.close();
        });
        assert!(settled.is_none());
    }
}
