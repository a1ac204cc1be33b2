//! Dialog controllers for conversion, cloud sync and protected files
//!
//! Each dialog owns an [`OperationSlot`], so a second start while the first
//! is running is rejected and a result arriving after `close()` is dropped.
//! A [`DialogCloser`] closes the dialog from another task while a result is
//! being awaited.

use crate::error::{Result, SynapseError};
use crate::ops::{
    available_targets, CloudProvider, CloudSync, ConversionRequest, ConvertedFile, FormatConversion,
    OperationSlot, OperationTimings, PasswordVerification, SlotCloser, SyncSettings,
};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use synapse_types::Node;
use tracing::info;

/// Cloneable handle that closes a dialog and discards its pending result
#[derive(Debug, Clone)]
pub struct DialogCloser {
    open: Arc<AtomicBool>,
    slot: SlotCloser,
}

impl DialogCloser {
    fn new(open: &Arc<AtomicBool>, slot: SlotCloser) -> Self {
        Self {
            open: Arc::clone(open),
            slot,
        }
    }

    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
        self.slot.close();
    }
}

fn ensure_open(open: &AtomicBool, what: &str) -> Result<()> {
    if open.load(Ordering::SeqCst) {
        Ok(())
    } else {
        Err(SynapseError::ValidationRejected(format!("{} is closed", what)))
    }
}

/// Converts one file to another format
pub struct ConversionDialog {
    file_name: String,
    format: String,
    op: Arc<FormatConversion>,
    slot: OperationSlot<ConvertedFile>,
    open: Arc<AtomicBool>,
    converted: Option<ConvertedFile>,
}

impl ConversionDialog {
    pub fn open(file: &Node, timings: &OperationTimings) -> Self {
        let op = FormatConversion::new(
            timings.conversion_tick(),
            timings.conversion_step,
            timings.conversion_settle(),
        );
        Self {
            file_name: file.name.clone(),
            format: file.extension().unwrap_or_default().to_lowercase(),
            op: Arc::new(op),
            slot: OperationSlot::new(format!("conversion of {}", file.name)),
            open: Arc::new(AtomicBool::new(true)),
            converted: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn current_format(&self) -> &str {
        &self.format
    }

    pub fn targets(&self) -> &'static [&'static str] {
        available_targets(&self.format)
    }

    pub fn is_converting(&self) -> bool {
        self.slot.is_running()
    }

    pub fn progress(&self) -> Option<u8> {
        self.slot.progress()
    }

    pub fn converted(&self) -> Option<&ConvertedFile> {
        self.converted.as_ref()
    }

    pub fn start(&mut self, target: &str) -> Result<()> {
        ensure_open(&self.open, "Conversion dialog")?;
        let request = ConversionRequest::for_file(self.file_name.clone(), target);
        if !request.is_supported() {
            return Err(SynapseError::ValidationRejected(format!(
                "{} cannot be converted to {}",
                self.file_name, request.to
            )));
        }
        self.slot.start(Arc::clone(&self.op), request)
    }

    /// Wait for the conversion; on success the dialog closes
    pub async fn settle_with_progress(&mut self, on_progress: impl FnMut(u8)) -> Option<Result<ConvertedFile>> {
        let outcome = self.slot.settle_with_progress(on_progress).await?;
        if let Ok(ref converted) = outcome {
            info!("Converted {} to {}", converted.source, converted.file_name);
            self.converted = Some(converted.clone());
            self.open.store(false, Ordering::SeqCst);
        }
        Some(outcome)
    }

    pub async fn settle(&mut self) -> Option<Result<ConvertedFile>> {
        self.settle_with_progress(|_| {}).await
    }

    pub fn close(&mut self) {
        self.slot.invalidate();
        self.open.store(false, Ordering::SeqCst);
    }

    pub fn closer(&self) -> DialogCloser {
        DialogCloser::new(&self.open, self.slot.closer())
    }
}

/// Cloud provider connections and manual sync
pub struct SyncDialog {
    settings: SyncSettings,
    op: Arc<CloudSync>,
    slot: OperationSlot<DateTime<Utc>>,
    open: Arc<AtomicBool>,
}

impl SyncDialog {
    pub fn open(settings: SyncSettings, timings: &OperationTimings) -> Self {
        Self {
            settings,
            op: Arc::new(CloudSync::new(timings.sync_delay())),
            slot: OperationSlot::new("cloud sync"),
            open: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    pub fn is_syncing(&self) -> bool {
        self.slot.is_running()
    }

    /// Connect or disconnect a provider; returns the new state
    pub fn toggle(&mut self, provider: CloudProvider) -> bool {
        self.settings.toggle(provider)
    }

    pub fn sync_now(&mut self) -> Result<()> {
        ensure_open(&self.open, "Sync dialog")?;
        if !self.settings.has_connection() {
            return Err(SynapseError::ValidationRejected(
                "Connect a cloud provider before syncing".to_string(),
            ));
        }
        let providers = self.settings.connected.iter().copied().collect();
        self.slot.start(Arc::clone(&self.op), providers)
    }

    /// Wait for the sync and record its completion time
    pub async fn settle(&mut self) -> Option<Result<DateTime<Utc>>> {
        let outcome = self.slot.settle().await?;
        if let Ok(at) = outcome {
            self.settings.last_sync = Some(at);
        }
        Some(outcome)
    }

    pub fn close(&mut self) {
        self.slot.invalidate();
        self.open.store(false, Ordering::SeqCst);
    }

    pub fn closer(&self) -> DialogCloser {
        DialogCloser::new(&self.open, self.slot.closer())
    }
}

/// Unlocks a password-protected file
pub struct PasswordDialog {
    file_name: String,
    op: Arc<PasswordVerification>,
    slot: OperationSlot<()>,
    open: Arc<AtomicBool>,
    unlocked: bool,
    error: Option<String>,
}

impl PasswordDialog {
    pub fn open(file_name: impl Into<String>, verification: PasswordVerification) -> Self {
        let file_name = file_name.into();
        Self {
            slot: OperationSlot::new(format!("unlock of {}", file_name)),
            file_name,
            op: Arc::new(verification),
            open: Arc::new(AtomicBool::new(true)),
            unlocked: false,
            error: None,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn is_verifying(&self) -> bool {
        self.slot.is_running()
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Inline error shown under the password field; gone once closed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().filter(|_| self.is_open())
    }

    pub fn submit(&mut self, password: &str) -> Result<()> {
        ensure_open(&self.open, "Password dialog")?;
        if password.trim().is_empty() {
            let message = "Password is required".to_string();
            self.error = Some(message.clone());
            return Err(SynapseError::ValidationRejected(message));
        }
        self.slot.start(Arc::clone(&self.op), password.to_string())?;
        self.error = None;
        Ok(())
    }

    /// Wait for verification. Success closes the dialog; failure keeps it
    /// open with the reason as the inline error.
    pub async fn settle(&mut self) -> Option<Result<()>> {
        let outcome = self.slot.settle().await?;
        match outcome {
            Ok(()) => {
                info!("Unlocked {}", self.file_name);
                self.unlocked = true;
                self.open.store(false, Ordering::SeqCst);
            }
            Err(ref e) => self.error = Some(e.to_string()),
        }
        Some(outcome)
    }

    pub fn close(&mut self) {
        self.slot.invalidate();
        self.open.store(false, Ordering::SeqCst);
        self.error = None;
    }

    pub fn closer(&self) -> DialogCloser {
        DialogCloser::new(&self.open, self.slot.closer())
    }
}
