//! Simulated file upload
//!
//! An upload never reads the file. It runs two deferred steps: after
//! `processing_delay` a success notice appears, and after a further
//! `refresh_delay` the upload modal closes and the dashboard reloads.
//!
//! Each upload gets a ticket id. A step only applies while its ticket is
//! the live one, so a late timer for a cancelled upload does nothing.

use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

/// Delays between upload steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSchedule {
    pub processing_delay: Duration,
    pub refresh_delay: Duration,
}

impl Default for UploadSchedule {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_millis(1000),
            refresh_delay: Duration::from_millis(2000),
        }
    }
}

impl UploadSchedule {
    pub fn from_millis(processing_ms: u64, refresh_ms: u64) -> Self {
        Self {
            processing_delay: Duration::from_millis(processing_ms),
            refresh_delay: Duration::from_millis(refresh_ms),
        }
    }

    /// Wait before running `step`, counted from the previous step
    pub fn delay(&self, step: UploadStep) -> Duration {
        match step {
            UploadStep::Process => self.processing_delay,
            UploadStep::Refresh => self.refresh_delay,
        }
    }
}

/// Deferred steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStep {
    /// Show the "processed" notice
    Process,
    /// Close the modal and reload the dashboard
    Refresh,
}

impl UploadStep {
    pub const SEQUENCE: [UploadStep; 2] = [UploadStep::Process, UploadStep::Refresh];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadPhase {
    Processing,
    Processed,
    Finished,
    Cancelled,
}

/// One simulated upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadTask {
    id: Uuid,
    file_name: String,
    phase: UploadPhase,
}

impl UploadTask {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.into(),
            phase: UploadPhase::Processing,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    /// Still waiting on a step
    pub fn is_live(&self) -> bool {
        matches!(self.phase, UploadPhase::Processing | UploadPhase::Processed)
    }

    /// Apply `step` if it is the next one due. Returns whether it applied.
    pub fn advance(&mut self, step: UploadStep) -> bool {
        let next = match (self.phase, step) {
            (UploadPhase::Processing, UploadStep::Process) => UploadPhase::Processed,
            (UploadPhase::Processed, UploadStep::Refresh) => UploadPhase::Finished,
            _ => return false,
        };
        tracing::debug!(upload = %self.id, ?step, "Upload step completed");
        self.phase = next;
        true
    }

    /// Stop a live upload. Returns whether anything was cancelled.
    pub fn cancel(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        tracing::debug!(upload = %self.id, "Upload cancelled");
        self.phase = UploadPhase::Cancelled;
        true
    }
}

/// Run the step sequence on tokio timers.
///
/// `complete` is called after each delay and returns whether the upload is
/// still live; a `false` stops the sequence. Dropping the future cancels the
/// remaining steps.
#[cfg(feature = "native")]
pub async fn drive<F>(schedule: UploadSchedule, mut complete: F)
where
    F: FnMut(UploadStep) -> bool,
{
    for step in UploadStep::SEQUENCE {
        tokio::time::sleep(schedule.delay(step)).await;
        if !complete(step) {
            break;
        }
    }
}
