//! Per-file upload state.

use serde::{Deserialize, Serialize};

use drivedesk_core::error::AppError;
use drivedesk_core::result::AppResult;
use drivedesk_core::types::FolderId;

/// Status of one queued upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// Queued, not yet attempted.
    Pending,
    /// Chunks are being sent.
    Uploading,
    /// Accepted by the backend.
    Completed,
    /// Failed; the batch stopped here.
    Error,
}

impl TransferStatus {
    /// Return the status as a display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Uploading => "uploading",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }

    /// Allowed moves: `Pending -> Uploading -> {Completed | Error}`.
    pub fn can_transition_to(&self, next: TransferStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Uploading)
                | (Self::Uploading, Self::Completed)
                | (Self::Uploading, Self::Error)
        )
    }
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One file in an upload batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTask {
    /// File name as submitted.
    pub file_name: String,
    /// Byte size as submitted.
    pub size_bytes: u64,
    /// Folder the batch was sent to; `None` until the batch runs.
    pub folder_id: Option<FolderId>,
    status: TransferStatus,
    /// Last reported percent for this file.
    pub progress: u8,
    /// Failure description when `status == Error`.
    pub error: Option<String>,
}

impl TransferTask {
    /// A new pending task.
    pub fn new(file_name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
            folder_id: None,
            status: TransferStatus::Pending,
            progress: 0,
            error: None,
        }
    }

    /// Current status.
    pub fn status(&self) -> TransferStatus {
        self.status
    }

    /// Whether this task describes the same file (name and size).
    pub fn same_file(&self, file_name: &str, size_bytes: u64) -> bool {
        self.file_name == file_name && self.size_bytes == size_bytes
    }

    /// Move to `next`, refusing any regression.
    pub fn advance(&mut self, next: TransferStatus) -> AppResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::conflict(format!(
                "Upload of '{}' cannot go from {} to {}",
                self.file_name, self.status, next
            )));
        }
        self.status = next;
        if next == TransferStatus::Completed {
            self.progress = 100;
        }
        Ok(())
    }

    /// Mark the task failed with `reason`.
    pub fn fail(&mut self, reason: impl Into<String>) -> AppResult<()> {
        self.advance(TransferStatus::Error)?;
        self.error = Some(reason.into());
        Ok(())
    }
}
