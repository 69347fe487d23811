//! In-process backend implementing every DriveDesk capability trait.
//!
//! The backend answers exactly like the remote one does: transport never
//! fails, and business rule violations come back as failed envelopes
//! carrying a code from [`drivedesk_core::types::codes`].

mod folders;
mod recycle;
mod transfer;

use std::sync::Arc;

use tokio::sync::Mutex;

use drivedesk_core::config::TransferConfig;
use drivedesk_core::types::{Envelope, FileSystemId, codes};

use crate::model::{FileSystemState, Snapshot};

/// In-memory backend guarded by a Tokio mutex.
///
/// Cloning is cheap and every clone shares the same state, so the same
/// backend can be handed to each service as a different capability.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    /// Protected backend state.
    state: Arc<Mutex<Snapshot>>,
    /// Chunk size used to pace transfer progress.
    chunk_size: usize,
    /// Token required by transfer calls; `None` accepts any non-empty token.
    access_token: Option<String>,
}

impl MemoryBackend {
    /// Create a backend over `snapshot`.
    pub fn new(snapshot: Snapshot, config: &TransferConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(snapshot)),
            chunk_size: usize::try_from(config.chunk_size_bytes).unwrap_or(usize::MAX),
            access_token: None,
        }
    }

    /// Require `token` on transfer calls.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// A copy of the current state, for persisting.
    pub async fn snapshot(&self) -> Snapshot {
        self.state.lock().await.clone()
    }

    /// Add or replace a file system.
    pub async fn put_file_system(&self, file_system: FileSystemState) {
        let mut state = self.state.lock().await;
        state.file_systems.retain(|fs| fs.id != file_system.id);
        state.file_systems.push(file_system);
    }

    /// Run `op` against one file system, failing with
    /// `INVALID_FILE_SYSTEM_ID` when it does not exist.
    async fn with_fs<T>(
        &self,
        file_system_id: FileSystemId,
        op: impl FnOnce(&mut FileSystemState) -> Envelope<T>,
    ) -> Envelope<T> {
        let mut state = self.state.lock().await;
        match state.file_system_mut(file_system_id) {
            Some(fs) => op(fs),
            None => Envelope::fail(codes::INVALID_FILE_SYSTEM_ID),
        }
    }

    fn token_accepted(&self, token: &str) -> bool {
        match &self.access_token {
            Some(expected) => expected == token,
            None => !token.trim().is_empty(),
        }
    }
}
