//! Single-file download handed off to the file saver.

use std::sync::Arc;

use tracing::info;

use drivedesk_core::error::AppError;
use drivedesk_core::traits::{AccessTokenSource, FileSaver, ProgressFn, TransferApi};
use drivedesk_core::types::{FileId, FileSystemId, FolderId};

/// Downloads a file and saves it under its original name.
#[derive(Clone)]
pub struct DownloadService {
    /// Chunked transfer calls.
    transfer: Arc<dyn TransferApi>,
    /// Session token source.
    tokens: Arc<dyn AccessTokenSource>,
    /// Where finished downloads go.
    saver: Arc<dyn FileSaver>,
    /// The file system every call targets.
    file_system_id: FileSystemId,
}

impl std::fmt::Debug for DownloadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadService").finish()
    }
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(
        transfer: Arc<dyn TransferApi>,
        tokens: Arc<dyn AccessTokenSource>,
        saver: Arc<dyn FileSaver>,
        file_system_id: FileSystemId,
    ) -> Self {
        Self {
            transfer,
            tokens,
            saver,
            file_system_id,
        }
    }

    /// Download `file_id` from `folder_id` and save it as `file_name`.
    /// Returns the number of bytes saved. Nothing is saved on failure.
    pub async fn download(
        &self,
        file_id: FileId,
        folder_id: FolderId,
        file_name: &str,
        progress: ProgressFn,
    ) -> Result<u64, AppError> {
        let token = self
            .tokens
            .access_token()
            .ok_or_else(|| AppError::authentication("Your session has expired. Sign in again."))?;

        let data = self
            .transfer
            .download(&token, file_id, folder_id, self.file_system_id, progress)
            .await?
            .into_result()?;
        let size = data.len() as u64;
        self.saver.save(file_name, data).await?;

        info!(file_id = %file_id, file_name = %file_name, size, "File downloaded");
        Ok(size)
    }
}
