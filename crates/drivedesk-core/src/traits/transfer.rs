//! Chunked upload and download calls.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;
use crate::types::{Envelope, FileId, FileSystemId, FolderId};

/// Progress callback receiving a completion percentage in `0..=100`.
pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

/// Chunked file transfer.
#[async_trait]
pub trait TransferApi: Send + Sync + 'static {
    /// Upload `data` as `file_name` into `folder_id`, reporting progress per
    /// chunk. Resolves once the last chunk is accepted.
    async fn upload(
        &self,
        data: Bytes,
        file_name: &str,
        access_token: &str,
        file_system_id: FileSystemId,
        folder_id: FolderId,
        progress: ProgressFn,
    ) -> AppResult<Envelope<()>>;

    /// Download a file's bytes, reporting progress per chunk.
    async fn download(
        &self,
        access_token: &str,
        file_id: FileId,
        folder_id: FolderId,
        file_system_id: FileSystemId,
        progress: ProgressFn,
    ) -> AppResult<Envelope<Bytes>>;
}
