//! Hand-off of downloaded bytes to the user's machine.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Persists a completed download under its original file name.
#[async_trait]
pub trait FileSaver: Send + Sync + 'static {
    /// Save `data` as `file_name`.
    async fn save(&self, file_name: &str, data: Bytes) -> AppResult<()>;
}
