//! Upload and download configuration.

use serde::{Deserialize, Serialize};

/// Chunked transfer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Chunk size in bytes for chunked transfers (default 1 MB).
    #[serde(default = "default_chunk_size")]
    pub chunk_size_bytes: u64,
    /// Maximum accepted upload size in bytes (default 5 GB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            chunk_size_bytes: default_chunk_size(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_chunk_size() -> u64 {
    1024 * 1024
}

fn default_max_upload() -> u64 {
    5 * 1024 * 1024 * 1024
}
