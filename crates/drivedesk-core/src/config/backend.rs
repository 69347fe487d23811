//! Backend and session configuration.

use serde::{Deserialize, Serialize};

/// Where the console finds its backend and which file system it manages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Path to the JSON snapshot the in-memory backend loads and saves.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    /// File system selected for folder management.
    #[serde(default = "default_file_system_id")]
    pub file_system_id: i64,
    /// Access token passed to transfer calls.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Directory downloads are saved into.
    #[serde(default = "default_download_dir")]
    pub download_dir: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            file_system_id: default_file_system_id(),
            access_token: None,
            download_dir: default_download_dir(),
        }
    }
}

fn default_snapshot_path() -> String {
    "data/drivedesk.json".to_string()
}

fn default_file_system_id() -> i64 {
    1
}

fn default_download_dir() -> String {
    "data/downloads".to_string()
}
