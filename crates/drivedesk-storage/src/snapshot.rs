//! JSON snapshot persistence for the in-memory backend.

use std::path::Path;

use tokio::fs;
use tracing::{debug, info};

use drivedesk_core::error::{AppError, ErrorKind};
use drivedesk_core::result::AppResult;

use crate::model::Snapshot;

/// Read a snapshot. A missing file yields an empty snapshot.
pub async fn load(path: &Path) -> AppResult<Snapshot> {
    if !fs::try_exists(path).await? {
        debug!(path = %path.display(), "No snapshot on disk; starting empty");
        return Ok(Snapshot::default());
    }
    let raw = fs::read(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to read snapshot: {}", path.display()),
            e,
        )
    })?;
    let snapshot: Snapshot = serde_json::from_slice(&raw)?;
    info!(
        path = %path.display(),
        file_systems = snapshot.file_systems.len(),
        "Snapshot loaded"
    );
    Ok(snapshot)
}

/// Write a snapshot, replacing the file atomically via a sibling temp file.
pub async fn save(path: &Path, snapshot: &Snapshot) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_vec_pretty(snapshot)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &json).await?;
    fs::rename(&tmp, path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to replace snapshot: {}", path.display()),
            e,
        )
    })?;
    debug!(path = %path.display(), bytes = json.len(), "Snapshot saved");
    Ok(())
}
