//! Local directory implementation of the download save collaborator.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::info;

use drivedesk_core::error::{AppError, ErrorKind};
use drivedesk_core::result::AppResult;
use drivedesk_core::traits::saver::FileSaver;

/// Writes downloads into a fixed directory.
#[derive(Debug, Clone)]
pub struct LocalFileSaver {
    /// Target directory.
    dir: PathBuf,
}

impl LocalFileSaver {
    /// Save into `dir`, created on first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Where `file_name` will be written. Only the final path component of
    /// the name is used so a name cannot escape the directory.
    pub fn target_for(&self, file_name: &str) -> AppResult<PathBuf> {
        let base = Path::new(file_name)
            .file_name()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::validation(format!("Unusable file name '{file_name}'")))?;
        Ok(self.dir.join(base))
    }
}

#[async_trait]
impl FileSaver for LocalFileSaver {
    async fn save(&self, file_name: &str, data: Bytes) -> AppResult<()> {
        let target = self.target_for(file_name)?;
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create download directory: {}", self.dir.display()),
                e,
            )
        })?;
        fs::write(&target, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write download: {}", target.display()),
                e,
            )
        })?;
        info!(path = %target.display(), bytes = data.len(), "Download saved");
        Ok(())
    }
}
