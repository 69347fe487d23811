//! Recycle bin coordination across the deleted-items and structure calls.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use drivedesk_core::error::AppError;
use drivedesk_core::traits::{DeletedItems, RecycleBinApi};
use drivedesk_core::types::{FileId, FileSystemId, FolderId};
use drivedesk_entity::folder::FolderRecord;
use drivedesk_entity::recycle::{DeletedFileEntry, RecycleBin, RestoreSelection};

use crate::folder::TreeService;

/// Loads and restores recycle bin contents for one file system.
#[derive(Clone)]
pub struct RecycleBinCoordinator {
    /// Recycle bin calls.
    recycle: Arc<dyn RecycleBinApi>,
    /// Live structure, for parent folder names.
    trees: TreeService,
    /// The file system every call targets.
    file_system_id: FileSystemId,
}

impl std::fmt::Debug for RecycleBinCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecycleBinCoordinator")
            .field("file_system_id", &self.file_system_id)
            .finish()
    }
}

impl RecycleBinCoordinator {
    /// Creates a new coordinator.
    pub fn new(
        recycle: Arc<dyn RecycleBinApi>,
        trees: TreeService,
        file_system_id: FileSystemId,
    ) -> Self {
        Self {
            recycle,
            trees,
            file_system_id,
        }
    }

    /// Fetch deleted items and the live structure together and resolve
    /// each deleted file's parent folder name.
    ///
    /// A failed deleted-items call fails the load. A failed structure call
    /// only narrows name resolution to the deleted folders.
    pub async fn load(&self) -> Result<RecycleBin, AppError> {
        let (deleted, live) = tokio::join!(
            self.recycle.list_deleted(self.file_system_id),
            self.trees.load_records(self.file_system_id),
        );

        let deleted = deleted?.into_result()?;
        let live = live.unwrap_or_else(|err| {
            warn!(
                file_system_id = %self.file_system_id,
                error = %err,
                "Live structure unavailable, resolving names from deleted folders only"
            );
            Vec::new()
        });

        Ok(Self::resolve(deleted, &live))
    }

    /// Attach parent folder names to deleted files. Deleted folder names
    /// override live ones; unknown parents resolve to an empty name.
    pub fn resolve(deleted: DeletedItems, live: &[FolderRecord]) -> RecycleBin {
        let mut names: HashMap<FolderId, String> = HashMap::new();
        for record in live.iter().filter(|r| !r.is_placeholder()) {
            names
                .entry(record.id)
                .or_insert_with(|| record.name.clone());
        }
        for folder in &deleted.folders {
            names.insert(folder.id, folder.name.clone());
        }

        let files = deleted
            .files
            .into_iter()
            .map(|record| DeletedFileEntry {
                parent_folder_name: names.get(&record.parent_id).cloned().unwrap_or_default(),
                record,
            })
            .collect();

        RecycleBin {
            folders: deleted.folders,
            files,
        }
    }

    /// Restore the selected folders and files.
    ///
    /// Folder and file restores run concurrently; the restore fails if
    /// either call fails.
    pub async fn restore(&self, selection: &RestoreSelection) -> Result<(), AppError> {
        if selection.is_empty() {
            return Err(AppError::validation("Select at least one item to restore"));
        }

        let (file_ids, file_folder_ids) = selection.file_columns();
        let (folders, files) = tokio::join!(
            self.restore_folders(&selection.folder_ids),
            self.restore_files(&file_ids, &file_folder_ids),
        );
        folders?;
        files?;

        info!(
            file_system_id = %self.file_system_id,
            folders = selection.folder_ids.len(),
            files = file_ids.len(),
            "Recycle bin items restored"
        );
        Ok(())
    }

    async fn restore_folders(&self, folder_ids: &[FolderId]) -> Result<(), AppError> {
        if folder_ids.is_empty() {
            return Ok(());
        }
        self.recycle
            .restore_folders(folder_ids, self.file_system_id)
            .await?
            .into_unit()
    }

    async fn restore_files(
        &self,
        file_ids: &[FileId],
        folder_ids: &[FolderId],
    ) -> Result<(), AppError> {
        if file_ids.is_empty() {
            return Ok(());
        }
        self.recycle
            .restore_files(file_ids, folder_ids, self.file_system_id)
            .await?
            .into_unit()
    }
}
