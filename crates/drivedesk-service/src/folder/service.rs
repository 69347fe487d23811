//! Folder and file CRUD through the backend envelope protocol.

use std::sync::Arc;

use tracing::info;

use drivedesk_core::error::AppError;
use drivedesk_core::traits::{FileAdminApi, FolderAdminApi};
use drivedesk_core::types::{FileId, FileSystemId, FolderId};
use drivedesk_entity::folder::{FolderTree, check_name};

use super::move_check::MoveValidator;

/// Manages folder and file mutations for one file system.
#[derive(Clone)]
pub struct FolderService {
    /// Folder mutation calls.
    folders: Arc<dyn FolderAdminApi>,
    /// File mutation calls.
    files: Arc<dyn FileAdminApi>,
    /// The file system every call targets.
    file_system_id: FileSystemId,
}

impl std::fmt::Debug for FolderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderService")
            .field("file_system_id", &self.file_system_id)
            .finish()
    }
}

fn validate_name(name: &str) -> Result<&str, AppError> {
    check_name(name).map_err(|v| AppError::validation(v.describe()))?;
    Ok(name.trim())
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderAdminApi>,
        files: Arc<dyn FileAdminApi>,
        file_system_id: FileSystemId,
    ) -> Self {
        Self {
            folders,
            files,
            file_system_id,
        }
    }

    /// Creates a folder under `parent_id` (`ROOT` for the top level).
    pub async fn create_folder(&self, parent_id: FolderId, name: &str) -> Result<(), AppError> {
        let name = validate_name(name)?;
        self.folders
            .create_folder(parent_id, self.file_system_id, name)
            .await?
            .into_unit()?;

        info!(
            file_system_id = %self.file_system_id,
            parent_id = %parent_id,
            name = %name,
            "Folder created"
        );
        Ok(())
    }

    /// Renames a folder.
    pub async fn rename_folder(&self, folder_id: FolderId, name: &str) -> Result<(), AppError> {
        if folder_id.is_root() {
            return Err(AppError::validation("The root folder cannot be renamed"));
        }
        let name = validate_name(name)?;
        self.folders
            .rename_folder(folder_id, self.file_system_id, name)
            .await?
            .into_unit()?;

        info!(folder_id = %folder_id, name = %name, "Folder renamed");
        Ok(())
    }

    /// Moves a folder under `destination`, refusing moves that would put it
    /// inside itself.
    pub async fn move_folder(
        &self,
        folder_id: FolderId,
        destination: FolderId,
        tree: &FolderTree,
    ) -> Result<(), AppError> {
        if folder_id.is_root() {
            return Err(AppError::validation("The root folder cannot be moved"));
        }
        if !destination.is_root() && !tree.contains(destination) {
            return Err(AppError::validation("Destination folder not found"));
        }
        if !MoveValidator::is_legal_destination(folder_id, destination, tree) {
            return Err(AppError::validation(
                "A folder cannot be moved into itself or one of its subfolders",
            ));
        }

        self.folders
            .move_folder(folder_id, self.file_system_id, destination)
            .await?
            .into_unit()?;

        info!(folder_id = %folder_id, destination = %destination, "Folder moved");
        Ok(())
    }

    /// Moves a folder to the recycle bin.
    pub async fn delete_folder(&self, folder_id: FolderId) -> Result<(), AppError> {
        if folder_id.is_root() {
            return Err(AppError::validation("The root folder cannot be deleted"));
        }
        self.folders
            .delete_folder(folder_id, self.file_system_id)
            .await?
            .into_unit()?;

        info!(folder_id = %folder_id, "Folder deleted");
        Ok(())
    }

    /// Renames a file inside `folder_id`.
    pub async fn rename_file(
        &self,
        file_id: FileId,
        folder_id: FolderId,
        name: &str,
    ) -> Result<(), AppError> {
        let name = validate_name(name)?;
        self.files
            .rename_file(file_id, folder_id, self.file_system_id, name)
            .await?
            .into_unit()?;

        info!(file_id = %file_id, folder_id = %folder_id, name = %name, "File renamed");
        Ok(())
    }

    /// Moves a file to the recycle bin.
    pub async fn delete_file(&self, file_id: FileId, folder_id: FolderId) -> Result<(), AppError> {
        self.files
            .delete_file(file_id, folder_id, self.file_system_id)
            .await?
            .into_unit()?;

        info!(file_id = %file_id, folder_id = %folder_id, "File deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivedesk_core::config::TransferConfig;
    use drivedesk_core::error::ErrorKind;
    use drivedesk_core::types::codes;
    use drivedesk_entity::folder::FolderRecord;
    use drivedesk_storage::{FileSystemState, MemoryBackend, Snapshot};

    use crate::folder::tree::TreeBuilder;

    fn service() -> FolderService {
        let fs = FileSystemState::new(1, "main")
            .with_folder(1, 0, "A")
            .with_folder(2, 1, "B")
            .with_file(1, 2, "x.txt", b"x");
        let backend = Arc::new(MemoryBackend::new(
            Snapshot::new(vec![fs]),
            &TransferConfig::default(),
        ));
        FolderService::new(backend.clone(), backend, FileSystemId(1))
    }

    fn tree() -> FolderTree {
        TreeBuilder::build(&[FolderRecord::new(1, 0, "A"), FolderRecord::new(2, 1, "B")])
    }

    #[tokio::test]
    async fn test_move_into_descendant_never_reaches_backend() {
        let err = service()
            .move_folder(FolderId(1), FolderId(2), &tree())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_unknown_destination_is_rejected() {
        let err = service()
            .move_folder(FolderId(2), FolderId(42), &tree())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_business_failure_carries_code() {
        let err = service()
            .create_folder(FolderId::ROOT, "a")
            .await
            .unwrap_err();
        assert_eq!(err.business_code(), Some(codes::FOLDER_EXISTS));
    }

    #[tokio::test]
    async fn test_invalid_name_is_local() {
        let err = service().create_folder(FolderId(1), "  ").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_file_rename_and_delete() {
        let service = service();
        service
            .rename_file(FileId(1), FolderId(2), "y.txt")
            .await
            .unwrap();
        service.delete_file(FileId(1), FolderId(2)).await.unwrap();
        let err = service.delete_file(FileId(1), FolderId(2)).await.unwrap_err();
        assert_eq!(err.business_code(), Some(codes::INVALID_FILE_ID));
    }
}
