//! Folder and file mutation calls.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{Envelope, FileId, FileSystemId, FolderId};

/// Folder create / rename / move / delete.
#[async_trait]
pub trait FolderAdminApi: Send + Sync + 'static {
    /// Create `name` under `parent_id` (`FolderId::ROOT` for top level).
    async fn create_folder(
        &self,
        parent_id: FolderId,
        file_system_id: FileSystemId,
        name: &str,
    ) -> AppResult<Envelope<()>>;

    /// Rename a folder.
    async fn rename_folder(
        &self,
        folder_id: FolderId,
        file_system_id: FileSystemId,
        name: &str,
    ) -> AppResult<Envelope<()>>;

    /// Re-parent a folder.
    async fn move_folder(
        &self,
        folder_id: FolderId,
        file_system_id: FileSystemId,
        new_parent_id: FolderId,
    ) -> AppResult<Envelope<()>>;

    /// Soft-delete a folder into the recycle bin.
    async fn delete_folder(
        &self,
        folder_id: FolderId,
        file_system_id: FileSystemId,
    ) -> AppResult<Envelope<()>>;
}

/// File rename / delete.
#[async_trait]
pub trait FileAdminApi: Send + Sync + 'static {
    /// Rename a file inside `folder_id`.
    async fn rename_file(
        &self,
        file_id: FileId,
        folder_id: FolderId,
        file_system_id: FileSystemId,
        name: &str,
    ) -> AppResult<Envelope<()>>;

    /// Soft-delete a file into the recycle bin.
    async fn delete_file(
        &self,
        file_id: FileId,
        folder_id: FolderId,
        file_system_id: FileSystemId,
    ) -> AppResult<Envelope<()>>;
}
