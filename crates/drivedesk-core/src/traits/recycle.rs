//! Recycle bin listing and restore calls.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::{Envelope, FileId, FileSystemId, FolderId};

/// A soft-deleted folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedFolderRecord {
    /// Folder id.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder id at deletion time.
    #[serde(default, alias = "parentId")]
    pub parent_id: FolderId,
}

/// A soft-deleted file.
///
/// The folder arrives as `parent_id`, `parentId` or `folderId` and the size
/// as `size_bytes`, `size` or `sizeBytes`; the first one present in that
/// order wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DeletedFileWire")]
pub struct DeletedFileRecord {
    /// File id.
    pub id: FileId,
    /// Folder the file lived in.
    pub parent_id: FolderId,
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: u64,
}

#[derive(Deserialize)]
struct DeletedFileWire {
    id: FileId,
    name: String,
    #[serde(default)]
    parent_id: Option<FolderId>,
    #[serde(default, rename = "parentId")]
    parent_id_camel: Option<FolderId>,
    #[serde(default, rename = "folderId")]
    folder_id: Option<FolderId>,
    #[serde(default)]
    size_bytes: Option<u64>,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default, rename = "sizeBytes")]
    size_bytes_camel: Option<u64>,
}

impl From<DeletedFileWire> for DeletedFileRecord {
    fn from(wire: DeletedFileWire) -> Self {
        Self {
            id: wire.id,
            parent_id: wire
                .parent_id
                .or(wire.parent_id_camel)
                .or(wire.folder_id)
                .unwrap_or_default(),
            name: wire.name,
            size_bytes: wire
                .size_bytes
                .or(wire.size)
                .or(wire.size_bytes_camel)
                .unwrap_or_default(),
        }
    }
}

/// Both deleted-item collections of a file system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedItems {
    /// Deleted folders.
    #[serde(default)]
    pub folders: Vec<DeletedFolderRecord>,
    /// Deleted files.
    #[serde(default)]
    pub files: Vec<DeletedFileRecord>,
}

/// Recycle bin access.
#[async_trait]
pub trait RecycleBinApi: Send + Sync + 'static {
    /// List deleted folders and files.
    async fn list_deleted(&self, file_system_id: FileSystemId) -> AppResult<Envelope<DeletedItems>>;

    /// Restore deleted folders.
    async fn restore_folders(
        &self,
        folder_ids: &[FolderId],
        file_system_id: FileSystemId,
    ) -> AppResult<Envelope<()>>;

    /// Restore deleted files. `folder_ids[i]` is the folder of `file_ids[i]`.
    async fn restore_files(
        &self,
        file_ids: &[FileId],
        folder_ids: &[FolderId],
        file_system_id: FileSystemId,
    ) -> AppResult<Envelope<()>>;
}
