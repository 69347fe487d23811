//! Resolved recycle bin contents and restore selections.

use serde::{Deserialize, Serialize};

use drivedesk_core::traits::recycle::{DeletedFileRecord, DeletedFolderRecord};
use drivedesk_core::types::{FileId, FolderId, PageRequest, PageResponse};

/// A deleted file with the display name of the folder it lived in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedFileEntry {
    /// The backend record.
    #[serde(flatten)]
    pub record: DeletedFileRecord,
    /// Name of the parent folder, or empty when unresolved.
    pub parent_folder_name: String,
}

/// Both recycle-bin lists of a file system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecycleBin {
    /// Deleted folders.
    pub folders: Vec<DeletedFolderRecord>,
    /// Deleted files, name-resolved.
    pub files: Vec<DeletedFileEntry>,
}

impl RecycleBin {
    /// One page of the deleted folders.
    pub fn folders_page(&self, request: &PageRequest) -> PageResponse<DeletedFolderRecord> {
        PageResponse::from_slice(&self.folders, request)
    }

    /// One page of the deleted files, paged independently of the folders.
    pub fn files_page(&self, request: &PageRequest) -> PageResponse<DeletedFileEntry> {
        PageResponse::from_slice(&self.files, request)
    }

    /// Whether both lists are empty.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }
}

/// Items picked for restore.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreSelection {
    /// Deleted folders to restore.
    pub folder_ids: Vec<FolderId>,
    /// Deleted files to restore, each with the folder it belongs to.
    pub files: Vec<(FileId, FolderId)>,
}

impl RestoreSelection {
    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.folder_ids.is_empty() && self.files.is_empty()
    }

    /// Split the file pairs into the parallel id lists the backend expects.
    pub fn file_columns(&self) -> (Vec<FileId>, Vec<FolderId>) {
        self.files.iter().copied().unzip()
    }
}
