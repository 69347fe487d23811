//! Folder content listing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::{Envelope, FileId, FileSystemId, FolderId};

/// A subfolder in a content listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    /// Folder id.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Last modification time, when the backend reports one.
    #[serde(default, alias = "modifiedAt")]
    pub modified_at: Option<DateTime<Utc>>,
}

/// A file in a content listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// File id.
    pub id: FileId,
    /// File name.
    pub name: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Last modification time, when the backend reports one.
    #[serde(default, alias = "modifiedAt")]
    pub modified_at: Option<DateTime<Utc>>,
}

/// Immediate contents of one folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderListing {
    /// Immediate subfolders.
    #[serde(default)]
    pub folders: Vec<FolderEntry>,
    /// Files directly inside the folder.
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

impl FolderListing {
    /// Sum of the sizes of the files at this level.
    pub fn local_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

/// Lists the immediate contents of a folder.
#[async_trait]
pub trait FolderContentApi: Send + Sync + 'static {
    /// Return subfolders and files directly inside `folder_id`
    /// (`FolderId::ROOT` lists the file system's top level).
    async fn list_contents(
        &self,
        folder_id: FolderId,
        file_system_id: FileSystemId,
    ) -> AppResult<Envelope<FolderListing>>;
}
