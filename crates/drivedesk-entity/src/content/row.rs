//! One entry of the currently open folder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drivedesk_core::traits::content::FolderListing;
use drivedesk_core::types::{FileId, FolderId};

/// A row in the open folder's listing: either a subfolder or a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentRow {
    /// A subfolder.
    Folder {
        /// Folder id.
        id: FolderId,
        /// Folder name.
        name: String,
        /// Last modification time.
        modified_at: Option<DateTime<Utc>>,
    },
    /// A file.
    File {
        /// File id.
        id: FileId,
        /// File name.
        name: String,
        /// Size in bytes.
        size_bytes: u64,
        /// Last modification time.
        modified_at: Option<DateTime<Utc>>,
    },
}

impl ContentRow {
    /// Build the rows for one listing: subfolders first, then files, each
    /// in backend order.
    pub fn from_listing(listing: FolderListing) -> Vec<Self> {
        let mut rows = Vec::with_capacity(listing.folders.len() + listing.files.len());
        rows.extend(listing.folders.into_iter().map(|f| Self::Folder {
            id: f.id,
            name: f.name,
            modified_at: f.modified_at,
        }));
        rows.extend(listing.files.into_iter().map(|f| Self::File {
            id: f.id,
            name: f.name,
            size_bytes: f.size,
            modified_at: f.modified_at,
        }));
        rows
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Folder { name, .. } | Self::File { name, .. } => name,
        }
    }

    /// Whether the row is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder { .. })
    }

    /// The folder id when the row is a folder.
    pub fn folder_id(&self) -> Option<FolderId> {
        match self {
            Self::Folder { id, .. } => Some(*id),
            Self::File { .. } => None,
        }
    }

    /// The file id when the row is a file.
    pub fn file_id(&self) -> Option<FileId> {
        match self {
            Self::File { id, .. } => Some(*id),
            Self::Folder { .. } => None,
        }
    }

    /// Last modification time.
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Folder { modified_at, .. } | Self::File { modified_at, .. } => *modified_at,
        }
    }
}
