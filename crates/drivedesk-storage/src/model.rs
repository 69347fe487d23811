//! Backend state held by [`crate::MemoryBackend`] and persisted as a snapshot.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drivedesk_core::types::{FileId, FileSystemId, FolderId};

/// A folder as the backend stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFolder {
    /// Folder id.
    pub id: FolderId,
    /// Parent id (`0` = top level).
    pub parent_id: FolderId,
    /// Folder name.
    pub name: String,
    /// Soft-deleted into the recycle bin.
    #[serde(default)]
    pub deleted: bool,
    /// Last modification time.
    #[serde(default = "Utc::now")]
    pub modified_at: DateTime<Utc>,
}

/// A file as the backend stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    /// File id.
    pub id: FileId,
    /// Containing folder (`0` = top level).
    pub folder_id: FolderId,
    /// File name.
    pub name: String,
    /// File bytes, base64 in the snapshot.
    #[serde(with = "content_b64")]
    pub content: Bytes,
    /// Soft-deleted into the recycle bin.
    #[serde(default)]
    pub deleted: bool,
    /// Last modification time.
    #[serde(default = "Utc::now")]
    pub modified_at: DateTime<Utc>,
}

impl StoredFile {
    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// One tenant file system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSystemState {
    /// File system id.
    pub id: FileSystemId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Every folder, deleted or not, in creation order.
    #[serde(default)]
    pub folders: Vec<StoredFolder>,
    /// Every file, deleted or not, in creation order.
    #[serde(default)]
    pub files: Vec<StoredFile>,
}

impl FileSystemState {
    /// An empty file system.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: FileSystemId(id),
            name: name.into(),
            folders: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Fixture helper: add a live folder.
    pub fn with_folder(mut self, id: i64, parent_id: i64, name: &str) -> Self {
        self.folders.push(StoredFolder {
            id: FolderId(id),
            parent_id: FolderId(parent_id),
            name: name.to_string(),
            deleted: false,
            modified_at: Utc::now(),
        });
        self
    }

    /// Fixture helper: add a live file.
    pub fn with_file(mut self, id: i64, folder_id: i64, name: &str, content: &[u8]) -> Self {
        self.files.push(StoredFile {
            id: FileId(id),
            folder_id: FolderId(folder_id),
            name: name.to_string(),
            content: Bytes::copy_from_slice(content),
            deleted: false,
            modified_at: Utc::now(),
        });
        self
    }

    /// Any folder with `id`, deleted or not.
    pub fn folder(&self, id: FolderId) -> Option<&StoredFolder> {
        self.folders.iter().find(|f| f.id == id)
    }

    /// Mutable access to any folder with `id`.
    pub fn folder_mut(&mut self, id: FolderId) -> Option<&mut StoredFolder> {
        self.folders.iter_mut().find(|f| f.id == id)
    }

    /// Mutable access to any file with `id`.
    pub fn file_mut(&mut self, id: FileId) -> Option<&mut StoredFile> {
        self.files.iter_mut().find(|f| f.id == id)
    }

    /// Whether `id` is the root or a folder with no deleted ancestor.
    pub fn is_live(&self, id: FolderId) -> bool {
        let mut current = id;
        // bounded by the folder count so corrupt parent loops terminate
        for _ in 0..=self.folders.len() {
            if current.is_root() {
                return true;
            }
            match self.folder(current) {
                Some(folder) if !folder.deleted => current = folder.parent_id,
                _ => return false,
            }
        }
        false
    }

    /// Whether `candidate` is `ancestor` or lies beneath it.
    pub fn is_within(&self, candidate: FolderId, ancestor: FolderId) -> bool {
        let mut current = candidate;
        for _ in 0..=self.folders.len() {
            if current == ancestor {
                return true;
            }
            if current.is_root() {
                return false;
            }
            match self.folder(current) {
                Some(folder) => current = folder.parent_id,
                None => return false,
            }
        }
        false
    }

    /// Live folders directly under `parent_id`, by name.
    pub fn live_children(&self, parent_id: FolderId) -> Vec<&StoredFolder> {
        let mut children: Vec<&StoredFolder> = self
            .folders
            .iter()
            .filter(|f| f.parent_id == parent_id && !f.deleted && self.is_live(f.id))
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        children
    }

    /// Whether a live sibling under `parent_id` (other than `except`) has `name`.
    pub fn sibling_named(&self, parent_id: FolderId, name: &str, except: Option<FolderId>) -> bool {
        self.folders.iter().any(|f| {
            f.parent_id == parent_id
                && !f.deleted
                && Some(f.id) != except
                && f.name.eq_ignore_ascii_case(name.trim())
        })
    }

    /// Next unused folder id.
    pub fn next_folder_id(&self) -> FolderId {
        FolderId(self.folders.iter().map(|f| f.id.get()).max().unwrap_or(0) + 1)
    }

    /// Next unused file id.
    pub fn next_file_id(&self) -> FileId {
        FileId(self.files.iter().map(|f| f.id.get()).max().unwrap_or(0) + 1)
    }
}

/// Whole backend state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All file systems.
    #[serde(default)]
    pub file_systems: Vec<FileSystemState>,
}

impl Snapshot {
    /// A snapshot holding the given file systems.
    pub fn new(file_systems: Vec<FileSystemState>) -> Self {
        Self { file_systems }
    }

    /// Mutable access to a file system.
    pub fn file_system_mut(&mut self, id: FileSystemId) -> Option<&mut FileSystemState> {
        self.file_systems.iter_mut().find(|fs| fs.id == id)
    }
}

mod content_b64 {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map(Bytes::from)
            .map_err(serde::de::Error::custom)
    }
}
