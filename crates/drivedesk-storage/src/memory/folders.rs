//! Structure, contents, and folder/file mutation calls.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use drivedesk_core::result::AppResult;
use drivedesk_core::traits::admin::{FileAdminApi, FolderAdminApi};
use drivedesk_core::traits::content::{FileEntry, FolderContentApi, FolderEntry, FolderListing};
use drivedesk_core::traits::structure::{FolderStructureApi, NamedFolderRecord, RawFolderRecord};
use drivedesk_core::types::{Envelope, FileId, FileSystemId, FolderId, codes};
use drivedesk_entity::folder::check_name;

use crate::model::StoredFolder;

use super::MemoryBackend;

#[async_trait]
impl FolderStructureApi for MemoryBackend {
    async fn list_structure(
        &self,
        file_system_id: FileSystemId,
        one_level_only: bool,
    ) -> AppResult<Envelope<Vec<RawFolderRecord>>> {
        Ok(self
            .with_fs(file_system_id, |fs| {
                let records: Vec<RawFolderRecord> = fs
                    .folders
                    .iter()
                    .filter(|f| !f.deleted && fs.is_live(f.id))
                    .filter(|f| !one_level_only || f.parent_id.is_root())
                    .map(|f| {
                        RawFolderRecord::Named(NamedFolderRecord {
                            id: Some(Value::from(f.id.get())),
                            parent_id: Some(Value::from(f.parent_id.get())),
                            name: Some(Value::from(f.name.clone())),
                        })
                    })
                    .collect();
                debug!(file_system_id = %fs.id, count = records.len(), "Structure listed");
                Envelope::ok(records)
            })
            .await)
    }
}

#[async_trait]
impl FolderContentApi for MemoryBackend {
    async fn list_contents(
        &self,
        folder_id: FolderId,
        file_system_id: FileSystemId,
    ) -> AppResult<Envelope<FolderListing>> {
        Ok(self
            .with_fs(file_system_id, |fs| {
                if !fs.is_live(folder_id) {
                    return Envelope::fail(codes::INVALID_FOLDER_ID);
                }
                let folders = fs
                    .live_children(folder_id)
                    .into_iter()
                    .map(|f| FolderEntry {
                        id: f.id,
                        name: f.name.clone(),
                        modified_at: Some(f.modified_at),
                    })
                    .collect();
                let mut files: Vec<FileEntry> = fs
                    .files
                    .iter()
                    .filter(|f| f.folder_id == folder_id && !f.deleted)
                    .map(|f| FileEntry {
                        id: f.id,
                        name: f.name.clone(),
                        size: f.size(),
                        modified_at: Some(f.modified_at),
                    })
                    .collect();
                files.sort_by(|a, b| a.name.cmp(&b.name));
                Envelope::ok(FolderListing { folders, files })
            })
            .await)
    }
}

#[async_trait]
impl FolderAdminApi for MemoryBackend {
    async fn create_folder(
        &self,
        parent_id: FolderId,
        file_system_id: FileSystemId,
        name: &str,
    ) -> AppResult<Envelope<()>> {
        Ok(self
            .with_fs(file_system_id, |fs| {
                if check_name(name).is_err() {
                    return Envelope::fail(codes::INVALID_FOLDER_NAME);
                }
                if !fs.is_live(parent_id) {
                    return Envelope::fail(codes::INVALID_FOLDER_ID);
                }
                if fs.sibling_named(parent_id, name, None) {
                    return Envelope::fail(codes::FOLDER_EXISTS);
                }
                let id = fs.next_folder_id();
                fs.folders.push(StoredFolder {
                    id,
                    parent_id,
                    name: name.trim().to_string(),
                    deleted: false,
                    modified_at: Utc::now(),
                });
                Envelope::done()
            })
            .await)
    }

    async fn rename_folder(
        &self,
        folder_id: FolderId,
        file_system_id: FileSystemId,
        name: &str,
    ) -> AppResult<Envelope<()>> {
        Ok(self
            .with_fs(file_system_id, |fs| {
                if check_name(name).is_err() {
                    return Envelope::fail(codes::INVALID_FOLDER_NAME);
                }
                if folder_id.is_root() || !fs.is_live(folder_id) {
                    return Envelope::fail(codes::INVALID_FOLDER_ID);
                }
                let parent_id = match fs.folder(folder_id) {
                    Some(folder) => folder.parent_id,
                    None => return Envelope::fail(codes::INVALID_FOLDER_ID),
                };
                if fs.sibling_named(parent_id, name, Some(folder_id)) {
                    return Envelope::fail(codes::FOLDER_EXISTS);
                }
                if let Some(folder) = fs.folder_mut(folder_id) {
                    folder.name = name.trim().to_string();
                    folder.modified_at = Utc::now();
                }
                Envelope::done()
            })
            .await)
    }

    async fn move_folder(
        &self,
        folder_id: FolderId,
        file_system_id: FileSystemId,
        new_parent_id: FolderId,
    ) -> AppResult<Envelope<()>> {
        Ok(self
            .with_fs(file_system_id, |fs| {
                if folder_id.is_root() || !fs.is_live(folder_id) || !fs.is_live(new_parent_id) {
                    return Envelope::fail(codes::INVALID_FOLDER_ID);
                }
                if fs.is_within(new_parent_id, folder_id) {
                    return Envelope::fail(codes::INVALID_MOVE);
                }
                let name = fs
                    .folder(folder_id)
                    .map(|f| f.name.clone())
                    .unwrap_or_default();
                if fs.sibling_named(new_parent_id, &name, Some(folder_id)) {
                    return Envelope::fail(codes::FOLDER_EXISTS);
                }
                if let Some(folder) = fs.folder_mut(folder_id) {
                    folder.parent_id = new_parent_id;
                    folder.modified_at = Utc::now();
                }
                Envelope::done()
            })
            .await)
    }

    async fn delete_folder(
        &self,
        folder_id: FolderId,
        file_system_id: FileSystemId,
    ) -> AppResult<Envelope<()>> {
        Ok(self
            .with_fs(file_system_id, |fs| {
                if folder_id.is_root() || !fs.is_live(folder_id) {
                    return Envelope::fail(codes::INVALID_FOLDER_ID);
                }
                if let Some(folder) = fs.folder_mut(folder_id) {
                    folder.deleted = true;
                    folder.modified_at = Utc::now();
                }
                Envelope::done()
            })
            .await)
    }
}

#[async_trait]
impl FileAdminApi for MemoryBackend {
    async fn rename_file(
        &self,
        file_id: FileId,
        folder_id: FolderId,
        file_system_id: FileSystemId,
        name: &str,
    ) -> AppResult<Envelope<()>> {
        Ok(self
            .with_fs(file_system_id, |fs| {
                if check_name(name).is_err() {
                    return Envelope::fail(codes::INVALID_FILE_NAME);
                }
                match fs.file_mut(file_id) {
                    Some(file) if file.folder_id == folder_id && !file.deleted => {
                        file.name = name.trim().to_string();
                        file.modified_at = Utc::now();
                        Envelope::done()
                    }
                    _ => Envelope::fail(codes::INVALID_FILE_ID),
                }
            })
            .await)
    }

    async fn delete_file(
        &self,
        file_id: FileId,
        folder_id: FolderId,
        file_system_id: FileSystemId,
    ) -> AppResult<Envelope<()>> {
        Ok(self
            .with_fs(file_system_id, |fs| match fs.file_mut(file_id) {
                Some(file) if file.folder_id == folder_id && !file.deleted => {
                    file.deleted = true;
                    file.modified_at = Utc::now();
                    Envelope::done()
                }
                _ => Envelope::fail(codes::INVALID_FILE_ID),
            })
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivedesk_core::config::TransferConfig;

    use crate::model::{FileSystemState, Snapshot};

    const FS: FileSystemId = FileSystemId(1);

    fn backend() -> MemoryBackend {
        let fs = FileSystemState::new(1, "main")
            .with_folder(1, 0, "docs")
            .with_folder(2, 1, "2024")
            .with_folder(3, 0, "media")
            .with_file(1, 1, "b.txt", b"bbb")
            .with_file(2, 1, "a.txt", b"a");
        MemoryBackend::new(Snapshot::new(vec![fs]), &TransferConfig::default())
    }

    #[tokio::test]
    async fn test_contents_sorted_and_sized() {
        let listing = backend()
            .list_contents(FolderId(1), FS)
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(listing.folders.len(), 1);
        let names: Vec<_> = listing.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert_eq!(listing.local_bytes(), 4);
    }

    #[tokio::test]
    async fn test_unknown_file_system() {
        let env = backend()
            .list_contents(FolderId::ROOT, FileSystemId(99))
            .await
            .unwrap();
        assert_eq!(env.message.as_deref(), Some(codes::INVALID_FILE_SYSTEM_ID));
    }

    #[tokio::test]
    async fn test_move_into_descendant_rejected() {
        let env = backend()
            .move_folder(FolderId(1), FS, FolderId(2))
            .await
            .unwrap();
        assert_eq!(env.message.as_deref(), Some(codes::INVALID_MOVE));
    }

    #[tokio::test]
    async fn test_create_duplicate_and_invalid_names() {
        let backend = backend();
        let env = backend.create_folder(FolderId::ROOT, FS, "DOCS").await.unwrap();
        assert_eq!(env.message.as_deref(), Some(codes::FOLDER_EXISTS));
        let env = backend.create_folder(FolderId::ROOT, FS, "a:b").await.unwrap();
        assert_eq!(env.message.as_deref(), Some(codes::INVALID_FOLDER_NAME));
        let env = backend.create_folder(FolderId(3), FS, "photos").await.unwrap();
        assert!(env.success);
    }

    #[tokio::test]
    async fn test_deleted_folder_hides_subtree_from_structure() {
        let backend = backend();
        backend.delete_folder(FolderId(1), FS).await.unwrap();
        let records = backend
            .list_structure(FS, false)
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(records.len(), 1);
        let env = backend.list_contents(FolderId(2), FS).await.unwrap();
        assert!(!env.success);
    }

    #[tokio::test]
    async fn test_file_must_match_folder() {
        let env = backend()
            .delete_file(FileId(1), FolderId(3), FS)
            .await
            .unwrap();
        assert_eq!(env.message.as_deref(), Some(codes::INVALID_FILE_ID));
    }
}
