//! Recycle bin listing and restore.

use async_trait::async_trait;
use chrono::Utc;

use drivedesk_core::result::AppResult;
use drivedesk_core::traits::recycle::{
    DeletedFileRecord, DeletedFolderRecord, DeletedItems, RecycleBinApi,
};
use drivedesk_core::types::{Envelope, FileId, FileSystemId, FolderId, codes};

use super::MemoryBackend;

#[async_trait]
impl RecycleBinApi for MemoryBackend {
    async fn list_deleted(&self, file_system_id: FileSystemId) -> AppResult<Envelope<DeletedItems>> {
        Ok(self
            .with_fs(file_system_id, |fs| {
                let folders = fs
                    .folders
                    .iter()
                    .filter(|f| f.deleted)
                    .map(|f| DeletedFolderRecord {
                        id: f.id,
                        name: f.name.clone(),
                        parent_id: f.parent_id,
                    })
                    .collect();
                let files = fs
                    .files
                    .iter()
                    .filter(|f| f.deleted)
                    .map(|f| DeletedFileRecord {
                        id: f.id,
                        parent_id: f.folder_id,
                        name: f.name.clone(),
                        size_bytes: f.size(),
                    })
                    .collect();
                Envelope::ok(DeletedItems { folders, files })
            })
            .await)
    }

    async fn restore_folders(
        &self,
        folder_ids: &[FolderId],
        file_system_id: FileSystemId,
    ) -> AppResult<Envelope<()>> {
        Ok(self
            .with_fs(file_system_id, |fs| {
                let all_deleted = folder_ids
                    .iter()
                    .all(|id| fs.folder(*id).is_some_and(|f| f.deleted));
                if folder_ids.is_empty() || !all_deleted {
                    return Envelope::fail(codes::INVALID_FOLDER_ID);
                }
                for id in folder_ids {
                    if let Some(folder) = fs.folder_mut(*id) {
                        folder.deleted = false;
                        folder.modified_at = Utc::now();
                    }
                }
                Envelope::done()
            })
            .await)
    }

    async fn restore_files(
        &self,
        file_ids: &[FileId],
        folder_ids: &[FolderId],
        file_system_id: FileSystemId,
    ) -> AppResult<Envelope<()>> {
        Ok(self
            .with_fs(file_system_id, |fs| {
                if file_ids.is_empty() || file_ids.len() != folder_ids.len() {
                    return Envelope::fail(codes::INVALID_REQUEST);
                }
                let all_match = file_ids.iter().zip(folder_ids).all(|(file_id, folder_id)| {
                    fs.files
                        .iter()
                        .any(|f| f.id == *file_id && f.folder_id == *folder_id && f.deleted)
                });
                if !all_match {
                    return Envelope::fail(codes::INVALID_FILE_ID);
                }
                for id in file_ids {
                    if let Some(file) = fs.file_mut(*id) {
                        file.deleted = false;
                        file.modified_at = Utc::now();
                    }
                }
                Envelope::done()
            })
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivedesk_core::config::TransferConfig;
    use drivedesk_core::traits::admin::{FileAdminApi, FolderAdminApi};

    use crate::model::{FileSystemState, Snapshot};

    const FS: FileSystemId = FileSystemId(1);

    fn backend() -> MemoryBackend {
        let fs = FileSystemState::new(1, "main")
            .with_folder(1, 0, "docs")
            .with_file(1, 1, "a.txt", b"abc");
        MemoryBackend::new(Snapshot::new(vec![fs]), &TransferConfig::default())
    }

    #[tokio::test]
    async fn test_delete_then_restore_roundtrip() {
        let backend = backend();
        backend.delete_file(FileId(1), FolderId(1), FS).await.unwrap();
        backend.delete_folder(FolderId(1), FS).await.unwrap();

        let items = backend.list_deleted(FS).await.unwrap().into_result().unwrap();
        assert_eq!(items.folders.len(), 1);
        assert_eq!(items.files[0].size_bytes, 3);

        backend
            .restore_folders(&[FolderId(1)], FS)
            .await
            .unwrap()
            .into_unit()
            .unwrap();
        backend
            .restore_files(&[FileId(1)], &[FolderId(1)], FS)
            .await
            .unwrap()
            .into_unit()
            .unwrap();
        let items = backend.list_deleted(FS).await.unwrap().into_result().unwrap();
        assert_eq!(items, DeletedItems::default());
    }

    #[tokio::test]
    async fn test_restore_rejects_live_or_mismatched_items() {
        let backend = backend();
        let env = backend.restore_folders(&[FolderId(1)], FS).await.unwrap();
        assert_eq!(env.message.as_deref(), Some(codes::INVALID_FOLDER_ID));

        backend.delete_file(FileId(1), FolderId(1), FS).await.unwrap();
        let env = backend
            .restore_files(&[FileId(1)], &[FolderId(7)], FS)
            .await
            .unwrap();
        assert_eq!(env.message.as_deref(), Some(codes::INVALID_FILE_ID));
        let env = backend.restore_files(&[FileId(1)], &[], FS).await.unwrap();
        assert_eq!(env.message.as_deref(), Some(codes::INVALID_REQUEST));
    }
}
