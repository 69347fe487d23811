//! Chunked upload and download with per-chunk progress.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use chrono::Utc;
use tracing::debug;

use drivedesk_core::result::AppResult;
use drivedesk_core::traits::transfer::{ProgressFn, TransferApi};
use drivedesk_core::types::{Envelope, FileId, FileSystemId, FolderId, codes};
use drivedesk_entity::folder::check_name;

use crate::chunked::ChunkPlan;
use crate::model::StoredFile;

use super::MemoryBackend;

#[async_trait]
impl TransferApi for MemoryBackend {
    async fn upload(
        &self,
        data: Bytes,
        file_name: &str,
        access_token: &str,
        file_system_id: FileSystemId,
        folder_id: FolderId,
        progress: ProgressFn,
    ) -> AppResult<Envelope<()>> {
        if !self.token_accepted(access_token) {
            return Ok(Envelope::fail(codes::ACCESS_DENIED));
        }
        if check_name(file_name).is_err() {
            return Ok(Envelope::fail(codes::INVALID_FILE_NAME));
        }
        let target_ok = self
            .with_fs(file_system_id, |fs| {
                if fs.is_live(folder_id) {
                    Envelope::done()
                } else {
                    Envelope::fail(codes::INVALID_FOLDER_ID)
                }
            })
            .await;
        if !target_ok.success {
            return Ok(target_ok);
        }

        let plan = ChunkPlan::new(data.len(), self.chunk_size);
        let mut received = BytesMut::with_capacity(data.len());
        for range in plan.chunks() {
            received.extend_from_slice(&data[range.clone()]);
            progress(plan.percent_after(range.end));
            tokio::task::yield_now().await;
        }

        Ok(self
            .with_fs(file_system_id, |fs| {
                // the folder may have been deleted while chunks were in flight
                if !fs.is_live(folder_id) {
                    return Envelope::fail(codes::INVALID_FOLDER_ID);
                }
                let id = fs.next_file_id();
                fs.files.push(StoredFile {
                    id,
                    folder_id,
                    name: file_name.trim().to_string(),
                    content: received.freeze(),
                    deleted: false,
                    modified_at: Utc::now(),
                });
                debug!(file_id = %id, folder_id = %folder_id, "Upload stored");
                Envelope::done()
            })
            .await)
    }

    async fn download(
        &self,
        access_token: &str,
        file_id: FileId,
        folder_id: FolderId,
        file_system_id: FileSystemId,
        progress: ProgressFn,
    ) -> AppResult<Envelope<Bytes>> {
        if !self.token_accepted(access_token) {
            return Ok(Envelope::fail(codes::ACCESS_DENIED));
        }
        let found = self
            .with_fs(file_system_id, |fs| {
                match fs
                    .files
                    .iter()
                    .find(|f| f.id == file_id && f.folder_id == folder_id && !f.deleted)
                {
                    Some(file) => Envelope::ok(file.content.clone()),
                    None => Envelope::fail(codes::INVALID_FILE_ID),
                }
            })
            .await;
        let content = match found.into_result() {
            Ok(content) => content,
            Err(err) => return Ok(Envelope::fail(err.message)),
        };

        let plan = ChunkPlan::new(content.len(), self.chunk_size);
        let mut sent = BytesMut::with_capacity(content.len());
        for range in plan.chunks() {
            sent.extend_from_slice(&content[range.clone()]);
            progress(plan.percent_after(range.end));
            tokio::task::yield_now().await;
        }
        Ok(Envelope::ok(sent.freeze()))
    }
}
