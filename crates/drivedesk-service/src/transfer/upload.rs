//! Sequential multi-file upload with per-file state and batch progress.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use bytes::Bytes;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

use drivedesk_core::error::AppError;
use drivedesk_core::traits::{AccessTokenSource, ProgressFn, TransferApi};
use drivedesk_core::types::{FileSystemId, FolderId};
use drivedesk_entity::folder::check_name;
use drivedesk_entity::transfer::{TransferStatus, TransferTask};

use crate::folder::format_size;

/// A file picked for upload.
#[derive(Debug, Clone)]
pub struct UploadSource {
    /// Name the file will get in the target folder.
    pub file_name: String,
    /// File bytes.
    pub data: Bytes,
}

impl UploadSource {
    /// Wrap a named payload.
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Batch progress published while a batch runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    /// Files in the running batch.
    pub total: usize,
    /// Files completed so far.
    pub completed: usize,
    /// File currently being sent.
    pub current_file: Option<String>,
    /// `(completed + current fraction) / total`, as an integer percent.
    pub percent: u8,
}

/// The file that stopped a batch.
#[derive(Debug, Clone)]
pub struct UploadFailure {
    /// File name.
    pub file_name: String,
    /// Why it failed.
    pub error: AppError,
}

/// Outcome of one [`UploadManager::run`].
#[derive(Debug, Clone, Default)]
pub struct UploadSummary {
    /// Files accepted by the backend.
    pub completed: usize,
    /// Files left pending because an earlier file failed.
    pub not_attempted: usize,
    /// The failing file, if any.
    pub failure: Option<UploadFailure>,
}

#[derive(Debug, Clone)]
struct QueuedUpload {
    task: TransferTask,
    data: Bytes,
    batch: u64,
}

/// Queue of uploads for one session.
///
/// Files added between two [`run`](UploadManager::run) calls form one batch.
/// Files run strictly one after another. The first failure marks that file
/// `Error` and stops the batch; later files stay `Pending` and are never
/// sent by a later batch.
pub struct UploadManager {
    transfer: Arc<dyn TransferApi>,
    tokens: Arc<dyn AccessTokenSource>,
    file_system_id: FileSystemId,
    max_upload_size_bytes: u64,
    queue: Vec<QueuedUpload>,
    /// Batch that `add` currently fills.
    open_batch: u64,
    progress: Arc<watch::Sender<BatchProgress>>,
}

impl std::fmt::Debug for UploadManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadManager")
            .field("file_system_id", &self.file_system_id)
            .field("queued", &self.queue.len())
            .finish()
    }
}

impl UploadManager {
    /// Creates an empty queue.
    pub fn new(
        transfer: Arc<dyn TransferApi>,
        tokens: Arc<dyn AccessTokenSource>,
        file_system_id: FileSystemId,
        max_upload_size_bytes: u64,
    ) -> Self {
        let (progress, _) = watch::channel(BatchProgress::default());
        Self {
            transfer,
            tokens,
            file_system_id,
            max_upload_size_bytes,
            queue: Vec::new(),
            open_batch: 0,
            progress: Arc::new(progress),
        }
    }

    /// Queue files into the open batch, skipping any whose name and size
    /// match a file already in that batch.
    ///
    /// Nothing is queued when any file has an invalid name or exceeds the
    /// upload limit. Returns how many files were added.
    pub fn add(&mut self, files: Vec<UploadSource>) -> Result<usize, AppError> {
        for file in &files {
            check_name(&file.file_name).map_err(|v| {
                AppError::validation(format!("'{}': {}", file.file_name, v.describe()))
            })?;
            if file.size() > self.max_upload_size_bytes {
                return Err(AppError::validation(format!(
                    "'{}' is larger than the upload limit of {}",
                    file.file_name,
                    format_size(self.max_upload_size_bytes)
                )));
            }
        }

        let open = self.open_batch;
        let mut added = 0;
        for file in files {
            let size = file.size();
            if self
                .queue
                .iter()
                .any(|q| q.batch == open && q.task.same_file(&file.file_name, size))
            {
                continue;
            }
            self.queue.push(QueuedUpload {
                task: TransferTask::new(file.file_name, size),
                data: file.data,
                batch: open,
            });
            added += 1;
        }
        Ok(added)
    }

    /// Every task in submission order.
    pub fn tasks(&self) -> impl Iterator<Item = &TransferTask> {
        self.queue.iter().map(|q| &q.task)
    }

    /// Watch batch progress.
    pub fn subscribe(&self) -> watch::Receiver<BatchProgress> {
        self.progress.subscribe()
    }

    /// Drop every task outside the open batch: finished ones and the
    /// leftovers of aborted batches.
    pub fn clear_finished(&mut self) {
        let open = self.open_batch;
        self.queue.retain(|q| q.batch == open);
    }

    /// Upload the open batch into `folder_id` and close it.
    ///
    /// Fails before any upload starts when there is no access token.
    /// A per-file failure does not fail the call; it ends the batch and is
    /// reported in the summary.
    pub async fn run(&mut self, folder_id: FolderId) -> Result<UploadSummary, AppError> {
        let batch = self.open_batch;
        self.open_batch += 1;

        let token = self
            .tokens
            .access_token()
            .ok_or_else(|| AppError::authentication("Your session has expired. Sign in again."))?;

        let mut pending = Vec::new();
        for (index, entry) in self.queue.iter_mut().enumerate() {
            if entry.batch == batch && entry.task.status() == TransferStatus::Pending {
                entry.task.folder_id = Some(folder_id);
                pending.push(index);
            }
        }
        let total = pending.len();
        let mut summary = UploadSummary::default();
        if total == 0 {
            return Ok(summary);
        }
        self.progress.send_replace(BatchProgress {
            total,
            ..BatchProgress::default()
        });

        for (done, &index) in pending.iter().enumerate() {
            let entry = &mut self.queue[index];
            entry.task.advance(TransferStatus::Uploading)?;
            let file_name = entry.task.file_name.clone();
            let data = entry.data.clone();
            self.progress.send_modify(|p| p.current_file = Some(file_name.clone()));

            let last_percent = Arc::new(AtomicU8::new(0));
            let callback: ProgressFn = {
                let progress = Arc::clone(&self.progress);
                let last_percent = Arc::clone(&last_percent);
                Arc::new(move |percent: u8| {
                    let percent = percent.min(100);
                    last_percent.store(percent, Ordering::Relaxed);
                    let overall = (done * 100 + usize::from(percent)) / total;
                    progress.send_modify(|p| p.percent = overall as u8);
                })
            };

            let outcome = match self
                .transfer
                .upload(
                    data,
                    &file_name,
                    &token,
                    self.file_system_id,
                    folder_id,
                    callback,
                )
                .await
            {
                Ok(envelope) => envelope.into_unit(),
                Err(err) => Err(err),
            };

            let task = &mut self.queue[index].task;
            task.progress = last_percent.load(Ordering::Relaxed);
            match outcome {
                Ok(()) => {
                    task.advance(TransferStatus::Completed)?;
                    summary.completed += 1;
                    self.progress.send_modify(|p| {
                        p.completed = done + 1;
                        p.percent = ((done + 1) * 100 / total) as u8;
                    });
                    info!(file_name = %file_name, folder_id = %folder_id, "File uploaded");
                }
                Err(err) => {
                    task.fail(err.message.clone())?;
                    warn!(file_name = %file_name, error = %err, "Upload failed, stopping batch");
                    summary.not_attempted = total - done - 1;
                    summary.failure = Some(UploadFailure { file_name, error: err });
                    break;
                }
            }
        }

        self.progress.send_modify(|p| p.current_file = None);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use drivedesk_core::error::ErrorKind;
    use drivedesk_core::types::{Envelope, FileId, codes};

    use crate::context::StaticAccessToken;

    /// Accepts every file except `reject`, recording call order.
    struct Recorder {
        reject: &'static str,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TransferApi for Recorder {
        async fn upload(
            &self,
            _data: Bytes,
            file_name: &str,
            _access_token: &str,
            _file_system_id: FileSystemId,
            _folder_id: FolderId,
            progress: ProgressFn,
        ) -> Result<Envelope<()>, AppError> {
            self.calls.lock().unwrap().push(file_name.to_string());
            progress(50);
            if file_name == self.reject {
                return Ok(Envelope::fail(codes::QUOTA_EXCEEDED));
            }
            progress(100);
            Ok(Envelope::done())
        }

        async fn download(
            &self,
            _access_token: &str,
            _file_id: FileId,
            _folder_id: FolderId,
            _file_system_id: FileSystemId,
            _progress: ProgressFn,
        ) -> Result<Envelope<Bytes>, AppError> {
            Ok(Envelope::fail(codes::INVALID_FILE_ID))
        }
    }

    fn manager(reject: &'static str, token: Option<&str>) -> (UploadManager, Arc<Recorder>) {
        let recorder = Arc::new(Recorder {
            reject,
            calls: Mutex::new(Vec::new()),
        });
        let manager = UploadManager::new(
            recorder.clone(),
            Arc::new(StaticAccessToken::new(token.map(str::to_string))),
            FileSystemId(1),
            1024,
        );
        (manager, recorder)
    }

    fn files() -> Vec<UploadSource> {
        vec![
            UploadSource::new("a.txt", &b"aaa"[..]),
            UploadSource::new("b.txt", &b"bb"[..]),
            UploadSource::new("c.txt", &b"c"[..]),
        ]
    }

    fn statuses(manager: &UploadManager) -> Vec<TransferStatus> {
        manager.tasks().map(|t| t.status()).collect()
    }

    #[tokio::test]
    async fn test_first_failure_aborts_the_rest() {
        let (mut manager, recorder) = manager("b.txt", Some("t"));
        manager.add(files()).unwrap();
        let summary = manager.run(FolderId(1)).await.unwrap();

        assert_eq!(
            statuses(&manager),
            vec![
                TransferStatus::Completed,
                TransferStatus::Error,
                TransferStatus::Pending
            ]
        );
        assert_eq!(*recorder.calls.lock().unwrap(), vec!["a.txt", "b.txt"]);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.not_attempted, 1);
        let failure = summary.failure.unwrap();
        assert_eq!(failure.file_name, "b.txt");
        assert_eq!(failure.error.business_code(), Some(codes::QUOTA_EXCEEDED));
        assert_eq!(manager.subscribe().borrow().percent, 50);
    }

    #[tokio::test]
    async fn test_full_batch_reaches_100_percent() {
        let (mut manager, _) = manager("", Some("t"));
        manager.add(files()).unwrap();
        let progress = manager.subscribe();
        let summary = manager.run(FolderId(1)).await.unwrap();
        assert_eq!(summary.completed, 3);
        assert!(summary.failure.is_none());
        let last = progress.borrow().clone();
        assert_eq!(last.percent, 100);
        assert_eq!(last.completed, 3);
        assert_eq!(last.current_file, None);
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_any_upload() {
        let (mut manager, recorder) = manager("", None);
        manager.add(files()).unwrap();
        let err = manager.run(FolderId(1)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(recorder.calls.lock().unwrap().is_empty());
        assert!(statuses(&manager).iter().all(|s| *s == TransferStatus::Pending));
    }

    #[test]
    fn test_duplicates_are_skipped() {
        let (mut manager, _) = manager("", Some("t"));
        assert_eq!(manager.add(files()).unwrap(), 3);
        assert_eq!(
            manager
                .add(vec![
                    UploadSource::new("a.txt", &b"aaa"[..]),
                    UploadSource::new("a.txt", &b"aaaa"[..]),
                ])
                .unwrap(),
            1
        );
        assert_eq!(manager.tasks().count(), 4);
    }

    #[test]
    fn test_oversize_batch_is_refused_whole() {
        let (mut manager, _) = manager("", Some("t"));
        let err = manager
            .add(vec![
                UploadSource::new("ok.txt", &b"1"[..]),
                UploadSource::new("big.bin", vec![0u8; 2048]),
            ])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(manager.tasks().count(), 0);
    }

    #[tokio::test]
    async fn test_next_batch_accepts_files_sent_before() {
        let (mut manager, recorder) = manager("", Some("t"));
        manager.add(files()).unwrap();
        manager.run(FolderId(1)).await.unwrap();

        assert_eq!(manager.add(files()).unwrap(), 3);
        let summary = manager.run(FolderId(4)).await.unwrap();

        assert_eq!(summary.completed, 3);
        assert_eq!(recorder.calls.lock().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_aborted_leftovers_stay_out_of_later_batches() {
        let (mut manager, recorder) = manager("b.txt", Some("t"));
        manager.add(files()).unwrap();
        manager.run(FolderId(1)).await.unwrap();

        manager
            .add(vec![UploadSource::new("new.txt", &b"n"[..])])
            .unwrap();
        let summary = manager.run(FolderId(4)).await.unwrap();

        assert_eq!(summary.completed, 1);
        assert_eq!(
            *recorder.calls.lock().unwrap(),
            vec!["a.txt", "b.txt", "new.txt"]
        );
        let leftover = manager.tasks().find(|t| t.file_name == "c.txt").unwrap();
        assert_eq!(leftover.status(), TransferStatus::Pending);
        assert_eq!(leftover.folder_id, Some(FolderId(1)));
        let new = manager.tasks().find(|t| t.file_name == "new.txt").unwrap();
        assert_eq!(new.folder_id, Some(FolderId(4)));
    }

    #[tokio::test]
    async fn test_clear_finished_keeps_only_the_open_batch() {
        let (mut manager, _) = manager("b.txt", Some("t"));
        manager.add(files()).unwrap();
        manager.run(FolderId(1)).await.unwrap();
        manager
            .add(vec![UploadSource::new("d.txt", &b"d"[..])])
            .unwrap();

        manager.clear_finished();

        let names: Vec<_> = manager.tasks().map(|t| t.file_name.as_str()).collect();
        assert_eq!(names, vec!["d.txt"]);
    }
}
