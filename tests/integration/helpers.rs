//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use tempfile::TempDir;

use drivedesk_core::config::{SizeConfig, TransferConfig};
use drivedesk_core::result::AppResult;
use drivedesk_core::traits::{Notifier, ProgressFn, TransferApi};
use drivedesk_core::types::{Envelope, FileId, FileSystemId, FolderId, codes};
use drivedesk_service::{BackendHandles, FolderSession, SessionContext, StaticAccessToken};
use drivedesk_storage::{FileSystemState, LocalFileSaver, MemoryBackend, Snapshot};

/// Token accepted by the test backend.
pub const TOKEN: &str = "integration-token";

/// File system every test session manages.
pub const FS: FileSystemId = FileSystemId(1);

/// Records every toast shown to the user.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(bool, String)>>,
}

impl RecordingNotifier {
    /// Success messages, in order.
    pub fn successes(&self) -> Vec<String> {
        self.filtered(true)
    }

    /// Error messages, in order.
    pub fn errors(&self) -> Vec<String> {
        self.filtered(false)
    }

    fn filtered(&self, success: bool) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(ok, _)| *ok == success)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.messages.lock().unwrap().push((true, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push((false, message.to_string()));
    }
}

/// Transfer calls that go to the backend, except uploads of one file name,
/// which the backend refuses as over quota.
pub struct RejectingTransfer {
    inner: Arc<MemoryBackend>,
    reject: &'static str,
}

#[async_trait]
impl TransferApi for RejectingTransfer {
    async fn upload(
        &self,
        data: Bytes,
        file_name: &str,
        access_token: &str,
        file_system_id: FileSystemId,
        folder_id: FolderId,
        progress: ProgressFn,
    ) -> AppResult<Envelope<()>> {
        if file_name == self.reject {
            return Ok(Envelope::fail(codes::QUOTA_EXCEEDED));
        }
        self.inner
            .upload(data, file_name, access_token, file_system_id, folder_id, progress)
            .await
    }

    async fn download(
        &self,
        access_token: &str,
        file_id: FileId,
        folder_id: FolderId,
        file_system_id: FileSystemId,
        progress: ProgressFn,
    ) -> AppResult<Envelope<Bytes>> {
        self.inner
            .download(access_token, file_id, folder_id, file_system_id, progress)
            .await
    }
}

/// Test application context
pub struct TestApp {
    /// Shared backend; also reachable through the session's handles
    pub backend: Arc<MemoryBackend>,
    /// Session under test
    pub session: FolderSession,
    /// Toasts shown so far
    pub notifier: Arc<RecordingNotifier>,
    /// Where downloads land
    pub downloads: TempDir,
}

impl TestApp {
    /// Open a session over the standard fixture.
    pub async fn new() -> Self {
        Self::with_state(fixture()).await
    }

    /// Open a session over `state`, with 4-byte transfer chunks.
    pub async fn with_state(state: FileSystemState) -> Self {
        Self::build(state, None).await
    }

    /// Open a session over the standard fixture whose uploads of
    /// `file_name` are refused.
    pub async fn rejecting_upload(file_name: &'static str) -> Self {
        Self::build(fixture(), Some(file_name)).await
    }

    async fn build(state: FileSystemState, reject: Option<&'static str>) -> Self {
        let transfer = TransferConfig {
            chunk_size_bytes: 4,
            max_upload_size_bytes: 1024,
        };
        let backend = Arc::new(
            MemoryBackend::new(Snapshot::new(vec![state]), &transfer).with_access_token(TOKEN),
        );
        let notifier = Arc::new(RecordingNotifier::default());
        let downloads = tempfile::tempdir().expect("Failed to create download dir");

        let mut handles = BackendHandles::from_backend(backend.clone());
        if let Some(reject) = reject {
            handles.transfer = Arc::new(RejectingTransfer {
                inner: backend.clone(),
                reject,
            });
        }

        let session = FolderSession::open(SessionContext {
            file_system_id: FS,
            backend: handles,
            tokens: Arc::new(StaticAccessToken::new(Some(TOKEN.to_string()))),
            saver: Arc::new(LocalFileSaver::new(downloads.path())),
            notifier: notifier.clone(),
            size: SizeConfig { max_fan_out: 2 },
            transfer,
        })
        .await
        .expect("Failed to open session");

        Self {
            backend,
            session,
            notifier,
            downloads,
        }
    }

    /// Names of the open folder's rows, in display order.
    pub fn row_names(&self) -> Vec<String> {
        self.session
            .rows()
            .iter()
            .map(|row| row.name().to_string())
            .collect()
    }
}

/// ```text
/// docs(1) ── reports(2) ── q1(3)
/// media(4)
/// files: readme.md (root, 10 B), plan.txt (docs, 100 B),
///        q1.csv (q1, 300 B), photo.jpg (media, 2048 B)
/// ```
pub fn fixture() -> FileSystemState {
    FileSystemState::new(FS.get(), "main")
        .with_folder(1, 0, "docs")
        .with_folder(2, 1, "reports")
        .with_folder(3, 2, "q1")
        .with_folder(4, 0, "media")
        .with_file(1, 0, "readme.md", &[b'r'; 10])
        .with_file(2, 1, "plan.txt", &[b'p'; 100])
        .with_file(3, 3, "q1.csv", &[b'q'; 300])
        .with_file(4, 4, "photo.jpg", &[0u8; 2048])
}
