//! Backend, session and snapshot wiring shared by every command.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use drivedesk_core::config::AppConfig;
use drivedesk_core::error::AppError;
use drivedesk_core::types::{FileId, FileSystemId, FolderId};
use drivedesk_entity::content::ContentRow;
use drivedesk_service::{BackendHandles, FolderSession, SessionContext, StaticAccessToken};
use drivedesk_storage::{FileSystemState, LocalFileSaver, MemoryBackend, snapshot};

use crate::output::ConsoleNotifier;

/// Token the console presents when none is configured.
const CONSOLE_TOKEN: &str = "console";

/// An opened drive: the backend over the snapshot plus one session.
pub struct Workspace {
    backend: Arc<MemoryBackend>,
    snapshot_path: PathBuf,
    pub session: FolderSession,
}

impl Workspace {
    /// Load the snapshot and open a session on the configured file system,
    /// creating the file system when the snapshot has none by that id.
    pub async fn open(config: &AppConfig) -> Result<Self, AppError> {
        let snapshot_path = PathBuf::from(&config.backend.snapshot_path);
        let mut state = snapshot::load(&snapshot_path).await?;

        let file_system_id = FileSystemId(config.backend.file_system_id);
        if state.file_system_mut(file_system_id).is_none() {
            info!(file_system_id = %file_system_id, "Creating empty file system");
            state.file_systems.push(FileSystemState::new(
                file_system_id.get(),
                format!("Drive {file_system_id}"),
            ));
        }

        let mut backend = MemoryBackend::new(state, &config.transfer);
        if let Some(token) = &config.backend.access_token {
            backend = backend.with_access_token(token.clone());
        }
        let backend = Arc::new(backend);
        let token = config
            .backend
            .access_token
            .clone()
            .unwrap_or_else(|| CONSOLE_TOKEN.to_string());

        let session = FolderSession::open(SessionContext {
            file_system_id,
            backend: BackendHandles::from_backend(backend.clone()),
            tokens: Arc::new(StaticAccessToken::new(Some(token))),
            saver: Arc::new(LocalFileSaver::new(&config.backend.download_dir)),
            notifier: Arc::new(ConsoleNotifier),
            size: config.size.clone(),
            transfer: config.transfer.clone(),
        })
        .await?;

        Ok(Self {
            backend,
            snapshot_path,
            session,
        })
    }

    /// Persist the backend state.
    pub async fn save(&self) -> Result<(), AppError> {
        snapshot::save(&self.snapshot_path, &self.backend.snapshot().await).await
    }

    /// Open the folder containing `folder_id` and return its row.
    pub async fn folder_row(&mut self, folder_id: FolderId) -> Result<ContentRow, AppError> {
        let parent = self
            .session
            .navigator()
            .tree()
            .find(folder_id)
            .map(|node| node.parent_id)
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;
        self.session.select_folder(parent).await?;
        self.find_row(|row| row.folder_id() == Some(folder_id))
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Open `folder_id` and return the row of `file_id` inside it.
    pub async fn file_row(
        &mut self,
        file_id: FileId,
        folder_id: FolderId,
    ) -> Result<ContentRow, AppError> {
        self.session.select_folder(folder_id).await?;
        self.find_row(|row| row.file_id() == Some(file_id))
            .ok_or_else(|| {
                AppError::not_found(format!("File {file_id} not found in folder {folder_id}"))
            })
    }

    fn find_row(&self, matches: impl Fn(&ContentRow) -> bool) -> Option<ContentRow> {
        self.session.rows().iter().find(|row| matches(row)).cloned()
    }
}
