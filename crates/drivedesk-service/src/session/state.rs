//! Session state for one selected file system.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use drivedesk_core::error::AppError;
use drivedesk_core::traits::{FolderContentApi, Notifier, ProgressFn};
use drivedesk_core::types::{FileSystemId, FolderId};
use drivedesk_entity::content::ContentRow;
use drivedesk_entity::folder::FolderTree;

use super::action::{ActionOutcome, FolderAction, RowDetails};
use crate::context::SessionContext;
use crate::folder::{
    FolderNavigator, FolderService, SizeAggregator, SizeOutcome, SizeTracker, TreeService,
    format_size,
};
use crate::messages::{self, user_message};
use crate::recycle::RecycleBinCoordinator;
use crate::transfer::{DownloadService, UploadManager, UploadSource, UploadSummary};

/// Everything the folder screen holds for one file system: the tree and
/// navigation state, the open folder's rows, the size cache, the upload
/// queue, and the loading and error flags.
pub struct FolderSession {
    file_system_id: FileSystemId,
    navigator: FolderNavigator,
    rows: Vec<ContentRow>,
    last_error: Option<String>,
    loading: watch::Sender<bool>,
    contents: Arc<dyn FolderContentApi>,
    trees: TreeService,
    folders: FolderService,
    sizes: SizeTracker,
    uploads: UploadManager,
    downloads: DownloadService,
    recycle: RecycleBinCoordinator,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for FolderSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderSession")
            .field("file_system_id", &self.file_system_id)
            .field("current_folder_id", &self.navigator.current_folder_id())
            .field("rows", &self.rows.len())
            .finish()
    }
}

impl FolderSession {
    /// A session at the root with an empty tree. Call
    /// [`reload_tree`](Self::reload_tree) and
    /// [`load_folder_contents`](Self::load_folder_contents) to populate it,
    /// or use [`open`](Self::open).
    pub fn new(ctx: SessionContext) -> Self {
        let fs = ctx.file_system_id;
        let backend = ctx.backend;
        let trees = TreeService::new(backend.structure.clone());
        let (loading, _) = watch::channel(false);

        Self {
            file_system_id: fs,
            navigator: FolderNavigator::new(FolderTree::empty()),
            rows: Vec::new(),
            last_error: None,
            loading,
            contents: backend.contents.clone(),
            folders: FolderService::new(backend.folders.clone(), backend.files.clone(), fs),
            sizes: SizeTracker::new(SizeAggregator::new(
                backend.contents.clone(),
                fs,
                ctx.size.max_fan_out,
            )),
            uploads: UploadManager::new(
                backend.transfer.clone(),
                ctx.tokens.clone(),
                fs,
                ctx.transfer.max_upload_size_bytes,
            ),
            downloads: DownloadService::new(backend.transfer, ctx.tokens, ctx.saver, fs),
            recycle: RecycleBinCoordinator::new(backend.recycle, trees.clone(), fs),
            trees,
            notifier: ctx.notifier,
        }
    }

    /// A session with the tree and root contents loaded.
    pub async fn open(ctx: SessionContext) -> Result<Self, AppError> {
        let mut session = Self::new(ctx);
        session.reload_tree().await?;
        session.load_folder_contents().await?;
        Ok(session)
    }

    /// The selected file system.
    pub fn file_system_id(&self) -> FileSystemId {
        self.file_system_id
    }

    /// Tree and navigation state.
    pub fn navigator(&self) -> &FolderNavigator {
        &self.navigator
    }

    /// The open folder.
    pub fn current_folder_id(&self) -> FolderId {
        self.navigator.current_folder_id()
    }

    /// Rows of the open folder, subfolders first.
    pub fn rows(&self) -> &[ContentRow] {
        &self.rows
    }

    /// The user message of the last failure, cleared by the next
    /// successful load.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Watch the loading flag.
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// The size cache.
    pub fn sizes(&self) -> &SizeTracker {
        &self.sizes
    }

    /// The upload queue.
    pub fn uploads(&self) -> &UploadManager {
        &self.uploads
    }

    /// `/`-separated names from the top level down to `folder_id`.
    pub fn path_label(&self, folder_id: FolderId) -> String {
        let tree = self.navigator.tree();
        let names: Vec<&str> = tree
            .path_to(folder_id)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|id| tree.find(id).map(|n| n.name.as_str()))
            .collect();
        format!("/{}", names.join("/"))
    }

    /// Rebuild the tree from the structure call, keeping the open folder
    /// when it still exists.
    pub async fn reload_tree(&mut self) -> Result<(), AppError> {
        let tree = self.trees.load_tree(self.file_system_id).await?;
        self.navigator.replace_tree(tree);
        Ok(())
    }

    /// Fetch the open folder's rows. On failure the rows are cleared and
    /// the error is kept in [`last_error`](Self::last_error).
    pub async fn load_folder_contents(&mut self) -> Result<(), AppError> {
        let folder_id = self.navigator.current_folder_id();
        self.loading.send_replace(true);
        let listing = async {
            self.contents
                .list_contents(folder_id, self.file_system_id)
                .await?
                .into_result()
        }
        .await;
        self.loading.send_replace(false);

        match listing {
            Ok(listing) => {
                self.rows = ContentRow::from_listing(listing);
                self.last_error = None;
                debug!(folder_id = %folder_id, rows = self.rows.len(), "Folder contents loaded");
                Ok(())
            }
            Err(err) => {
                self.rows.clear();
                self.last_error = Some(user_message(&err));
                Err(err)
            }
        }
    }

    /// Open `folder_id` from the tree.
    pub async fn select_folder(&mut self, folder_id: FolderId) -> Result<(), AppError> {
        if !folder_id.is_root() && !self.navigator.tree().contains(folder_id) {
            return Err(AppError::not_found(format!(
                "Folder {folder_id} is not in the folder tree"
            )));
        }
        self.navigator.select_folder(folder_id);
        self.load_folder_contents().await
    }

    /// Return to the previous folder.
    pub async fn go_back(&mut self) -> Result<FolderId, AppError> {
        let folder_id = self.navigator.go_back();
        self.load_folder_contents().await?;
        Ok(folder_id)
    }

    /// Create a folder inside the open folder.
    pub async fn create_folder(&mut self, name: &str) -> Result<(), AppError> {
        let parent = self.navigator.current_folder_id();
        let result = self.folders.create_folder(parent, name).await;
        self.report(result, messages::CREATED)?;
        self.refresh(true).await;
        Ok(())
    }

    /// Upload `files` as a new batch into the open folder. Tasks of earlier
    /// batches, including files an aborted batch never sent, are dropped
    /// first.
    pub async fn upload_files(
        &mut self,
        files: Vec<UploadSource>,
    ) -> Result<UploadSummary, AppError> {
        let folder_id = self.navigator.current_folder_id();
        self.uploads.clear_finished();
        let result = match self.uploads.add(files) {
            Ok(_) => self.uploads.run(folder_id).await,
            Err(err) => Err(err),
        };
        let summary = match result {
            Ok(summary) => summary,
            Err(err) => {
                let message = user_message(&err);
                self.notifier.error(&message);
                self.last_error = Some(message);
                return Err(err);
            }
        };
        if let Some(failure) = &summary.failure {
            let message = format!("{}: {}", failure.file_name, user_message(&failure.error));
            self.notifier.error(&message);
            self.last_error = Some(message);
        } else if summary.completed > 0 {
            self.notifier.success(messages::UPLOADED);
        }
        if summary.completed > 0 {
            self.refresh(false).await;
        }
        Ok(summary)
    }

    /// Run one row action, notifying the user of the result.
    pub async fn handle(&mut self, action: FolderAction) -> ActionOutcome {
        let kind = action.kind();
        match self.dispatch(action).await {
            Ok(outcome) => {
                if let Some(text) = success_text(&outcome) {
                    self.notifier.success(text);
                }
                outcome
            }
            Err(err) => {
                warn!(action = ?kind, error = %err, "Folder action failed");
                let message = user_message(&err);
                self.notifier.error(&message);
                self.last_error = Some(message.clone());
                ActionOutcome::Failed { message }
            }
        }
    }

    async fn dispatch(&mut self, action: FolderAction) -> Result<ActionOutcome, AppError> {
        let current = self.navigator.current_folder_id();
        match action {
            FolderAction::Open(row) => {
                let folder_id = self.navigator.navigate_into(&row)?;
                self.load_folder_contents().await?;
                Ok(ActionOutcome::Opened { folder_id })
            }
            FolderAction::ViewDetails(row) => Ok(ActionOutcome::Details(self.details(&row))),
            FolderAction::Rename { row, new_name } => {
                match &row {
                    ContentRow::Folder { id, .. } => {
                        self.folders.rename_folder(*id, &new_name).await?;
                    }
                    ContentRow::File { id, .. } => {
                        self.folders.rename_file(*id, current, &new_name).await?;
                    }
                }
                self.refresh(row.is_folder()).await;
                Ok(ActionOutcome::Renamed)
            }
            FolderAction::Move {
                folder_id,
                destination,
            } => {
                self.folders
                    .move_folder(folder_id, destination, self.navigator.tree())
                    .await?;
                self.refresh(true).await;
                Ok(ActionOutcome::Moved)
            }
            FolderAction::Delete(row) => {
                match &row {
                    ContentRow::Folder { id, .. } => self.folders.delete_folder(*id).await?,
                    ContentRow::File { id, .. } => self.folders.delete_file(*id, current).await?,
                }
                self.refresh(row.is_folder()).await;
                Ok(ActionOutcome::Deleted)
            }
            FolderAction::Download(row) => {
                let file_id = row
                    .file_id()
                    .ok_or_else(|| AppError::validation("Only files can be downloaded"))?;
                let file_name = row.name().to_string();
                let progress: ProgressFn = {
                    let file_name = file_name.clone();
                    Arc::new(move |percent: u8| {
                        debug!(file_name = %file_name, percent, "Download progress");
                    })
                };
                let bytes = self
                    .downloads
                    .download(file_id, current, &file_name, progress)
                    .await?;
                Ok(ActionOutcome::Downloaded { file_name, bytes })
            }
            FolderAction::CalculateSize(folder_id) => match self.sizes.request(folder_id).await? {
                SizeOutcome::Computed { bytes, formatted } => Ok(ActionOutcome::SizeComputed {
                    folder_id,
                    bytes,
                    formatted,
                }),
                SizeOutcome::AlreadyComputing => {
                    Ok(ActionOutcome::SizeAlreadyComputing { folder_id })
                }
            },
            FolderAction::OpenRecycleBin => Ok(ActionOutcome::RecycleBin(self.recycle.load().await?)),
            FolderAction::Restore(selection) => {
                self.recycle.restore(&selection).await?;
                self.refresh(true).await;
                Ok(ActionOutcome::Restored)
            }
        }
    }

    fn details(&self, row: &ContentRow) -> RowDetails {
        let location = self.path_label(self.navigator.current_folder_id());
        match row {
            ContentRow::Folder {
                id,
                name,
                modified_at,
            } => RowDetails {
                kind: "folder",
                id: id.get(),
                name: name.clone(),
                location,
                size: self.sizes.formatted(*id),
                modified_at: *modified_at,
            },
            ContentRow::File {
                id,
                name,
                size_bytes,
                modified_at,
            } => RowDetails {
                kind: "file",
                id: id.get(),
                name: name.clone(),
                location,
                size: Some(format_size(*size_bytes)),
                modified_at: *modified_at,
            },
        }
    }

    /// Notify the outcome of a call made outside [`handle`](Self::handle).
    fn report<T>(&mut self, result: Result<T, AppError>, success: &str) -> Result<T, AppError> {
        match result {
            Ok(value) => {
                self.notifier.success(success);
                Ok(value)
            }
            Err(err) => {
                let message = user_message(&err);
                self.notifier.error(&message);
                self.last_error = Some(message);
                Err(err)
            }
        }
    }

    /// Reload after a successful mutation. A failed reload is kept in
    /// `last_error` but does not undo the mutation's success.
    async fn refresh(&mut self, structure_changed: bool) {
        if structure_changed {
            if let Err(err) = self.reload_tree().await {
                warn!(error = %err, "Folder tree reload failed");
                self.last_error = Some(user_message(&err));
            }
        }
        if let Err(err) = self.load_folder_contents().await {
            warn!(error = %err, "Folder contents reload failed");
        }
    }
}

fn success_text(outcome: &ActionOutcome) -> Option<&'static str> {
    match outcome {
        ActionOutcome::Renamed => Some(messages::RENAMED),
        ActionOutcome::Moved => Some(messages::MOVED),
        ActionOutcome::Deleted => Some(messages::DELETED),
        ActionOutcome::Downloaded { .. } => Some(messages::DOWNLOADED),
        ActionOutcome::Restored => Some(messages::RESTORED),
        _ => None,
    }
}
