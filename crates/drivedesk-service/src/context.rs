//! Collaborator handles shared by every service of one session.

use std::sync::Arc;

use drivedesk_core::config::{SizeConfig, TransferConfig};
use drivedesk_core::traits::{
    AccessTokenSource, FileAdminApi, FileSaver, FolderAdminApi, FolderContentApi,
    FolderStructureApi, Notifier, RecycleBinApi, TransferApi,
};
use drivedesk_core::types::FileSystemId;

/// One handle per backend capability.
#[derive(Clone)]
pub struct BackendHandles {
    /// Folder structure listing.
    pub structure: Arc<dyn FolderStructureApi>,
    /// Folder content listing.
    pub contents: Arc<dyn FolderContentApi>,
    /// Folder mutations.
    pub folders: Arc<dyn FolderAdminApi>,
    /// File mutations.
    pub files: Arc<dyn FileAdminApi>,
    /// Recycle bin.
    pub recycle: Arc<dyn RecycleBinApi>,
    /// Chunked transfer.
    pub transfer: Arc<dyn TransferApi>,
}

impl std::fmt::Debug for BackendHandles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendHandles").finish()
    }
}

impl BackendHandles {
    /// Use one backend value for every capability.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: FolderStructureApi
            + FolderContentApi
            + FolderAdminApi
            + FileAdminApi
            + RecycleBinApi
            + TransferApi,
    {
        Self {
            structure: backend.clone(),
            contents: backend.clone(),
            folders: backend.clone(),
            files: backend.clone(),
            recycle: backend.clone(),
            transfer: backend,
        }
    }
}

/// Everything a [`crate::FolderSession`] needs for one file system.
#[derive(Clone)]
pub struct SessionContext {
    /// The selected file system.
    pub file_system_id: FileSystemId,
    /// Backend capabilities.
    pub backend: BackendHandles,
    /// Session token source.
    pub tokens: Arc<dyn AccessTokenSource>,
    /// Download sink.
    pub saver: Arc<dyn FileSaver>,
    /// Toast display.
    pub notifier: Arc<dyn Notifier>,
    /// Size aggregation settings.
    pub size: SizeConfig,
    /// Transfer settings.
    pub transfer: TransferConfig,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("file_system_id", &self.file_system_id)
            .field("size", &self.size)
            .field("transfer", &self.transfer)
            .finish()
    }
}

/// A token fixed at startup, e.g. read from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticAccessToken(Option<String>);

impl StaticAccessToken {
    /// Wrap an optional token.
    pub fn new(token: Option<String>) -> Self {
        Self(token)
    }
}

impl AccessTokenSource for StaticAccessToken {
    fn access_token(&self) -> Option<String> {
        self.0.clone().filter(|t| !t.trim().is_empty())
    }
}
