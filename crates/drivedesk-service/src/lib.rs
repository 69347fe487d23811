//! # drivedesk-service
//!
//! Folder management services for DriveDesk. Each service talks to the
//! backend only through the collaborator traits in `drivedesk-core`, so the
//! same code runs against the remote backend or the in-memory one.
//!
//! Services follow constructor injection: every collaborator is provided at
//! construction time as an `Arc<dyn Trait>`.

pub mod context;
pub mod folder;
pub mod messages;
pub mod recycle;
pub mod session;
pub mod transfer;

pub use context::{BackendHandles, SessionContext, StaticAccessToken};
pub use folder::{
    FolderNavigator, FolderService, MoveValidator, SizeAggregator, SizeOutcome, SizeTracker,
    TreeBuilder, TreeService, format_size,
};
pub use recycle::RecycleBinCoordinator;
pub use session::{ActionKind, ActionOutcome, FolderAction, FolderSession, RowDetails, menu_for};
pub use transfer::{BatchProgress, DownloadService, UploadManager, UploadSource, UploadSummary};
