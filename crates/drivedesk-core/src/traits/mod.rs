//! Collaborator traits defined in `drivedesk-core` and implemented by the
//! backend binding, the session layer, and the presentation layer.
//!
//! Every backend capability returns `AppResult<Envelope<T>>`: `Err` is a
//! transport failure, `Ok` with `success == false` is a business failure.

pub mod admin;
pub mod content;
pub mod notify;
pub mod recycle;
pub mod saver;
pub mod session;
pub mod structure;
pub mod transfer;

pub use admin::{FileAdminApi, FolderAdminApi};
pub use content::{FileEntry, FolderContentApi, FolderEntry, FolderListing};
pub use notify::Notifier;
pub use recycle::{DeletedFileRecord, DeletedFolderRecord, DeletedItems, RecycleBinApi};
pub use saver::FileSaver;
pub use session::AccessTokenSource;
pub use structure::{FolderStructureApi, NamedFolderRecord, RawFolderRecord};
pub use transfer::{ProgressFn, TransferApi};
