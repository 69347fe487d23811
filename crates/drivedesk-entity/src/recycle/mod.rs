//! Recycle bin entities.

pub mod model;

pub use drivedesk_core::traits::recycle::{DeletedFileRecord, DeletedFolderRecord};
pub use model::{DeletedFileEntry, RecycleBin, RestoreSelection};
