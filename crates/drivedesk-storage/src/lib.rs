//! # drivedesk-storage
//!
//! Backend-side building blocks for DriveDesk:
//!
//! - [`memory::MemoryBackend`]: an in-process file-system model that
//!   implements every backend capability trait from `drivedesk-core`,
//!   including chunked transfer progress and soft delete.
//! - [`snapshot`]: JSON persistence for the backend's state.
//! - [`saver::LocalFileSaver`]: writes completed downloads into a directory.

pub mod chunked;
pub mod memory;
pub mod model;
pub mod saver;
pub mod snapshot;

pub use memory::MemoryBackend;
pub use model::{FileSystemState, Snapshot, StoredFile, StoredFolder};
pub use saver::LocalFileSaver;
