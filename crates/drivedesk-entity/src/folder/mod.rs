//! Folder domain entities.

pub mod name;
pub mod node;
pub mod record;

pub use name::{NameViolation, check_name};
pub use node::{FolderNode, FolderTree};
pub use record::FolderRecord;
