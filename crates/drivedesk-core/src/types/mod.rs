//! Core type definitions used across the DriveDesk workspace.

pub mod codes;
pub mod envelope;
pub mod id;
pub mod pagination;

pub use envelope::Envelope;
pub use id::*;
pub use pagination::{PageRequest, PageResponse};
