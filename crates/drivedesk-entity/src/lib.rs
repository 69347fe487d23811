//! # drivedesk-entity
//!
//! Domain models for DriveDesk: normalized folder records and the folder
//! forest built from them, rows of an open folder, upload tasks, and
//! recycle-bin entries. All models derive `Debug`, `Clone`, `Serialize`,
//! and `Deserialize` where they cross a boundary.

pub mod content;
pub mod folder;
pub mod recycle;
pub mod transfer;
