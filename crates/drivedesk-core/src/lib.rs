//! # drivedesk-core
//!
//! Core crate for DriveDesk. Contains the collaborator traits the folder
//! management services call into, configuration schemas, typed integer
//! identifiers, the backend envelope type, pagination helpers, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other DriveDesk crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
