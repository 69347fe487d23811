//! Recycle bin loading and restore.

pub mod service;

pub use service::RecycleBinCoordinator;
