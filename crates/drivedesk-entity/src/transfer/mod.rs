//! Upload task entities.

pub mod task;

pub use task::{TransferStatus, TransferTask};
