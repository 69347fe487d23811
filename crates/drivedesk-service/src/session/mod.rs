//! Per-file-system session state and the row action dispatcher.

pub mod action;
pub mod state;

pub use action::{ActionKind, ActionOutcome, FolderAction, RowDetails, menu_for};
pub use state::FolderSession;
