//! Row actions as one tagged enum.

use chrono::{DateTime, Utc};
use serde::Serialize;

use drivedesk_core::types::FolderId;
use drivedesk_entity::content::ContentRow;
use drivedesk_entity::recycle::{RecycleBin, RestoreSelection};

/// What a row menu can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Open,
    ViewDetails,
    Rename,
    Move,
    Delete,
    Download,
    CalculateSize,
    OpenRecycleBin,
    Restore,
}

impl ActionKind {
    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::ViewDetails => "View details",
            Self::Rename => "Rename",
            Self::Move => "Move",
            Self::Delete => "Delete",
            Self::Download => "Download",
            Self::CalculateSize => "Calculate size",
            Self::OpenRecycleBin => "Recycle bin",
            Self::Restore => "Restore",
        }
    }
}

/// An action requested by the user, dispatched by
/// [`crate::FolderSession::handle`].
#[derive(Debug, Clone, PartialEq)]
pub enum FolderAction {
    /// Open a folder row.
    Open(ContentRow),
    /// Show a row's details.
    ViewDetails(ContentRow),
    /// Rename a folder or file row.
    Rename {
        /// The row to rename.
        row: ContentRow,
        /// The new name.
        new_name: String,
    },
    /// Move a folder under another folder (`ROOT` for the top level).
    Move {
        /// Folder to move.
        folder_id: FolderId,
        /// Destination parent.
        destination: FolderId,
    },
    /// Move a row to the recycle bin.
    Delete(ContentRow),
    /// Download a file row.
    Download(ContentRow),
    /// Compute a folder's recursive size.
    CalculateSize(FolderId),
    /// Load the recycle bin.
    OpenRecycleBin,
    /// Restore recycle bin items.
    Restore(RestoreSelection),
}

impl FolderAction {
    /// The kind of this action.
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Open(_) => ActionKind::Open,
            Self::ViewDetails(_) => ActionKind::ViewDetails,
            Self::Rename { .. } => ActionKind::Rename,
            Self::Move { .. } => ActionKind::Move,
            Self::Delete(_) => ActionKind::Delete,
            Self::Download(_) => ActionKind::Download,
            Self::CalculateSize(_) => ActionKind::CalculateSize,
            Self::OpenRecycleBin => ActionKind::OpenRecycleBin,
            Self::Restore(_) => ActionKind::Restore,
        }
    }
}

/// The actions a row's menu offers.
pub fn menu_for(row: &ContentRow) -> Vec<ActionKind> {
    match row {
        ContentRow::Folder { .. } => vec![
            ActionKind::Open,
            ActionKind::ViewDetails,
            ActionKind::Rename,
            ActionKind::Move,
            ActionKind::Delete,
            ActionKind::CalculateSize,
        ],
        ContentRow::File { .. } => vec![
            ActionKind::ViewDetails,
            ActionKind::Rename,
            ActionKind::Delete,
            ActionKind::Download,
        ],
    }
}

/// Details shown for one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowDetails {
    /// `"folder"` or `"file"`.
    pub kind: &'static str,
    /// Backend id.
    pub id: i64,
    /// Name.
    pub name: String,
    /// Path of the containing folder, `/` for the top level.
    pub location: String,
    /// Display size: always for files, for folders once computed.
    pub size: Option<String>,
    /// Last modification time.
    pub modified_at: Option<DateTime<Utc>>,
}

/// What [`crate::FolderSession::handle`] produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// A folder was opened.
    Opened { folder_id: FolderId },
    /// Details of a row.
    Details(RowDetails),
    /// A row was renamed.
    Renamed,
    /// A folder was moved.
    Moved,
    /// A row went to the recycle bin.
    Deleted,
    /// A file was downloaded and saved.
    Downloaded { file_name: String, bytes: u64 },
    /// A folder size was computed.
    SizeComputed {
        folder_id: FolderId,
        bytes: u64,
        formatted: String,
    },
    /// A size computation for this folder is already running.
    SizeAlreadyComputing { folder_id: FolderId },
    /// Recycle bin contents.
    RecycleBin(RecycleBin),
    /// Recycle bin items were restored.
    Restored,
    /// The action failed; the text was also sent to the notifier.
    Failed { message: String },
}
