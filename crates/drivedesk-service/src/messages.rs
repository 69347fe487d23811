//! User-facing text for failures and completed actions.
//!
//! Business codes are never shown as the primary text: known codes map to a
//! sentence, unknown codes fall back to [`GENERIC_MESSAGE`], and transport
//! failures always read as [`UNKNOWN_ERROR_MESSAGE`].

use drivedesk_core::error::{AppError, ErrorKind};
use drivedesk_core::types::codes;

/// Shown for business codes with no dedicated text.
pub const GENERIC_MESSAGE: &str = "The operation could not be completed.";

/// Shown when the call itself failed.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred. Please try again.";

/// Toast after a file or folder rename.
pub const RENAMED: &str = "Renamed successfully.";
/// Toast after a folder move.
pub const MOVED: &str = "Folder moved successfully.";
/// Toast after items go to the recycle bin.
pub const DELETED: &str = "Moved to the recycle bin.";
/// Toast after a folder is created.
pub const CREATED: &str = "Folder created successfully.";
/// Toast after a download is saved.
pub const DOWNLOADED: &str = "Download complete.";
/// Toast after recycle-bin items are restored.
pub const RESTORED: &str = "Items restored successfully.";
/// Toast after an upload batch finishes with no failure.
pub const UPLOADED: &str = "Upload complete.";

/// Text for a known business code.
pub fn message_for_code(code: &str) -> Option<&'static str> {
    let text = match code {
        codes::INVALID_FOLDER_ID => "The folder no longer exists.",
        codes::INVALID_FILE_ID => "The file no longer exists.",
        codes::INVALID_FILE_SYSTEM_ID => "The drive could not be found.",
        codes::ACCESS_DENIED => "You do not have permission to do this.",
        codes::INVALID_FOLDER_NAME => "The folder name is not valid.",
        codes::INVALID_FILE_NAME => "The file name is not valid.",
        codes::FOLDER_EXISTS => "A folder with this name already exists here.",
        codes::INVALID_MOVE => "A folder cannot be moved into itself or one of its subfolders.",
        codes::INVALID_REQUEST => "The request was not valid.",
        codes::QUOTA_EXCEEDED => "The drive is out of space.",
        _ => return None,
    };
    Some(text)
}

/// Text to show the user for `err`.
pub fn user_message(err: &AppError) -> String {
    match err.kind {
        ErrorKind::Business => message_for_code(&err.message)
            .unwrap_or(GENERIC_MESSAGE)
            .to_string(),
        ErrorKind::Validation
        | ErrorKind::Authentication
        | ErrorKind::Authorization
        | ErrorKind::Conflict
        | ErrorKind::NotFound => err.message.clone(),
        _ => UNKNOWN_ERROR_MESSAGE.to_string(),
    }
}
