//! Business codes carried in a failed envelope's `message`.

/// The folder id does not exist or is not visible.
pub const INVALID_FOLDER_ID: &str = "INVALID_FOLDER_ID";
/// The file id does not exist or does not belong to the given folder.
pub const INVALID_FILE_ID: &str = "INVALID_FILE_ID";
/// The file system id is unknown.
pub const INVALID_FILE_SYSTEM_ID: &str = "INVALID_FILE_SYSTEM_ID";
/// The caller's token is missing, expired, or lacks the right.
pub const ACCESS_DENIED: &str = "ACCESS_DENIED";
/// The folder name violates the naming rules.
pub const INVALID_FOLDER_NAME: &str = "INVALID_FOLDER_NAME";
/// The file name violates the naming rules.
pub const INVALID_FILE_NAME: &str = "INVALID_FILE_NAME";
/// A sibling with the same name already exists.
pub const FOLDER_EXISTS: &str = "FOLDER_EXISTS";
/// The move would put a folder inside itself.
pub const INVALID_MOVE: &str = "INVALID_MOVE";
/// The request parameters are inconsistent.
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
/// The storage quota of the drive is exhausted.
pub const QUOTA_EXCEEDED: &str = "QUOTA_EXCEEDED";
