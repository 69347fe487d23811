//! Convenience result type alias for DriveDesk.

use crate::error::AppError;

/// A specialized `Result` type for DriveDesk operations.
pub type AppResult<T> = Result<T, AppError>;
