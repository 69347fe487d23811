//! The `{success, message, data}` wrapper every backend call returns.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Code used when a failed envelope carries no message at all.
pub const UNKNOWN_CODE: &str = "UNKNOWN";

/// Result wrapper returned by every backend call, independent of transport
/// success.
///
/// A transport-level failure never produces an envelope; it is reported as
/// an `Err` by the collaborator. A business failure is an envelope with
/// `success == false` and a short code in `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the backend accepted the call.
    pub success: bool,
    /// Business code on failure; optional informational text on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload on success.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// A successful envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// A failed envelope carrying a business code.
    pub fn fail(code: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(code.into()),
            data: None,
        }
    }

    /// Convert into a `Result`, turning `success == false` into a business
    /// error. A successful envelope without a payload is a protocol error.
    pub fn into_result(self) -> Result<T, AppError> {
        if !self.success {
            return Err(business_failure(self.message));
        }
        self.data
            .ok_or_else(|| AppError::transport("Backend reported success without a payload"))
    }
}

impl Envelope<()> {
    /// A successful envelope with no payload.
    pub fn done() -> Self {
        Self::ok(())
    }

    /// Check the success flag of a payload-less envelope.
    pub fn into_unit(self) -> Result<(), AppError> {
        if self.success {
            Ok(())
        } else {
            Err(business_failure(self.message))
        }
    }
}

fn business_failure(message: Option<String>) -> AppError {
    AppError::business(
        message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_CODE.to_string()),
    )
}
