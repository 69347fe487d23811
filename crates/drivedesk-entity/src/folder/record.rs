//! Normalized folder record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use drivedesk_core::traits::structure::{NamedFolderRecord, RawFolderRecord};
use drivedesk_core::types::FolderId;

/// A folder record after shape normalization.
///
/// Malformed input is coerced rather than dropped: a missing or unreadable
/// id becomes `0`, a missing parent becomes the root, a missing name becomes
/// the empty string. Callers must tolerate such placeholder records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRecord {
    /// Folder id (`0` for a placeholder).
    pub id: FolderId,
    /// Declared parent (`0` = root).
    pub parent_id: FolderId,
    /// Folder name.
    pub name: String,
}

impl FolderRecord {
    /// Create a record.
    pub fn new(id: i64, parent_id: i64, name: impl Into<String>) -> Self {
        Self {
            id: FolderId(id),
            parent_id: FolderId(parent_id),
            name: name.into(),
        }
    }

    /// Whether the record had no usable id.
    pub fn is_placeholder(&self) -> bool {
        self.id.is_root()
    }

    /// Normalize one raw record of either shape.
    pub fn normalize(raw: &RawFolderRecord) -> Self {
        match raw {
            RawFolderRecord::Positional(fields) => Self::from_fields(
                fields.first(),
                fields.get(1),
                fields.get(2),
            ),
            RawFolderRecord::Named(NamedFolderRecord {
                id,
                parent_id,
                name,
            }) => Self::from_fields(id.as_ref(), parent_id.as_ref(), name.as_ref()),
        }
    }

    /// Normalize a whole structure response, preserving order and count.
    pub fn normalize_all(raw: &[RawFolderRecord]) -> Vec<Self> {
        raw.iter().map(Self::normalize).collect()
    }

    fn from_fields(id: Option<&Value>, parent_id: Option<&Value>, name: Option<&Value>) -> Self {
        Self {
            id: FolderId(id.and_then(as_id).unwrap_or(0)),
            parent_id: FolderId(parent_id.and_then(as_id).unwrap_or(0)),
            name: name.map(as_name).unwrap_or_default(),
        }
    }
}

/// Accept integers, integral floats and numeric strings.
fn as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
