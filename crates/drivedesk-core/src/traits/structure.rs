//! Folder structure listing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::result::AppResult;
use crate::types::{Envelope, FileSystemId};

/// One folder record as the structure call emits it.
///
/// The backend emits either positional arrays `[id, parentId, name]` or
/// objects with named fields, sometimes mixed within one response.
/// Normalization into a typed record happens in `drivedesk-entity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawFolderRecord {
    /// `[id, parentId, name]`.
    Positional(Vec<Value>),
    /// `{"id": .., "parentId": .., "name": ..}` and its spelling variants.
    Named(NamedFolderRecord),
}

/// Object form of a folder record. Every field is optional on the wire.
///
/// Each field has several accepted spellings. When a record carries more
/// than one, the first non-null spelling in the order listed wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct NamedFolderRecord {
    /// Folder id: `id`, `folderId`, `folder_id`.
    pub id: Option<Value>,
    /// Parent folder id (`0` for root-level folders): `parent_id`,
    /// `parentId`, `parentFolderId`, `parent_folder_id`.
    pub parent_id: Option<Value>,
    /// Folder name: `name`, `folderName`, `folder_name`.
    pub name: Option<Value>,
}

const ID_KEYS: &[&str] = &["id", "folderId", "folder_id"];
const PARENT_KEYS: &[&str] = &["parent_id", "parentId", "parentFolderId", "parent_folder_id"];
const NAME_KEYS: &[&str] = &["name", "folderName", "folder_name"];

impl From<Map<String, Value>> for NamedFolderRecord {
    fn from(mut map: Map<String, Value>) -> Self {
        Self {
            id: first_present(&mut map, ID_KEYS),
            parent_id: first_present(&mut map, PARENT_KEYS),
            name: first_present(&mut map, NAME_KEYS),
        }
    }
}

fn first_present(map: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    keys.iter()
        .filter_map(|key| map.remove(*key))
        .find(|value| !value.is_null())
}

/// Lists the (non-deleted) folder structure of a file system.
#[async_trait]
pub trait FolderStructureApi: Send + Sync + 'static {
    /// Return folder records for `file_system_id`. With `one_level_only`
    /// the backend returns root-level folders only.
    async fn list_structure(
        &self,
        file_system_id: FileSystemId,
        one_level_only: bool,
    ) -> AppResult<Envelope<Vec<RawFolderRecord>>>;
}
