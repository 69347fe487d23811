//! Folder tree building from the flat structure listing.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use drivedesk_core::error::AppError;
use drivedesk_core::traits::FolderStructureApi;
use drivedesk_core::types::FileSystemId;
use drivedesk_entity::folder::{FolderNode, FolderRecord, FolderTree};

/// Builds a forest from flat `(id, parent_id, name)` records.
///
/// The result is total: every record becomes exactly one node. A record
/// whose parent is absent, is itself, or closes a parent loop is promoted
/// to a root. Child order follows input order. When several records share
/// an id, children attach to the first of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    Active,
    Done,
}

impl TreeBuilder {
    /// Build the forest for `records`.
    pub fn build(records: &[FolderRecord]) -> FolderTree {
        let count = records.len();

        let mut index: HashMap<_, usize> = HashMap::with_capacity(count);
        for (i, record) in records.iter().enumerate() {
            if !record.is_placeholder() {
                index.entry(record.id).or_insert(i);
            }
        }

        let mut parent: Vec<Option<usize>> = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                if record.parent_id.is_root() {
                    return None;
                }
                index.get(&record.parent_id).copied().filter(|p| *p != i)
            })
            .collect();

        // Cut the link at which a walk up the parent chain re-enters itself.
        let mut state = vec![Visit::New; count];
        for start in 0..count {
            if state[start] != Visit::New {
                continue;
            }
            let mut path = Vec::new();
            let mut current = start;
            loop {
                state[current] = Visit::Active;
                path.push(current);
                match parent[current] {
                    Some(p) if state[p] == Visit::New => current = p,
                    Some(p) if state[p] == Visit::Active => {
                        parent[current] = None;
                        break;
                    }
                    _ => break,
                }
            }
            for i in path {
                state[i] = Visit::Done;
            }
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
        let mut roots = Vec::new();
        for (i, p) in parent.iter().enumerate() {
            match p {
                Some(p) => children[*p].push(i),
                None => roots.push(i),
            }
        }

        // Pre-order, reversed, visits every child before its parent.
        let mut order = Vec::with_capacity(count);
        let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
        while let Some(i) = stack.pop() {
            order.push(i);
            stack.extend(children[i].iter().rev());
        }

        let mut slots: Vec<Option<FolderNode>> = vec![None; count];
        for &i in order.iter().rev() {
            let record = &records[i];
            let mut node = FolderNode::new(record.id, record.name.clone(), record.parent_id);
            node.children = children[i]
                .iter()
                .filter_map(|c| slots[*c].take())
                .collect();
            slots[i] = Some(node);
        }

        FolderTree::new(roots.iter().filter_map(|i| slots[*i].take()).collect())
    }
}

/// Loads the folder structure of a file system.
#[derive(Clone)]
pub struct TreeService {
    structure: Arc<dyn FolderStructureApi>,
}

impl std::fmt::Debug for TreeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeService").finish()
    }
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(structure: Arc<dyn FolderStructureApi>) -> Self {
        Self { structure }
    }

    /// Fetch and normalize the full folder structure.
    pub async fn load_records(
        &self,
        file_system_id: FileSystemId,
    ) -> Result<Vec<FolderRecord>, AppError> {
        let raw = self
            .structure
            .list_structure(file_system_id, false)
            .await?
            .into_result()?;
        Ok(FolderRecord::normalize_all(&raw))
    }

    /// Fetch the structure and build the folder tree.
    pub async fn load_tree(&self, file_system_id: FileSystemId) -> Result<FolderTree, AppError> {
        let records = self.load_records(file_system_id).await?;
        let tree = TreeBuilder::build(&records);
        debug!(
            file_system_id = %file_system_id,
            records = records.len(),
            roots = tree.roots.len(),
            "Folder tree built"
        );
        Ok(tree)
    }
}
