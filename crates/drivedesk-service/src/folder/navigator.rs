//! Current folder, back navigation and selection for one file system.

use drivedesk_core::error::AppError;
use drivedesk_core::types::FolderId;
use drivedesk_entity::content::ContentRow;
use drivedesk_entity::folder::{FolderNode, FolderTree};

/// Most back entries kept; the oldest is dropped first.
pub const MAX_HISTORY: usize = 64;

/// Tracks where the user is in the folder tree.
///
/// `FolderId::ROOT` is the synthetic root and never a node of the tree.
/// Back navigation is a stack of previously visited folders. When the stack
/// runs dry, the folder just returned to contributes its own tree parent,
/// so repeated `go_back` keeps walking up toward the root.
#[derive(Debug, Clone, Default)]
pub struct FolderNavigator {
    tree: FolderTree,
    current: FolderId,
    back: Vec<FolderId>,
    selected: Option<FolderId>,
}

impl FolderNavigator {
    /// Start at the root of `tree`.
    pub fn new(tree: FolderTree) -> Self {
        Self {
            tree,
            ..Self::default()
        }
    }

    /// The folder tree.
    pub fn tree(&self) -> &FolderTree {
        &self.tree
    }

    /// The open folder.
    pub fn current_folder_id(&self) -> FolderId {
        self.current
    }

    /// Where `go_back` leads (`ROOT` when the history is empty).
    pub fn parent_folder_id(&self) -> FolderId {
        self.back.last().copied().unwrap_or(FolderId::ROOT)
    }

    /// The node highlighted in the tree, if any.
    pub fn selected_node(&self) -> Option<&FolderNode> {
        self.selected.and_then(|id| self.tree.find(id))
    }

    /// Open `folder_id`, remembering the current folder for `go_back`.
    /// Selecting the open folder again changes nothing.
    pub fn select_folder(&mut self, folder_id: FolderId) {
        if folder_id == self.current {
            return;
        }
        if self.back.len() == MAX_HISTORY {
            self.back.remove(0);
        }
        self.back.push(self.current);
        self.current = folder_id;
        self.selected = (!folder_id.is_root()).then_some(folder_id);
    }

    /// Return to the previous folder and report where we landed.
    pub fn go_back(&mut self) -> FolderId {
        let Some(target) = self.back.pop() else {
            self.reset();
            return FolderId::ROOT;
        };
        if target.is_root() {
            self.reset();
            return FolderId::ROOT;
        }
        let Some(node) = self.tree.find(target) else {
            self.reset();
            return FolderId::ROOT;
        };
        if self.back.is_empty() && !node.parent_id.is_root() {
            self.back.push(node.parent_id);
        }
        self.current = target;
        self.selected = Some(target);
        target
    }

    /// Open the folder behind a content row, expanding its ancestors.
    pub fn navigate_into(&mut self, row: &ContentRow) -> Result<FolderId, AppError> {
        let folder_id = row
            .folder_id()
            .ok_or_else(|| AppError::validation("Only folders can be opened"))?;
        if !self.tree.expand_to(folder_id) {
            return Err(AppError::not_found(format!(
                "Folder '{}' is not in the folder tree",
                row.name()
            )));
        }
        self.select_folder(folder_id);
        Ok(folder_id)
    }

    /// Flip the expanded flag of a tree node.
    pub fn toggle_expanded(&mut self, folder_id: FolderId) -> bool {
        match self.tree.find_mut(folder_id) {
            Some(node) => {
                node.expanded = !node.expanded;
                node.expanded
            }
            None => false,
        }
    }

    /// Swap in a freshly built tree, dropping history that no longer exists.
    pub fn replace_tree(&mut self, tree: FolderTree) {
        self.tree = tree;
        let tree = &self.tree;
        self.back.retain(|id| id.is_root() || tree.contains(*id));
        if !self.current.is_root() && !self.tree.contains(self.current) {
            self.current = FolderId::ROOT;
            self.selected = None;
        } else if !self.current.is_root() {
            self.tree.expand_to(self.current);
        }
        if self.selected.is_some_and(|id| !self.tree.contains(id)) {
            self.selected = None;
        }
    }

    /// Go to the root and forget the history.
    pub fn reset(&mut self) {
        self.current = FolderId::ROOT;
        self.back.clear();
        self.selected = None;
    }
}
