//! Folder tree structures for hierarchical display and lookups.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use drivedesk_core::types::FolderId;

/// A node in a folder tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder id.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Declared parent id (`0` = root).
    pub parent_id: FolderId,
    /// Child folders, in input order.
    pub children: Vec<FolderNode>,
    /// Whether the node is expanded in the tree view.
    pub expanded: bool,
}

impl FolderNode {
    /// Create a leaf node.
    pub fn new(id: FolderId, name: impl Into<String>, parent_id: FolderId) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
            children: Vec::new(),
            expanded: false,
        }
    }

    /// Whether `target` is this node or lies anywhere beneath it.
    pub fn subtree_contains(&self, target: FolderId) -> bool {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.id == target {
                return true;
            }
            stack.extend(node.children.iter());
        }
        false
    }
}

/// The folder forest of one file system.
///
/// Built fresh on every structure reload and replaced wholesale; the only
/// in-place mutation is the `expanded` flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderTree {
    /// Root nodes.
    pub roots: Vec<FolderNode>,
}

impl FolderTree {
    /// Wrap a set of roots.
    pub fn new(roots: Vec<FolderNode>) -> Self {
        Self { roots }
    }

    /// An empty tree.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Depth-first, pre-order iteration over every node.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// First node with `id`, in pre-order.
    pub fn find(&self, id: FolderId) -> Option<&FolderNode> {
        self.iter().find(|node| node.id == id)
    }

    /// Mutable access to the first node with `id`, in pre-order.
    pub fn find_mut(&mut self, id: FolderId) -> Option<&mut FolderNode> {
        let mut stack: Vec<&mut FolderNode> = self.roots.iter_mut().rev().collect();
        while let Some(node) = stack.pop() {
            if node.id == id {
                return Some(node);
            }
            stack.extend(node.children.iter_mut().rev());
        }
        None
    }

    /// Whether a node with `id` exists.
    pub fn contains(&self, id: FolderId) -> bool {
        self.find(id).is_some()
    }

    /// Ids from a root down to `id`, both inclusive.
    pub fn path_to(&self, id: FolderId) -> Option<Vec<FolderId>> {
        let mut path: Vec<FolderId> = Vec::new();
        let mut stack: Vec<(&FolderNode, usize)> =
            self.roots.iter().rev().map(|node| (node, 0)).collect();

        while let Some((node, depth)) = stack.pop() {
            path.truncate(depth);
            path.push(node.id);
            if node.id == id {
                return Some(path);
            }
            stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
        None
    }

    /// Mark every ancestor of `id` as expanded. Returns `false` when `id`
    /// is not in the tree.
    pub fn expand_to(&mut self, id: FolderId) -> bool {
        let Some(path) = self.path_to(id) else {
            return false;
        };
        for ancestor in &path[..path.len() - 1] {
            if let Some(node) = self.find_mut(*ancestor) {
                node.expanded = true;
            }
        }
        true
    }

    /// Map of every folder id to its name. Earlier nodes win on duplicate ids.
    pub fn name_index(&self) -> HashMap<FolderId, String> {
        let mut names = HashMap::new();
        for node in self.iter() {
            names.entry(node.id).or_insert_with(|| node.name.clone());
        }
        names
    }
}

/// Pre-order iterator over a [`FolderTree`].
#[derive(Debug)]
pub struct Iter<'a> {
    stack: Vec<&'a FolderNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a FolderNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, name: &str, parent: i64, children: Vec<FolderNode>) -> FolderNode {
        let mut n = FolderNode::new(FolderId(id), name, FolderId(parent));
        n.children = children;
        n
    }

    /// docs(1) -> 2024(2) -> q1(3); media(4)
    fn sample() -> FolderTree {
        FolderTree::new(vec![
            node(1, "docs", 0, vec![node(2, "2024", 1, vec![node(3, "q1", 2, vec![])])]),
            node(4, "media", 0, vec![]),
        ])
    }

    #[test]
    fn test_preorder_iteration() {
        let ids: Vec<i64> = sample().iter().map(|n| n.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(sample().len(), 4);
    }

    #[test]
    fn test_path_to_nested_and_missing() {
        let tree = sample();
        assert_eq!(
            tree.path_to(FolderId(3)),
            Some(vec![FolderId(1), FolderId(2), FolderId(3)])
        );
        assert_eq!(tree.path_to(FolderId(4)), Some(vec![FolderId(4)]));
        assert_eq!(tree.path_to(FolderId(99)), None);
    }

    #[test]
    fn test_expand_to_marks_ancestors_only() {
        let mut tree = sample();
        assert!(tree.expand_to(FolderId(3)));
        assert!(tree.find(FolderId(1)).unwrap().expanded);
        assert!(tree.find(FolderId(2)).unwrap().expanded);
        assert!(!tree.find(FolderId(3)).unwrap().expanded);
        assert!(!tree.find(FolderId(4)).unwrap().expanded);
        assert!(!tree.expand_to(FolderId(42)));
    }

    #[test]
    fn test_subtree_contains() {
        let tree = sample();
        let docs = tree.find(FolderId(1)).unwrap();
        assert!(docs.subtree_contains(FolderId(3)));
        assert!(!docs.subtree_contains(FolderId(4)));
    }

    #[test]
    fn test_name_index() {
        let names = sample().name_index();
        assert_eq!(names.get(&FolderId(2)).map(String::as_str), Some("2024"));
        assert_eq!(names.len(), 4);
    }
}
