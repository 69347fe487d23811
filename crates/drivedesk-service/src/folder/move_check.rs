//! Cycle check for folder moves.

use drivedesk_core::types::FolderId;
use drivedesk_entity::folder::FolderTree;

/// Decides whether a folder may be moved under a destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveValidator;

impl MoveValidator {
    /// A destination is illegal when it is the moving folder itself or lies
    /// in its subtree. The root always accepts.
    pub fn is_legal_destination(moving: FolderId, destination: FolderId, tree: &FolderTree) -> bool {
        if destination.is_root() {
            return true;
        }
        if destination == moving {
            return false;
        }
        match tree.find(moving) {
            Some(node) => !node.subtree_contains(destination),
            None => true,
        }
    }

    /// Every destination `moving` may go to, the root first.
    pub fn legal_destinations(moving: FolderId, tree: &FolderTree) -> Vec<FolderId> {
        std::iter::once(FolderId::ROOT)
            .chain(tree.iter().map(|node| node.id))
            .filter(|id| Self::is_legal_destination(moving, *id, tree))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivedesk_entity::folder::FolderRecord;

    use crate::folder::tree::TreeBuilder;

    const A: FolderId = FolderId(1);
    const B: FolderId = FolderId(2);
    const C: FolderId = FolderId(3);

    fn chain() -> FolderTree {
        TreeBuilder::build(&[
            FolderRecord::new(1, 0, "A"),
            FolderRecord::new(2, 1, "B"),
            FolderRecord::new(3, 2, "C"),
        ])
    }

    #[test]
    fn test_cycle_rejection() {
        let tree = chain();
        assert!(!MoveValidator::is_legal_destination(A, C, &tree));
        assert!(!MoveValidator::is_legal_destination(A, A, &tree));
        assert!(MoveValidator::is_legal_destination(C, A, &tree));
        assert!(MoveValidator::is_legal_destination(A, FolderId::ROOT, &tree));
    }

    #[test]
    fn test_legal_destinations() {
        let tree = chain();
        assert_eq!(MoveValidator::legal_destinations(B, &tree), vec![FolderId::ROOT, A]);
        assert_eq!(
            MoveValidator::legal_destinations(C, &tree),
            vec![FolderId::ROOT, A, B]
        );
    }
}
