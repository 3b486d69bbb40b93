//! A standalone check that every root-to-leaf path in a plain binary tree
//! has the same length.
//!
//! This operates on an ordinary owned binary tree with no balance
//! bookkeeping; it is independent of [`AvlTree`](crate::AvlTree).

extern crate alloc;

use alloc::boxed::Box;

/// A plain binary tree node.
#[derive(Debug, Default)]
pub struct BinaryNode {
    pub left: Option<Box<BinaryNode>>,
    pub right: Option<Box<BinaryNode>>,
}

impl BinaryNode {
    /// Returns a new leaf node.
    pub fn leaf() -> Box<BinaryNode> {
        Box::new(BinaryNode {
            left: None,
            right: None,
        })
    }

    /// Returns a new node with the given subtrees.
    pub fn branch(
        left: Option<Box<BinaryNode>>,
        right: Option<Box<BinaryNode>>,
    ) -> Box<BinaryNode> {
        Box::new(BinaryNode { left, right })
    }
}

// Returns the depth of the subtree: 0 for an empty subtree, and one more
// than the deeper child otherwise.
fn depth(node: Option<&BinaryNode>) -> usize {
    match node {
        None => 0,
        Some(node) => 1 + depth(node.left.as_deref()).max(depth(node.right.as_deref())),
    }
}

/// Returns `true` if every leaf of the tree lies at the same depth.
///
/// A node with exactly one child does not itself violate the property; the
/// missing side is ignored and only the present subtree is checked. Depth
/// comparison happens only at nodes where both subtrees are present.
///
/// Depth is recomputed at every such node, so this is O(n²) in the worst
/// case. A single pass computing heights bottom-up would be O(n), but the
/// simple form is plenty for the tree sizes this is used on.
pub fn equal_paths(root: Option<&BinaryNode>) -> bool {
    let Some(node) = root else {
        return true;
    };

    match (node.left.as_deref(), node.right.as_deref()) {
        (None, None) => true,
        (Some(only), None) | (None, Some(only)) => equal_paths(Some(only)),
        (Some(left), Some(right)) => {
            depth(Some(left)) == depth(Some(right))
                && equal_paths(Some(left))
                && equal_paths(Some(right))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_is_equal() {
        assert!(equal_paths(None));
    }

    #[test]
    fn single_leaf_is_equal() {
        let root = BinaryNode::leaf();
        assert!(equal_paths(Some(&root)));
    }

    #[test]
    fn one_child_chain_is_equal() {
        // Unary nodes are skipped, so a left-only chain has a single path.
        let inner = BinaryNode::branch(Some(BinaryNode::leaf()), None);
        let root = BinaryNode::branch(Some(inner), None);
        assert!(equal_paths(Some(&root)));
    }

    #[test]
    fn lopsided_tree_is_not_equal() {
        // Node 1 has children 2 and 3; node 2 has children 4 and 5; node 3
        // is a leaf. The left subtree's leaves sit a level deeper.
        let root = BinaryNode::branch(
            Some(BinaryNode::branch(
                Some(BinaryNode::leaf()),
                Some(BinaryNode::leaf()),
            )),
            Some(BinaryNode::leaf()),
        );
        assert!(!equal_paths(Some(&root)));
    }

    #[test]
    fn perfect_tree_is_equal() {
        fn perfect(depth: usize) -> Box<BinaryNode> {
            if depth == 0 {
                BinaryNode::leaf()
            } else {
                BinaryNode::branch(Some(perfect(depth - 1)), Some(perfect(depth - 1)))
            }
        }

        assert!(equal_paths(Some(&perfect(3))));
    }

    #[test]
    fn violation_below_equal_depths_is_still_caught() {
        // The root's subtrees have equal max depth, but the left subtree's
        // own children are uneven.
        fn pair() -> Box<BinaryNode> {
            BinaryNode::branch(Some(BinaryNode::leaf()), Some(BinaryNode::leaf()))
        }

        let uneven = BinaryNode::branch(Some(pair()), Some(BinaryNode::leaf()));
        let root = BinaryNode::branch(
            Some(uneven),
            Some(BinaryNode::branch(Some(pair()), Some(pair()))),
        );
        assert!(!equal_paths(Some(&root)));
    }
}
