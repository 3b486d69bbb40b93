extern crate std;

use std::{ops::Range, prelude::v1::*};

use cordyceps::Linked;
use proptest::prelude::*;

use crate::model::{self, TestNode};

use super::*;

fn insert_find_all(keys: &[u32]) {
    let mut tree: AvlTree<TestNode> = AvlTree::new();

    for &key in keys {
        tree.insert(TestNode::new(key));
        tree.assert_invariants();
    }

    for key in keys {
        let node = tree.get_raw(key).expect("item not found");
        assert_eq!(unsafe { node.as_ref().key() }, key);
    }
}

#[test]
fn zero_elems_find() {
    insert_find_all(&[]);
}

#[test]
fn single_elem_find() {
    insert_find_all(&[0]);
}

#[test]
fn two_elems_find() {
    insert_find_all(&[0, 1]);
    insert_find_all(&[1, 0]);
}

#[test]
fn three_elems_find() {
    insert_find_all(&[0, 1, 2]);
    insert_find_all(&[0, 2, 1]);
    insert_find_all(&[1, 0, 2]);
    insert_find_all(&[1, 2, 0]);
    insert_find_all(&[2, 0, 1]);
    insert_find_all(&[2, 1, 0]);
}

#[test]
fn four_elems_find() {
    insert_find_all(&[0, 1, 2, 3]);
    insert_find_all(&[0, 1, 3, 2]);
    insert_find_all(&[0, 2, 1, 3]);
    insert_find_all(&[0, 2, 3, 1]);
    insert_find_all(&[0, 3, 1, 2]);
    insert_find_all(&[0, 3, 2, 1]);

    insert_find_all(&[1, 0, 2, 3]);
    insert_find_all(&[1, 0, 3, 2]);
    insert_find_all(&[1, 2, 0, 3]);
    insert_find_all(&[1, 2, 3, 0]);
    insert_find_all(&[1, 3, 0, 2]);
    insert_find_all(&[1, 3, 2, 0]);

    insert_find_all(&[2, 0, 1, 3]);
    insert_find_all(&[2, 0, 3, 1]);
    insert_find_all(&[2, 1, 0, 3]);
    insert_find_all(&[2, 1, 3, 0]);
    insert_find_all(&[2, 3, 0, 1]);
    insert_find_all(&[2, 3, 1, 0]);

    insert_find_all(&[3, 0, 1, 2]);
    insert_find_all(&[3, 0, 2, 1]);
    insert_find_all(&[3, 1, 0, 2]);
    insert_find_all(&[3, 1, 2, 0]);
    insert_find_all(&[3, 2, 0, 1]);
    insert_find_all(&[3, 2, 1, 0]);
}

fn insert_remove_all(keys: &[u32]) {
    let mut tree: AvlTree<TestNode> = AvlTree::new();

    for &key in keys {
        tree.insert(TestNode::new(key));
        tree.assert_invariants();
    }

    for key in keys {
        let node = tree.remove(key).expect("item not found");
        assert_eq!(node.key, *key);
        tree.assert_invariants();
    }

    for &key in keys {
        tree.insert(TestNode::new(key));
        tree.assert_invariants();
    }

    for key in keys.iter().rev() {
        let node = tree.remove(key).expect("item not found");
        assert_eq!(node.key, *key);
        tree.assert_invariants();
    }
}

#[test]
fn remove_one() {
    insert_remove_all(&[0]);
}

#[test]
fn remove_two() {
    insert_remove_all(&[0, 1]);
    insert_remove_all(&[1, 0]);
}

#[test]
fn remove_three() {
    insert_remove_all(&[0, 1, 2]);
    insert_remove_all(&[0, 2, 1]);
    insert_remove_all(&[1, 0, 2]);
    insert_remove_all(&[1, 2, 0]);
    insert_remove_all(&[2, 0, 1]);
    insert_remove_all(&[2, 1, 0]);
}

#[test]
fn remove_four() {
    insert_remove_all(&[0, 1, 2, 3]);
    insert_remove_all(&[0, 1, 3, 2]);
    insert_remove_all(&[0, 2, 1, 3]);
    insert_remove_all(&[0, 2, 3, 1]);
    insert_remove_all(&[0, 3, 1, 2]);
    insert_remove_all(&[0, 3, 2, 1]);

    insert_remove_all(&[1, 0, 2, 3]);
    insert_remove_all(&[1, 0, 3, 2]);
    insert_remove_all(&[1, 2, 0, 3]);
    insert_remove_all(&[1, 2, 3, 0]);
    insert_remove_all(&[1, 3, 0, 2]);
    insert_remove_all(&[1, 3, 2, 0]);

    insert_remove_all(&[2, 0, 1, 3]);
    insert_remove_all(&[2, 0, 3, 1]);
    insert_remove_all(&[2, 1, 0, 3]);
    insert_remove_all(&[2, 1, 3, 0]);
    insert_remove_all(&[2, 3, 0, 1]);
    insert_remove_all(&[2, 3, 1, 0]);

    insert_remove_all(&[3, 0, 1, 2]);
    insert_remove_all(&[3, 0, 2, 1]);
    insert_remove_all(&[3, 1, 0, 2]);
    insert_remove_all(&[3, 1, 2, 0]);
    insert_remove_all(&[3, 2, 0, 1]);
    insert_remove_all(&[3, 2, 1, 0]);
}

fn build(keys: &[u32]) -> AvlTree<TestNode> {
    let mut tree = AvlTree::new();

    for &key in keys {
        tree.insert(TestNode::new(key));
        tree.assert_invariants();
    }

    tree
}

// Returns the height of the tree: -1 if empty, 0 for a single node.
fn height(tree: &AvlTree<TestNode>) -> i32 {
    unsafe fn node_height(node: Link<TestNode>) -> i32 {
        let Some(node) = node else {
            return -1;
        };

        unsafe {
            let links = TestNode::links(node);
            1 + node_height(links.as_ref().left()).max(node_height(links.as_ref().right()))
        }
    }

    unsafe { node_height(tree.root) }
}

fn snapshot(tree: &AvlTree<TestNode>) -> String {
    let mut out = String::new();
    tree.dotgraph("snapshot", &mut out).unwrap();
    out
}

#[test]
fn sequential_insert_balances_to_perfect_tree() {
    // Inserting 1..=7 in order forces a rotation cascade that ends in the
    // perfectly balanced tree rooted at 4.
    let tree = build(&[1, 2, 3, 4, 5, 6, 7]);

    assert_eq!(height(&tree), 2);

    let root = tree.root.expect("tree is not empty");
    unsafe {
        assert_eq!(*root.as_ref().key(), 4);
        assert_eq!(TestNode::links(root).as_ref().balance(), 0);
    }
}

#[test]
fn two_child_removal_promotes_predecessor() {
    let mut tree = build(&[5, 3, 8, 1, 4, 7, 9]);

    // 3 has two children; its predecessor 1 takes over its position.
    let removed = tree.remove(&3).expect("key is present");
    assert_eq!(removed.key, 3);
    tree.assert_invariants();

    unsafe {
        let root = tree.root.expect("tree is not empty");
        assert_eq!(*root.as_ref().key(), 5);

        let promoted = TestNode::links(root)
            .as_ref()
            .left()
            .expect("root keeps a left child");
        assert_eq!(*promoted.as_ref().key(), 1);
        assert!(TestNode::links(promoted).as_ref().left().is_none());

        let four = TestNode::links(promoted)
            .as_ref()
            .right()
            .expect("predecessor inherits the right child");
        assert_eq!(*four.as_ref().key(), 4);
    }

    let keys: Vec<u32> = tree.iter().map(|node| node.key).collect();
    assert_eq!(keys, [1, 4, 5, 7, 8, 9]);
}

#[test]
fn remove_of_absent_key_leaves_tree_untouched() {
    let mut tree = build(&[5, 3, 8, 1, 4, 7, 9]);

    let before = snapshot(&tree);
    assert!(tree.remove(&100).is_none());
    assert!(tree.remove(&6).is_none());
    let after = snapshot(&tree);

    assert_eq!(before, after);
    assert_eq!(tree.len(), 7);
}

#[test]
fn insert_replaces_node_with_equal_key() {
    let mut tree = build(&[2, 1, 3]);

    let before = snapshot(&tree);
    let old = tree.insert(TestNode::new(2)).expect("key already present");
    let after = snapshot(&tree);

    assert_eq!(old.key, 2);
    assert_eq!(before, after);
    assert_eq!(tree.len(), 3);
    tree.assert_invariants();
}

#[test]
fn insert_then_remove_preserves_key_set() {
    let keys = [13u32, 8, 21, 5, 11, 17, 30, 3, 6, 10, 12];
    let mut tree = build(&keys);

    tree.insert(TestNode::new(9));
    tree.assert_invariants();
    assert!(tree.remove(&9).is_some());
    tree.assert_invariants();

    let mut expected: Vec<u32> = keys.to_vec();
    expected.sort_unstable();
    let found: Vec<u32> = tree.iter().map(|node| node.key).collect();
    assert_eq!(found, expected);
}

#[test]
fn node_debug_output_keeps_links_opaque() {
    let node = TestNode::new(42);
    let repr = format!("{node:?}");

    assert!(repr.contains("key: 42"));
    assert!(repr.contains("Links { .. }"));
}

#[cfg(miri)]
const FUZZ_RANGE: Range<usize> = 0..10;

#[cfg(not(miri))]
const FUZZ_RANGE: Range<usize> = 0..1000;

proptest::proptest! {
    #![proptest_config(ProptestConfig {
        max_shrink_iters: 65536,
        .. ProptestConfig::default()
    })]

    #[test]
    fn btree_equivalence(ops in proptest::collection::vec(model::op_strategy(), FUZZ_RANGE)) {
        model::run_btree_equivalence(ops);
    }

    #[test]
    fn height_stays_within_avl_bound(keys in proptest::collection::vec(0u32..10_000, 1..500)) {
        let tree = build(&keys);

        let n = tree.len() as f64;
        let bound = 1.4405 * (n + 2.0).log2() - 0.3277;
        prop_assert!((height(&tree) as f64) <= bound);
    }
}
