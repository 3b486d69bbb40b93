use core::{marker::PhantomData, ptr::NonNull};

use crate::{AvlTree, Link, Links, TreeNode};

/// An in-order iterator over the elements of an [`AvlTree`].
///
/// Traversal uses the nodes' parent links, so no auxiliary stack is needed.
pub struct Iter<'tree, T: TreeNode<Links<T>> + ?Sized> {
    cur: Link<T>,
    len: usize,
    _tree: PhantomData<&'tree AvlTree<T>>,
}

impl<'tree, T: TreeNode<Links<T>> + ?Sized> Iter<'tree, T> {
    pub(crate) fn new(tree: &'tree AvlTree<T>) -> Self {
        Iter {
            cur: tree.first_raw(),
            len: tree.len(),
            _tree: PhantomData,
        }
    }
}

impl<'tree, T: TreeNode<Links<T>> + ?Sized> Iterator for Iter<'tree, T> {
    type Item = &'tree T;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.cur?;

        self.cur = unsafe { successor(cur) };
        self.len -= 1;

        Some(unsafe { cur.as_ref() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T: TreeNode<Links<T>> + ?Sized> ExactSizeIterator for Iter<'_, T> {}

// Returns the in-order successor of `node`: the minimum of its right subtree
// if one exists, and otherwise the nearest ancestor holding `node` in its
// left subtree.
unsafe fn successor<T: TreeNode<Links<T>> + ?Sized>(node: NonNull<T>) -> Link<T> {
    unsafe {
        if let Some(right) = T::links(node).as_ref().right() {
            let mut cur = right;
            while let Some(left) = T::links(cur).as_ref().left() {
                cur = left;
            }
            return Some(cur);
        }

        let mut cur = node;
        while let Some(parent) = T::links(cur).as_ref().parent() {
            if T::links(parent).as_ref().left() == Some(cur) {
                return Some(parent);
            }
            cur = parent;
        }

        None
    }
}
