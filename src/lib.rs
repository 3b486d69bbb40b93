//! An intrusive AVL tree.

// Conventions used in comments:
// - The balance factor of a node `x` is denoted `b(x)` and is defined as
//   `h(right(x)) - h(left(x))`, where the height of a missing subtree is -1.
// - A node is left-heavy if `b(x) == -1` and right-heavy if `b(x) == 1`.
//
// The fundamental invariants of an AVL tree are:
// 1. For every node, `b(x)` is -1, 0 or 1.
// 2. The stored balance factor of every node equals its height difference.
//
// Both may be violated transiently between a structural edit and the end of
// the corresponding fix-up walk, but never across a public operation.
//
// Rebalancing after insertion needs at most one rotation region: attaching a
// single leaf grows exactly one subtree by exactly one level, and the first
// rotation restores that subtree to its old height. Removal is not so lucky;
// a rotation may itself shrink the subtree it repairs, so the fix-up walk
// keeps climbing, except in the one case where the post-rotation heights
// provably match the pre-removal heights (see `rebalance_removed`).

use core::{
    borrow::Borrow, cell::UnsafeCell, cmp::Ordering, fmt, marker::PhantomPinned, mem, ops::Not,
    pin::Pin, ptr::NonNull,
};

use cordyceps::Linked;

mod debug;
mod iter;
pub mod map;
pub mod paths;

#[cfg(any(test, feature = "model"))]
pub mod model;

#[cfg(test)]
mod tests;

pub use iter::Iter;

/// A node which can be an element of an [`AvlTree`].
pub trait TreeNode<L>: Linked<L> {
    type Key: Ord + fmt::Debug;

    fn key(&self) -> &Self::Key;
}

/// An intrusive AVL tree.
///
/// Each node stores a balance factor (right subtree height minus left subtree
/// height) rather than a height, so rebalancing touches only the nodes on the
/// walk from the edit point to the root.
pub struct AvlTree<T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    root: Link<T>,
    len: usize,
}

/// Links to other nodes in an [`AvlTree`], plus the node's balance factor.
pub struct Links<T: ?Sized> {
    inner: UnsafeCell<LinksInner<T>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

impl Dir {
    // The direction a node's balance factor moves when this subtree grows.
    #[inline]
    fn sign(self) -> i8 {
        match self {
            Dir::Left => -1,
            Dir::Right => 1,
        }
    }
}

#[repr(C)]
struct LinksInner<T: ?Sized> {
    parent: Link<T>,
    children: [Link<T>; 2],
    balance: i8,
    _unpin: PhantomPinned,
}

type Link<T> = Option<NonNull<T>>;

impl<T> AvlTree<T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    /// Returns a new empty tree.
    pub const fn new() -> AvlTree<T> {
        AvlTree { root: None, len: 0 }
    }

    /// Returns `true` if the tree contains no elements.
    pub const fn is_empty(&self) -> bool {
        let empty = self.len() == 0;

        if cfg!(debug_assertions) {
            // Can't use assert_eq!() in const fn.
            assert!(empty == self.root.is_none());
        }

        empty
    }

    /// Returns the number of elements in the tree.
    pub const fn len(&self) -> usize {
        self.len
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        if let Some(root) = self.root {
            unsafe {
                assert!(
                    T::links(root).as_ref().parent().is_none(),
                    "root must not have a parent"
                );
                self.assert_invariants_at(root);
            }
        }
    }

    // Checks the subtree rooted at `node` and returns its height (leaf = 0).
    unsafe fn assert_invariants_at(&self, node: NonNull<T>) -> i32 {
        unsafe {
            let mut heights = [-1; 2];

            for dir in [Dir::Left, Dir::Right] {
                if let Some(child) = T::links(node).as_ref().child(dir) {
                    // Ensure the child's parent link points back to this node.
                    let parent = T::links(child)
                        .as_ref()
                        .parent()
                        .expect("child parent pointer not set");
                    assert_eq!(node, parent);

                    // Ensure keys are ordered.
                    match dir {
                        Dir::Left => assert!(child.as_ref().key() < node.as_ref().key()),
                        Dir::Right => assert!(child.as_ref().key() > node.as_ref().key()),
                    }

                    heights[dir as usize] = self.assert_invariants_at(child);
                }
            }

            // Ensure the stored balance factor is the height difference and
            // is within the AVL bound.
            let balance = T::links(node).as_ref().balance();
            assert!(
                (-1..=1).contains(&balance),
                "balance factor {balance} out of range"
            );
            assert_eq!(
                i32::from(balance),
                heights[Dir::Right as usize] - heights[Dir::Left as usize],
                "stored balance factor does not match subtree heights"
            );

            1 + heights[0].max(heights[1])
        }
    }

    /// Returns a reference to the node corresponding to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<Pin<&T>>
    where
        T::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let ptr = self.get_raw(key)?;
        unsafe { Some(Pin::new_unchecked(ptr.as_ref())) }
    }

    /// Returns a pinned mutable reference to the node corresponding to `key`.
    ///
    /// The caller must not use the returned reference to modify the node's
    /// links or key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<Pin<&mut T>>
    where
        T::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut ptr = self.get_raw(key)?;
        unsafe { Some(Pin::new_unchecked(ptr.as_mut())) }
    }

    /// Returns `true` if the tree contains a node with `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        T::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_raw(key).is_some()
    }

    pub(crate) fn get_raw<Q>(&self, key: &Q) -> Link<T>
    where
        T::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut opt_cur = self.root;

        loop {
            let cur = opt_cur?;

            unsafe {
                match key.cmp(cur.as_ref().key().borrow()) {
                    Ordering::Less => opt_cur = T::links(cur).as_ref().left(),
                    Ordering::Equal => return Some(cur),
                    Ordering::Greater => opt_cur = T::links(cur).as_ref().right(),
                }
            }
        }
    }

    pub(crate) fn first_raw(&self) -> Link<T> {
        let mut cur = self.root?;

        unsafe {
            while let Some(left) = T::links(cur).as_ref().left() {
                cur = left;
            }
        }

        Some(cur)
    }

    fn last_raw(&self) -> Link<T> {
        let mut cur = self.root?;

        unsafe {
            while let Some(right) = T::links(cur).as_ref().right() {
                cur = right;
            }
        }

        Some(cur)
    }

    /// Returns the minimum element of the tree.
    pub fn first(&self) -> Option<Pin<&T>> {
        self.first_raw()
            .map(|first| unsafe { Pin::new_unchecked(first.as_ref()) })
    }

    /// Returns the maximum element of the tree.
    pub fn last(&self) -> Option<Pin<&T>> {
        self.last_raw()
            .map(|last| unsafe { Pin::new_unchecked(last.as_ref()) })
    }

    /// Removes and returns the minimum element of the tree.
    pub fn pop_first(&mut self) -> Option<T::Handle> {
        let first = self.first_raw()?;
        Some(unsafe { self.remove_at(first) })
    }

    /// Removes and returns the maximum element of the tree.
    pub fn pop_last(&mut self) -> Option<T::Handle> {
        let last = self.last_raw()?;
        Some(unsafe { self.remove_at(last) })
    }

    /// Returns an iterator over the elements of the tree in key order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    unsafe fn maybe_set_parent(&mut self, opt_node: Link<T>, parent: Link<T>) {
        let Some(node) = opt_node else {
            return;
        };

        unsafe { T::links(node).as_mut().set_parent(parent) };
    }

    #[inline]
    unsafe fn replace_child_or_set_root(
        &mut self,
        parent: Link<T>,
        old_child: NonNull<T>,
        new_child: Link<T>,
    ) {
        match parent {
            Some(parent) => unsafe { self.replace_child(parent, old_child, new_child) },
            None => self.root = new_child,
        }
    }

    // Replaces the child pointer of `parent` pointing at `old_child` with
    // `new_child`.
    //
    // `new_child`'s parent pointer is not updated.
    //
    // # Safety
    //
    // The caller must ensure that the following conditions hold:
    // - `old_child` is a child node of `parent`.
    // - `new_child` is not a child node of `parent`.
    #[inline]
    unsafe fn replace_child(
        &mut self,
        parent: NonNull<T>,
        old_child: NonNull<T>,
        new_child: Option<NonNull<T>>,
    ) {
        unsafe {
            let dir = self.which_child(parent, old_child);

            if let Some(new_child) = new_child {
                debug_assert_ne!(
                    T::links(parent).as_ref().child(!dir),
                    Some(new_child),
                    "`new_child` must not be a child of `parent`"
                );
            }

            T::links(parent).as_mut().set_child(dir, new_child);
        }
    }

    // Performs a rotation at `down`, moving its `pivot_side` child up.
    //
    // With `pivot_side == Dir::Right` this is a left rotation; with
    // `Dir::Left`, a right rotation. A missing pivot is a caller bug, not a
    // tolerated no-op.
    //
    // Balance factors are not updated; callers assign them afterward.
    fn rotate(&mut self, down: NonNull<T>, pivot_side: Dir) {
        unsafe {
            let up = T::links(down)
                .as_ref()
                .child(pivot_side)
                .expect("rotation pivot must exist");

            // `up`'s inner subtree switches sides, becoming `down`'s
            // `pivot_side` subtree.
            let across = T::links(up).as_ref().child(!pivot_side);
            T::links(down).as_mut().set_child(pivot_side, across);
            self.maybe_set_parent(across, Some(down));

            T::links(up).as_mut().set_child(!pivot_side, Some(down));
            let parent = T::links(down).as_mut().set_parent(Some(up));
            T::links(up).as_mut().set_parent(parent);

            match parent {
                Some(parent) => self.replace_child(parent, down, Some(up)),
                None => self.root = Some(up),
            }
        }
    }

    /// Inserts an item into the tree.
    ///
    /// If the tree already contains an item with an equal key, the new item
    /// takes over the old item's position, links and balance factor, and the
    /// old item's handle is returned. The tree's structure is unchanged in
    /// that case, and no rebalancing occurs.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn insert(&mut self, item: T::Handle) -> Option<T::Handle> {
        let ptr = T::into_ptr(item);

        let Some(root) = self.root else {
            // Tree is empty. Set `item` as the root and return.
            unsafe {
                let links = T::links(ptr).as_mut();
                links.set_parent(None);
                links.set_left(None);
                links.set_right(None);
                links.set_balance(0);
            }

            self.root = Some(ptr);
            self.len += 1;
            return None;
        };

        // Descend the tree, looking for a suitable leaf slot.
        let mut cur = root;
        let (parent, dir) = loop {
            let ordering = unsafe { ptr.as_ref().key().cmp(cur.as_ref().key()) };

            let dir = match ordering {
                Ordering::Less => Dir::Left,
                Ordering::Equal => return Some(unsafe { self.replace_at(cur, ptr) }),
                Ordering::Greater => Dir::Right,
            };

            match unsafe { T::links(cur).as_ref().child(dir) } {
                Some(child) => cur = child,
                None => break (cur, dir),
            }
        };

        unsafe {
            let links = T::links(ptr).as_mut();
            links.set_parent(Some(parent));
            links.set_left(None);
            links.set_right(None);
            links.set_balance(0);

            T::links(parent).as_mut().set_child(dir, Some(ptr));
        }

        self.len += 1;

        // If the parent was balanced, its subtree just grew a level and the
        // growth may propagate. If it was leaning the other way, the new leaf
        // evened it out and no height changed.
        let grew = unsafe {
            let parent_links = T::links(parent).as_mut();
            if parent_links.balance() == 0 {
                parent_links.set_balance(dir.sign());
                true
            } else {
                parent_links.set_balance(0);
                false
            }
        };

        if grew {
            unsafe { self.rebalance_inserted(parent, ptr) };
        }

        None
    }

    // Replaces the node `old` with the equal-keyed node `new`, transferring
    // `old`'s links and balance factor.
    //
    // # Safety
    //
    // `old` must be an element of `self`, and `new.key()` must equal
    // `old.key()`.
    unsafe fn replace_at(&mut self, old: NonNull<T>, new: NonNull<T>) -> T::Handle {
        unsafe {
            debug_assert!(new.as_ref().key() == old.as_ref().key());

            let parent = T::links(old).as_ref().parent();
            let left = T::links(old).as_ref().left();
            let right = T::links(old).as_ref().right();
            let balance = T::links(old).as_ref().balance();

            self.replace_child_or_set_root(parent, old, Some(new));
            self.maybe_set_parent(left, Some(new));
            self.maybe_set_parent(right, Some(new));

            let new_links = T::links(new).as_mut();
            new_links.set_parent(parent);
            new_links.set_left(left);
            new_links.set_right(right);
            new_links.set_balance(balance);

            T::links(old).as_mut().clear();

            T::from_ptr(old)
        }
    }

    // Performs a bottom-up rebalance of the tree after the insertion of
    // `node` under `parent`.
    //
    // Invariants on entry:
    // - `parent`'s subtree grew by one level, and `parent` now leans toward
    //   `node`'s side (`b(parent) == ±1`).
    //
    // The walk adjusts each grandparent's balance factor for the growth of
    // `parent`'s side and either stops (growth absorbed), ascends (growth
    // propagates), or performs exactly one rotation region and stops.
    unsafe fn rebalance_inserted(&mut self, parent: NonNull<T>, node: NonNull<T>) {
        unsafe {
            let Some(g) = T::links(parent).as_ref().parent() else {
                // Reached the root; the whole tree grew a level.
                return;
            };

            let dir = self.which_child(g, parent);
            let s = dir.sign();

            let balance = T::links(g).as_ref().balance() + s;
            T::links(g).as_mut().set_balance(balance);

            if balance == 0 {
                // `g` was leaning away from the insertion; the growth evened
                // it out and `g`'s subtree height is unchanged.
                return;
            }

            if balance == s {
                // `g` was balanced and now leans; its subtree grew, so the
                // growth keeps propagating.
                self.rebalance_inserted(g, parent);
                return;
            }

            // `b(g) == ±2`: rotate. One rotation region restores the subtree
            // to its pre-insertion height, so the walk ends here.
            debug_assert_eq!(balance, 2 * s);

            if self.which_child(parent, node) == dir {
                // Zig-zig: a single rotation at `g`.
                self.rotate(g, dir);
                T::links(g).as_mut().set_balance(0);
                T::links(parent).as_mut().set_balance(0);
            } else {
                // Zig-zag: `node` rotates above both `parent` and `g`. The
                // final balance factors depend on which of `node`'s subtrees
                // carried the new leaf.
                let node_balance = T::links(node).as_ref().balance();

                self.rotate(parent, !dir);
                self.rotate(g, dir);

                let (parent_balance, g_balance) = match node_balance {
                    b if b == s => (0, -s),
                    0 => (0, 0),
                    _ => (s, 0),
                };

                T::links(parent).as_mut().set_balance(parent_balance);
                T::links(g).as_mut().set_balance(g_balance);
                T::links(node).as_mut().set_balance(0);
            }
        }
    }

    // Returns the maximum node in the subtree.
    #[inline]
    unsafe fn max_in_subtree(&self, root: NonNull<T>) -> NonNull<T> {
        let mut cur = root;

        while let Some(right) = unsafe { T::links(cur).as_ref().right() } {
            cur = right;
        }

        cur
    }

    /// Removes the node corresponding to `key` from the tree.
    ///
    /// Returns `None` without modifying the tree if no such node exists.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T::Handle>
    where
        T::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.get_raw(key)?;
        Some(unsafe { self.remove_at(node) })
    }

    /// Removes an arbitrary node from the tree.
    ///
    /// # Safety
    ///
    /// It is the caller's responsibility to ensure that `node` is an element
    /// of `self`, and not any other tree.
    pub unsafe fn remove_at(&mut self, node: NonNull<T>) -> T::Handle {
        unsafe {
            // A node with two children cannot be spliced out directly. Its
            // in-order predecessor (the maximum of its left subtree) has no
            // right child, so the two trade places first and the removal
            // proceeds at the predecessor's old position.
            if let (Some(left), Some(_)) = (
                T::links(node).as_ref().left(),
                T::links(node).as_ref().right(),
            ) {
                let pred = self.max_in_subtree(left);
                self.swap_with_predecessor(node, pred);
            }

            let parent = T::links(node).as_ref().parent();
            let child = T::links(node)
                .as_ref()
                .left()
                .or(T::links(node).as_ref().right());

            // Capture the removal side before the splice destroys it. A left
            // removal leaves the parent's right subtree relatively taller.
            let fixup = parent.map(|p| (p, -self.which_child(p, node).sign()));

            self.replace_child_or_set_root(parent, node, child);
            self.maybe_set_parent(child, parent);

            T::links(node).as_mut().clear();
            self.len -= 1;

            if let Some((parent, diff)) = fixup {
                self.rebalance_removed(parent, diff);
            }

            T::from_ptr(node)
        }
    }

    // Exchanges the tree positions (links and balance factors) of `node` and
    // its in-order predecessor `pred`. Neither node's contents are touched.
    //
    // # Safety
    //
    // `node` must have two children and `pred` must be the maximum node of
    // `node`'s left subtree.
    unsafe fn swap_with_predecessor(&mut self, node: NonNull<T>, pred: NonNull<T>) {
        unsafe {
            let parent = T::links(node).as_ref().parent();
            let left = T::links(node).as_ref().left();
            let right = T::links(node).as_ref().right();
            let node_balance = T::links(node).as_ref().balance();

            let pred_parent = T::links(pred).as_ref().parent();
            let pred_left = T::links(pred).as_ref().left();
            let pred_balance = T::links(pred).as_ref().balance();

            debug_assert!(T::links(pred).as_ref().right().is_none());

            // `pred` assumes `node`'s position.
            self.replace_child_or_set_root(parent, node, Some(pred));
            T::links(pred).as_mut().set_parent(parent);
            T::links(pred).as_mut().set_right(right);
            self.maybe_set_parent(right, Some(pred));
            T::links(pred).as_mut().set_balance(node_balance);

            if left == Some(pred) {
                // The predecessor is `node`'s own left child; after the swap
                // it keeps `node` below it on the left.
                T::links(pred).as_mut().set_left(Some(node));
                T::links(node).as_mut().set_parent(Some(pred));
            } else {
                T::links(pred).as_mut().set_left(left);
                self.maybe_set_parent(left, Some(pred));

                // `pred` is the maximum of a subtree it does not root, so it
                // is a right child.
                let pred_parent = pred_parent.expect("predecessor must have a parent");
                T::links(pred_parent).as_mut().set_right(Some(node));
                T::links(node).as_mut().set_parent(Some(pred_parent));
            }

            // `node` assumes `pred`'s old position.
            T::links(node).as_mut().set_left(pred_left);
            self.maybe_set_parent(pred_left, Some(node));
            T::links(node).as_mut().set_right(None);
            T::links(node).as_mut().set_balance(pred_balance);
        }
    }

    // Performs a bottom-up rebalance of the tree after a removal from one of
    // `parent`'s subtrees.
    //
    // `diff` is +1 if the removal was from `parent`'s left subtree and -1 if
    // from the right; it is the adjustment the removal applies to
    // `b(parent)`.
    //
    // Unlike insertion, a removal fix-up may rotate at several levels: a
    // rotation here can shrink the repaired subtree by a level, which is
    // itself a removal as far as the ancestors are concerned. The walk stops
    // early only when a subtree's height is provably unchanged.
    unsafe fn rebalance_removed(&mut self, parent: NonNull<T>, diff: i8) {
        unsafe {
            debug_assert!(diff == 1 || diff == -1);

            let balance = T::links(parent).as_ref().balance() + diff;

            // The rotations below may move `parent` down the tree, so its
            // slot under its own parent must be captured first.
            let next = T::links(parent)
                .as_ref()
                .parent()
                .map(|g| (g, -self.which_child(g, parent).sign()));

            if balance == diff {
                // `parent` was balanced; the shortened subtree now just
                // leans, and `parent`'s overall height is unchanged.
                T::links(parent).as_mut().set_balance(balance);
                return;
            }

            if balance == 0 {
                // `parent` leaned toward the shortened subtree; it is now
                // balanced but one level shorter, so the shrink propagates.
                T::links(parent).as_mut().set_balance(0);
                if let Some((g, diff)) = next {
                    self.rebalance_removed(g, diff);
                }
                return;
            }

            // `b(parent) == ±2`: the surviving subtree is two levels taller.
            // Rotate toward the shortened side.
            debug_assert_eq!(balance, 2 * diff);

            let tall = if diff == 1 { Dir::Right } else { Dir::Left };
            let sibling = T::links(parent)
                .as_ref()
                .child(tall)
                .expect("taller subtree must exist");
            let sibling_balance = T::links(sibling).as_ref().balance();

            if sibling_balance == 0 {
                // Zig-zig, balanced sibling: a single rotation. The subtree
                // keeps its pre-removal height, so the walk ends here. This
                // is the only rotation case that terminates the fix-up.
                self.rotate(parent, tall);
                T::links(parent).as_mut().set_balance(diff);
                T::links(sibling).as_mut().set_balance(-diff);
                return;
            }

            if sibling_balance == diff {
                // Zig-zig, outward-leaning sibling: a single rotation shrinks
                // the subtree by a level.
                self.rotate(parent, tall);
                T::links(parent).as_mut().set_balance(0);
                T::links(sibling).as_mut().set_balance(0);
            } else {
                // Zig-zag: the sibling leans inward, and its inner child
                // rotates above both. The final balance factors depend on
                // which of the inner child's subtrees was the taller.
                let inner = T::links(sibling)
                    .as_ref()
                    .child(!tall)
                    .expect("inward-leaning sibling must have an inner child");
                let inner_balance = T::links(inner).as_ref().balance();

                self.rotate(sibling, !tall);
                self.rotate(parent, tall);

                let (parent_balance, sibling_balance) = match inner_balance {
                    b if b == diff => (-diff, 0),
                    0 => (0, 0),
                    _ => (0, diff),
                };

                T::links(parent).as_mut().set_balance(parent_balance);
                T::links(sibling).as_mut().set_balance(sibling_balance);
                T::links(inner).as_mut().set_balance(0);
            }

            // Either rotation case above shrank the subtree by a level.
            if let Some((g, diff)) = next {
                self.rebalance_removed(g, diff);
            }
        }
    }

    /// Clears the tree, removing all elements.
    pub fn clear(&mut self) {
        let mut opt_cur = self.root;

        while let Some(cur) = opt_cur {
            unsafe {
                // Descend to the minimum node.
                let mut cur = cur;
                while let Some(left) = T::links(cur).as_ref().left() {
                    cur = left;
                }

                let parent = T::links(cur).as_ref().parent();
                let right = T::links(cur).as_ref().right();

                // Elevate the node's right child (which may be None).
                self.replace_child_or_set_root(parent, cur, right);
                self.maybe_set_parent(right, parent);

                // Drop the node.
                drop(T::from_ptr(cur));
                self.len -= 1;

                // If the node had no right child, climb to the parent. If the
                // node had no parent, the tree is empty.
                opt_cur = right.or(parent);
            }
        }

        debug_assert!(self.root.is_none());
        debug_assert_eq!(self.len(), 0);
    }

    unsafe fn which_child(&self, parent: NonNull<T>, child: NonNull<T>) -> Dir {
        if unsafe { T::links(parent).as_ref().left() } == Some(child) {
            Dir::Left
        } else {
            Dir::Right
        }
    }
}

impl<T> Drop for AvlTree<T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for AvlTree<T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Links<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: UnsafeCell::new(LinksInner {
                parent: None,
                children: [None; 2],
                balance: 0,
                _unpin: PhantomPinned,
            }),
        }
    }

    #[inline]
    fn balance(&self) -> i8 {
        unsafe { (*self.inner.get()).balance }
    }

    #[inline]
    fn parent(&self) -> Link<T> {
        unsafe { (*self.inner.get()).parent }
    }

    #[inline]
    fn child(&self, dir: Dir) -> Link<T> {
        unsafe { (*self.inner.get()).children[dir as usize] }
    }

    #[inline]
    fn left(&self) -> Link<T> {
        self.child(Dir::Left)
    }

    #[inline]
    fn right(&self) -> Link<T> {
        self.child(Dir::Right)
    }

    #[inline]
    fn set_parent(&mut self, parent: Link<T>) -> Link<T> {
        mem::replace(&mut self.inner.get_mut().parent, parent)
    }

    #[inline]
    fn set_child(&mut self, dir: Dir, child: Link<T>) -> Link<T> {
        mem::replace(&mut self.inner.get_mut().children[dir as usize], child)
    }

    #[inline]
    fn set_left(&mut self, left: Link<T>) -> Link<T> {
        self.set_child(Dir::Left, left)
    }

    #[inline]
    fn set_right(&mut self, right: Link<T>) -> Link<T> {
        self.set_child(Dir::Right, right)
    }

    #[inline]
    fn set_balance(&mut self, balance: i8) {
        self.inner.get_mut().balance = balance;
    }

    #[inline]
    fn clear(&mut self) {
        let inner = self.inner.get_mut();
        inner.parent = None;
        inner.children = [None; 2];
        inner.balance = 0;
    }
}

impl<T: ?Sized> Default for Links<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Raw pointers to sibling nodes are not meaningful output; keep the links
// opaque so node types can derive `Debug`.
impl<T: ?Sized> fmt::Debug for Links<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Links").finish_non_exhaustive()
    }
}
