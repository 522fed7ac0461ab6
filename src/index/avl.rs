//! Height-balanced binary search tree (AVL).
//!
//! Each node owns its children outright (`Option<Box<Node<T>>>`), so rotations
//! are moves of boxed subtrees and teardown is an ordinary drop. Heights are
//! cached per node and only recomputed on the path unwound by an insert or
//! remove; an empty subtree has height -1 and a leaf height 0.
//!
//! Insert and remove recurse along a single root-to-leaf path, which the
//! balance invariant keeps at O(log n) frames. Whole-tree traversals use an
//! explicit stack or queue.

use std::cmp::{Ordering, max};
use std::mem;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A tree node holding one value and its cached subtree height.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) height: i32,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            height: 0,
            left: None,
            right: None,
        })
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn update_height(&mut self) {
        self.height = 1 + max(height(&self.left), height(&self.right));
    }

    /// Left height minus right height.
    fn balance_factor(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

fn height<T>(link: &Link<T>) -> i32 {
    link.as_ref().map_or(-1, |node| node.height)
}

/// Single right rotation; fixes a left-left imbalance.
///
/// The left child becomes the subtree root and its right subtree is
/// re-parented under the old root.
fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

/// Single left rotation; fixes a right-right imbalance.
fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// Recomputes `node`'s height and applies at most one single or double
/// rotation when its children differ in height by two.
///
/// The case is picked from the heavy child's own children, so the same code
/// serves insertion and deletion. On a tie (deletion only) the single
/// rotation is used.
fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        if let Some(left) = node.left.take() {
            // left-right: straighten the left child first
            node.left = Some(if height(&left.left) >= height(&left.right) {
                left
            } else {
                rotate_left(left)
            });
        }
        rotate_right(node)
    } else if balance < -1 {
        if let Some(right) = node.right.take() {
            // right-left
            node.right = Some(if height(&right.right) >= height(&right.left) {
                right
            } else {
                rotate_right(right)
            });
        }
        rotate_left(node)
    } else {
        node
    }
}

fn insert_at<T: Ord>(link: Link<T>, value: T) -> (Box<Node<T>>, bool) {
    let Some(mut node) = link else {
        return (Node::leaf(value), true);
    };

    let inserted = match value.cmp(&node.value) {
        Ordering::Less => {
            let (child, inserted) = insert_at(node.left.take(), value);
            node.left = Some(child);
            inserted
        }
        Ordering::Greater => {
            let (child, inserted) = insert_at(node.right.take(), value);
            node.right = Some(child);
            inserted
        }
        Ordering::Equal => false,
    };

    if inserted {
        (rebalance(node), true)
    } else {
        (node, false)
    }
}

/// `target` returns the ordering of the sought key relative to the node value.
fn remove_at<T, F>(link: Link<T>, target: &mut F) -> (Link<T>, Option<T>)
where
    F: FnMut(&T) -> Ordering,
{
    let Some(mut node) = link else {
        return (None, None);
    };

    let removed = match target(&node.value) {
        Ordering::Less => {
            let (child, removed) = remove_at(node.left.take(), target);
            node.left = child;
            removed
        }
        Ordering::Greater => {
            let (child, removed) = remove_at(node.right.take(), target);
            node.right = child;
            removed
        }
        Ordering::Equal => {
            let (replacement, value) = unlink(node);
            return (replacement, Some(value));
        }
    };

    match removed {
        Some(value) => (Some(rebalance(node)), Some(value)),
        None => (Some(node), None),
    }
}

/// Removes `node` itself, returning what takes its place and its value.
fn unlink<T>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    match (node.left.take(), node.right.take()) {
        (None, None) => (None, node.value),
        (Some(child), None) | (None, Some(child)) => (Some(child), node.value),
        (Some(left), Some(right)) => {
            // Two children: pull up the in-order successor's value.
            let (rest, successor) = take_min(right);
            let value = mem::replace(&mut node.value, successor);
            node.left = Some(left);
            node.right = rest;
            (Some(rebalance(node)), value)
        }
    }
}

/// Detaches the leftmost node of a subtree, rebalancing on the way back up.
fn take_min<T>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    match node.left.take() {
        None => {
            let Node { value, right, .. } = *node;
            (right, value)
        }
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            (Some(rebalance(node)), min)
        }
    }
}

/// An AVL tree of unique values.
#[derive(Debug, Clone)]
pub struct AvlTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> AvlTree<T> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the root; -1 when empty.
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Descends from the root and returns the first node for which `target`
    /// reports `Equal`.
    ///
    /// `target` may compare on a prefix of the ordering key (for instance only
    /// the species name), in which case the returned node is the one closest
    /// to the root among all equal nodes.
    pub fn find_node_by<F>(&self, mut target: F) -> Option<&Node<T>>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match target(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    pub fn find_by<F>(&self, target: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.find_node_by(target).map(Node::value)
    }

    /// Removes the value for which `target` reports `Equal`, if any.
    pub fn remove_by<F>(&mut self, mut target: F) -> Option<T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let (root, removed) = remove_at(self.root.take(), &mut target);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn min(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    pub fn max(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    /// In-order iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len)
    }
}

impl<T: Ord> AvlTree<T> {
    /// Inserts `value`. Returns `false`, leaving the tree untouched, when an
    /// equal value is already present.
    pub fn insert(&mut self, value: T) -> bool {
        let (root, inserted) = insert_at(self.root.take(), value);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    pub fn find(&self, value: &T) -> Option<&T> {
        self.find_by(|probe| value.cmp(probe))
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    pub fn remove(&mut self, value: &T) -> Option<T> {
        self.remove_by(|probe| value.cmp(probe))
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator driven by an explicit stack of left spines.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Walks the whole tree and checks cached heights, the balance bound and
    /// strict in-order ordering. Returns the node count.
    fn check_invariants<T: Ord + std::fmt::Debug>(tree: &AvlTree<T>) -> usize {
        fn walk<T: Ord + std::fmt::Debug>(node: Option<&Node<T>>) -> (i32, usize) {
            let Some(node) = node else {
                return (-1, 0);
            };
            let (lh, lc) = walk(node.left());
            let (rh, rc) = walk(node.right());
            assert_eq!(node.height, 1 + lh.max(rh), "stale height at {:?}", node.value);
            assert!((lh - rh).abs() <= 1, "unbalanced at {:?}", node.value);
            (node.height, lc + rc + 1)
        }

        let (_, count) = walk(tree.root());
        let values: Vec<&T> = tree.iter().collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]), "out of order");
        assert_eq!(values.len(), count);
        assert_eq!(tree.len(), count);
        count
    }

    #[test]
    fn test_empty_tree() {
        let tree: AvlTree<i32> = AvlTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
        assert_eq!(tree.find(&3), None);
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    fn test_single_node_height() {
        let mut tree = AvlTree::new();
        assert!(tree.insert(5));
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_left_left_rotation() {
        let mut tree = AvlTree::new();
        for v in [3, 2, 1] {
            tree.insert(v);
        }
        let root = tree.root().unwrap();
        assert_eq!(root.value, 2);
        assert_eq!(root.left().unwrap().value, 1);
        assert_eq!(root.right().unwrap().value, 3);
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn test_left_right_rotation() {
        let mut tree = AvlTree::new();
        for v in [3, 1, 2] {
            tree.insert(v);
        }
        assert_eq!(tree.root().unwrap().value, 2);
        check_invariants(&tree);
    }

    #[test]
    fn test_right_right_rotation() {
        let mut tree = AvlTree::new();
        for v in [1, 2, 3] {
            tree.insert(v);
        }
        assert_eq!(tree.root().unwrap().value, 2);
        check_invariants(&tree);
    }

    #[test]
    fn test_right_left_rotation() {
        let mut tree = AvlTree::new();
        for v in [1, 3, 2] {
            tree.insert(v);
        }
        assert_eq!(tree.root().unwrap().value, 2);
        check_invariants(&tree);
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut tree = AvlTree::new();
        for v in [4, 2, 6, 1, 3] {
            tree.insert(v);
        }
        let before: Vec<i32> = tree.iter().copied().collect();
        let height = tree.height();

        assert!(!tree.insert(3));
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.height(), height);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_sorted_insert_stays_logarithmic() {
        let mut tree = AvlTree::new();
        for v in 0..1024 {
            tree.insert(v);
        }
        check_invariants(&tree);
        // A perfectly balanced tree of 1024 nodes has height 10.
        assert_eq!(tree.height(), 10);
        assert_eq!(tree.min(), Some(&0));
        assert_eq!(tree.max(), Some(&1023));
    }

    #[test]
    fn test_remove_leaf_one_child_two_children() {
        let mut tree = AvlTree::new();
        for v in [50, 30, 70, 20, 40, 60, 80, 35] {
            tree.insert(v);
        }

        assert_eq!(tree.remove(&40), Some(40)); // one child (35)
        check_invariants(&tree);
        assert_eq!(tree.remove(&20), Some(20)); // leaf
        check_invariants(&tree);
        assert_eq!(tree.remove(&50), Some(50)); // two children, successor 60
        check_invariants(&tree);

        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![30, 35, 60, 70, 80]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut tree = AvlTree::new();
        for v in [2, 1, 3] {
            tree.insert(v);
        }
        assert_eq!(tree.remove(&9), None);
        assert_eq!(tree.len(), 3);

        let mut empty: AvlTree<i32> = AvlTree::new();
        assert_eq!(empty.remove(&1), None);
    }

    #[test]
    fn test_remove_rebalances() {
        let mut tree = AvlTree::new();
        for v in [2, 1, 4, 3, 5] {
            tree.insert(v);
        }
        // Removing 1 leaves the root right-heavy by two.
        tree.remove(&1);
        check_invariants(&tree);
        assert_eq!(tree.root().unwrap().value, 4);
    }

    #[test]
    fn test_remove_everything() {
        let mut tree = AvlTree::new();
        for v in 0..100 {
            tree.insert(v);
        }
        for v in (0..100).rev().step_by(3) {
            assert_eq!(tree.remove(&v), Some(v));
            check_invariants(&tree);
        }
        let rest: Vec<i32> = tree.iter().copied().collect();
        for v in rest {
            assert_eq!(tree.remove(&v), Some(v));
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
    }

    #[test]
    fn test_find_node_by_prefix() {
        let mut tree = AvlTree::new();
        for v in [(1, 'a'), (2, 'a'), (2, 'b'), (2, 'c'), (3, 'a')] {
            tree.insert(v);
        }
        let node = tree.find_node_by(|probe| 2.cmp(&probe.0)).unwrap();
        assert_eq!(node.value.0, 2);
        assert!(tree.find_node_by(|probe| 9.cmp(&probe.0)).is_none());
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_after_each_insert(values in proptest::collection::vec(0u16..500, 0..300)) {
            let mut tree = AvlTree::new();
            let mut expected = std::collections::BTreeSet::new();
            for v in values {
                let inserted = tree.insert(v);
                prop_assert_eq!(inserted, expected.insert(v));
                check_invariants(&tree);
            }
            prop_assert_eq!(tree.len(), expected.len());
            prop_assert!(tree.iter().copied().eq(expected.iter().copied()));
            for v in &expected {
                prop_assert_eq!(tree.find(v), Some(v));
            }
        }

        #[test]
        fn prop_invariants_hold_after_each_remove(
            values in proptest::collection::vec(0u16..200, 1..200),
            removals in proptest::collection::vec(0u16..220, 0..200),
        ) {
            let mut tree = AvlTree::new();
            let mut expected = std::collections::BTreeSet::new();
            for v in values {
                tree.insert(v);
                expected.insert(v);
            }
            for v in removals {
                let removed = tree.remove(&v);
                prop_assert_eq!(removed.is_some(), expected.remove(&v));
                check_invariants(&tree);
            }
            prop_assert!(tree.iter().copied().eq(expected.iter().copied()));
        }
    }
}
