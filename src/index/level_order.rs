//! Breadth-first traversal of a subtree, used to gather every record that
//! shares a species name once the first one has been found.

use std::collections::VecDeque;

use super::avl::Node;

/// Level-order iterator over the subtree rooted at a given node.
///
/// Children are queued left before right as their parent is yielded.
pub struct LevelOrder<'a, T> {
    queue: VecDeque<&'a Node<T>>,
}

impl<'a, T> LevelOrder<'a, T> {
    pub fn new(start: &'a Node<T>) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(start);
        Self { queue }
    }
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        if let Some(left) = node.left() {
            self.queue.push_back(left);
        }
        if let Some(right) = node.right() {
            self.queue.push_back(right);
        }
        Some(node.value())
    }
}

/// Collects up to `expected` values from the subtree under `start` that
/// satisfy `same_group`, visiting nodes breadth-first.
///
/// `start` must be the first node met when descending from the root with a
/// comparator on the group key alone. Every other member of the group then
/// lies inside its subtree: an equal value outside it would sit on the far
/// side of some ancestor, and that ancestor would have to compare equal too,
/// so the descent would have stopped there. Stopping at `expected` only saves
/// the tail of the walk.
pub fn collect_group<'a, T, F>(start: &'a Node<T>, expected: usize, mut same_group: F) -> Vec<&'a T>
where
    F: FnMut(&T) -> bool,
{
    let mut found = Vec::with_capacity(expected);
    if expected == 0 {
        return found;
    }
    for value in LevelOrder::new(start) {
        if same_group(value) {
            found.push(value);
            if found.len() == expected {
                break;
            }
        }
    }
    found
}
