use super::node::{Node, OptNode};
use std::iter::FusedIterator;

/// An iterator over the entries of an [`AvlMap`](super::AvlMap), sorted by
/// key.
///
/// Nodes have no parent links, so the iterator keeps its own stacks of
/// ancestors: one for stepping to successors from the front and one for
/// stepping to predecessors from the back.
pub struct Iter<'a, K, V> {
    front: Vec<&'a Node<K, V>>,
    back: Vec<&'a Node<K, V>>,
    len: usize,
}

fn push_left_spine<'a, K, V>(work: &mut Vec<&'a Node<K, V>>, mut curr: &'a OptNode<K, V>) {
    while let Some(n) = curr.as_deref() {
        work.push(n);
        curr = &n.left;
    }
}

fn push_right_spine<'a, K, V>(work: &mut Vec<&'a Node<K, V>>, mut curr: &'a OptNode<K, V>) {
    while let Some(n) = curr.as_deref() {
        work.push(n);
        curr = &n.right;
    }
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: &'a OptNode<K, V>, len: usize) -> Self {
        let mut front = Vec::new();
        let mut back = Vec::new();
        push_left_spine(&mut front, root);
        push_right_spine(&mut back, root);
        Iter { front, back, len }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            front: self.front.clone(),
            back: self.back.clone(),
            len: self.len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        // The two ends meet once len entries have been returned; the stacks
        // themselves never notice each other.
        if self.len == 0 {
            return None;
        }

        self.front.pop().map(|n| {
            self.len -= 1;
            push_left_spine(&mut self.front, &n.right);
            (&n.key, &n.val)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        self.back.pop().map(|n| {
            self.len -= 1;
            push_right_spine(&mut self.back, &n.left);
            (&n.key, &n.val)
        })
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}
