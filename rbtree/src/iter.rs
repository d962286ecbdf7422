use core::iter::FusedIterator;

use crate::{NodeId, RedBlackTree};

/// In-order iterator over the keys of a [`RedBlackTree`].
///
/// Steps along successor/predecessor links, so it needs no stack. Created by
/// [`RedBlackTree::iter`].
pub struct Iter<'a, K> {
    tree: &'a RedBlackTree<K>,
    front: NodeId,
    back: NodeId,
    // front and back may meet in the middle, this stops them crossing
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(tree: &'a RedBlackTree<K>, front: NodeId, back: NodeId, len: usize) -> Self {
        Self {
            tree,
            front,
            back,
            remaining: len,
        }
    }
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.front;
        self.front = self.tree.successor_of(node);
        self.remaining -= 1;
        Some(self.tree.key_of(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.back;
        self.back = self.tree.predecessor_of(node);
        self.remaining -= 1;
        Some(self.tree.key_of(node))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}
