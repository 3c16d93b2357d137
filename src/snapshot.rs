use core::fmt;

use crate::{AvlTree, Error, OpSink, Result};

/// A fail-fast iterator over a point-in-time copy of a tree's keys.
///
/// Created by [`AvlTree::iterator`] and [`AvlTree::iterator_from`]. The snapshot does not borrow
/// the tree; every call is handed the tree it was created from, and fails with
/// [`Error::ConcurrentModification`] if that tree has been mutated by anything other than this
/// iterator's own [`remove`](SnapshotIter::remove).
///
/// ```
/// use avl_dict::{AvlTree, Error};
///
/// let mut tree: AvlTree<u32> = [3, 1, 2].into_iter().collect();
/// let mut iter = tree.iterator();
///
/// assert_eq!(iter.next(&tree), Ok(&1));
/// iter.remove(&mut tree).unwrap();
/// assert_eq!(iter.next(&tree), Ok(&2));
///
/// tree.insert(10);
/// assert_eq!(iter.next(&tree), Err(Error::ConcurrentModification));
/// ```
#[derive(Clone)]
pub struct SnapshotIter<K> {
    keys: Vec<K>,
    pos: usize,
    generation: u64,
    // Set by `next` and cleared by `remove`.
    can_remove: bool,
}

impl<K> SnapshotIter<K> {
    pub(crate) fn new(keys: Vec<K>, generation: u64) -> Self {
        SnapshotIter {
            keys,
            pos: 0,
            generation,
            can_remove: false,
        }
    }

    /// Returns the number of keys not yet yielded. Does not check the tree for modification.
    pub fn remaining(&self) -> usize {
        self.keys.len() - self.pos
    }

    fn check_sync<S>(&self, tree: &AvlTree<K, S>) -> Result<()> {
        if tree.generation() == self.generation {
            Ok(())
        } else {
            Err(Error::ConcurrentModification)
        }
    }

    /// Returns `true` if keys remain to be yielded.
    pub fn has_next<S>(&self, tree: &AvlTree<K, S>) -> Result<bool> {
        self.check_sync(tree)?;
        Ok(self.pos < self.keys.len())
    }

    /// Returns the next key in ascending order.
    pub fn next<S>(&mut self, tree: &AvlTree<K, S>) -> Result<&K> {
        self.check_sync(tree)?;

        let key = self.keys.get(self.pos).ok_or(Error::EndOfIteration)?;
        self.pos += 1;
        self.can_remove = true;

        Ok(key)
    }

    /// Deletes the key most recently returned by [`next`](SnapshotIter::next) from `tree`.
    pub fn remove<S>(&mut self, tree: &mut AvlTree<K, S>) -> Result<()>
    where
        K: Ord + fmt::Debug,
        S: OpSink,
    {
        self.check_sync(tree)?;

        if !self.can_remove {
            return Err(Error::InvalidIteratorState);
        }

        let removed = tree.delete(&self.keys[self.pos - 1]);
        debug_assert!(removed, "snapshot key missing from an unmodified tree");

        self.can_remove = false;
        self.generation = tree.generation();

        Ok(())
    }
}

impl<K: fmt::Debug> fmt::Debug for SnapshotIter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotIter")
            .field("remaining", &&self.keys[self.pos..])
            .field("generation", &self.generation)
            .finish()
    }
}
