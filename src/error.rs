use thiserror::Error;

/// Failures reported by [`AvlTree`](crate::AvlTree) queries and [`SnapshotIter`](crate::SnapshotIter).
///
/// None of these leave the tree modified; a failed call performs no partial mutation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("the tree contains no elements")]
    EmptyTree,

    #[error("no stored key is less than the probe key")]
    NoSuchPredecessor,

    #[error("no stored key is greater than the probe key")]
    NoSuchSuccessor,

    #[error("the iterator has yielded every element")]
    EndOfIteration,

    /// `remove()` was called before any `next()`, or twice without a `next()` in between.
    #[error("remove() must follow a call to next()")]
    InvalidIteratorState,

    /// The tree was mutated by something other than the iterator's own `remove()`.
    #[error("the tree was modified after the iterator was created")]
    ConcurrentModification,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
