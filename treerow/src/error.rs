//! Error types for the tree index and its stores.

use thiserror::Error;

/// Errors raised by a [`TreeStore`](crate::store::TreeStore) while it is
/// being queried.
///
/// A store fault is a programming error on the store's side; the index never
/// catches or retries it, it only guarantees that nothing was spliced.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("child index {index} out of range (child count {count})")]
    ChildOutOfRange { index: usize, count: usize },
    #[error("unknown item: {0}")]
    UnknownItem(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

/// Errors raised by [`TreeIndex`](crate::TreeIndex) operations.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A row argument outside `0..count`.
    ///
    /// This points at a grid that is out of sync with the index, so it is
    /// surfaced rather than swallowed.
    #[error("row {row} is out of range (count {count})")]
    InvalidIndex { row: usize, count: usize },
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// Reported by [`TreeIndex::validate`](crate::TreeIndex::validate).
    #[error("flat list is inconsistent at row {row}: {reason}")]
    Inconsistent { row: usize, reason: String },
}

pub type TreeResult<T> = Result<T, TreeError>;
