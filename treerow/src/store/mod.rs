//! The store side of the index: the hierarchy the rows are flattened from.

mod memory;

pub use memory::{MemoryStore, NodeId};

use std::fmt::Debug;

use crate::error::StoreError;

/// Kind of a structural change, used both for store notifications and for
/// the row notifications the index raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Insert,
    Remove,
    Reset,
}

/// A structural change reported by a store.
///
/// `parent` is the item whose children changed, or `None` for the forest
/// roots. `start` and `count` address that child list: for `Insert` they
/// name the new children as they are numbered *after* the change, for
/// `Remove` the old children as they were numbered *before* it. Both are
/// ignored for `Reset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange<I> {
    pub parent: Option<I>,
    pub kind: ChangeKind,
    pub start: usize,
    pub count: usize,
}

impl<I> StoreChange<I> {
    pub fn insert(parent: Option<I>, start: usize, count: usize) -> Self {
        Self {
            parent,
            kind: ChangeKind::Insert,
            start,
            count,
        }
    }

    pub fn remove(parent: Option<I>, start: usize, count: usize) -> Self {
        Self {
            parent,
            kind: ChangeKind::Remove,
            start,
            count,
        }
    }

    pub fn reset(parent: Option<I>) -> Self {
        Self {
            parent,
            kind: ChangeKind::Reset,
            start: 0,
            count: 0,
        }
    }
}

/// Capability interface of a hierarchical data source.
///
/// The store owns its items; the index only keeps cloned handles, so `Item`
/// should be cheap to clone (an id, an `Rc`, a path). The forest roots are
/// the children of the virtual parent `None`.
///
/// Children are pulled on demand: the index only asks for the children of a
/// node while that node is being expanded (or was already expanded when the
/// store was attached). A store may therefore be infinite as long as only
/// finitely many nodes are marked expanded.
///
/// The `Expanded` flag is state the store persists, not a cache of the
/// index. Attaching the same store to a fresh index restores the same rows.
///
/// # Example
///
/// ```
/// use treerow::store::TreeStore;
/// use treerow::StoreError;
///
/// /// Every node has `width` children, forever.
/// struct Fan {
///     width: usize,
///     open: std::collections::HashSet<Vec<usize>>,
/// }
///
/// impl TreeStore for Fan {
///     type Item = Vec<usize>;
///
///     fn child_count(&self, _parent: Option<&Vec<usize>>) -> Result<usize, StoreError> {
///         Ok(self.width)
///     }
///
///     fn child_at(&self, parent: Option<&Vec<usize>>, index: usize) -> Result<Vec<usize>, StoreError> {
///         let mut path = parent.cloned().unwrap_or_default();
///         path.push(index);
///         Ok(path)
///     }
///
///     fn is_expandable(&self, _item: &Vec<usize>) -> bool {
///         true
///     }
///
///     fn is_expanded(&self, item: &Vec<usize>) -> bool {
///         self.open.contains(item)
///     }
///
///     fn set_expanded(&mut self, item: &Vec<usize>, expanded: bool) {
///         if expanded {
///             self.open.insert(item.clone());
///         } else {
///             self.open.remove(item);
///         }
///     }
/// }
/// ```
pub trait TreeStore {
    /// Handle of one node.
    type Item: Clone + PartialEq + Debug;

    /// Number of children of `parent` (`None` = roots).
    fn child_count(&self, parent: Option<&Self::Item>) -> Result<usize, StoreError>;

    /// The `index`th child of `parent` (`None` = roots).
    fn child_at(&self, parent: Option<&Self::Item>, index: usize)
    -> Result<Self::Item, StoreError>;

    /// Whether the node can be expanded at all.
    fn is_expandable(&self, item: &Self::Item) -> bool;

    /// Persisted expansion flag.
    fn is_expanded(&self, item: &Self::Item) -> bool;

    /// Write the persisted expansion flag.
    fn set_expanded(&mut self, item: &Self::Item, expanded: bool);

    /// Structural changes made since the last call, oldest first.
    ///
    /// Stores that report their edits by other means (or never change) can
    /// keep the default.
    fn drain_changes(&mut self) -> Vec<StoreChange<Self::Item>> {
        Vec::new()
    }
}
