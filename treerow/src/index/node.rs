//! Flat node records.

/// One visible row of the flattened tree.
///
/// The parent is referenced by row, never by object: rows move on every
/// splice, and the index re-bases `parent_row` whenever they do.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatNode<I> {
    pub(crate) item: I,
    pub(crate) level: usize,
    pub(crate) parent_row: Option<usize>,
    pub(crate) sibling_index: usize,
    pub(crate) sibling_count: usize,
}

impl<I> FlatNode<I> {
    pub(crate) fn new(
        item: I,
        level: usize,
        parent_row: Option<usize>,
        sibling_index: usize,
        sibling_count: usize,
    ) -> Self {
        Self {
            item,
            level,
            parent_row,
            sibling_index,
            sibling_count,
        }
    }

    /// The store item shown on this row.
    pub fn item(&self) -> &I {
        &self.item
    }

    /// Depth in tree (0 = root).
    pub fn level(&self) -> usize {
        self.level
    }

    /// Row of the parent node, `None` for roots.
    pub fn parent_row(&self) -> Option<usize> {
        self.parent_row
    }

    /// Position among the children of the same parent.
    pub fn sibling_index(&self) -> usize {
        self.sibling_index
    }

    /// Number of children of the parent (including this one).
    pub fn sibling_count(&self) -> usize {
        self.sibling_count
    }

    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    pub fn is_first_node(&self) -> bool {
        self.sibling_index == 0
    }

    pub fn is_last_node(&self) -> bool {
        self.sibling_index + 1 >= self.sibling_count
    }

    /// Shift the parent reference after rows at or past `from` moved by
    /// `delta`.
    pub(crate) fn rebase_parent(&mut self, from: usize, delta: isize) {
        if let Some(parent) = self.parent_row
            && parent >= from
        {
            self.parent_row = Some(parent.saturating_add_signed(delta));
        }
    }
}
