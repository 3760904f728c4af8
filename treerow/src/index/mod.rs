//! The tree index: a flat, row-addressable view over a lazily enumerated
//! forest.
//!
//! The index keeps one [`FlatNode`] per visible row, in pre-order. A node's
//! subtree is present iff the node is expandable and its persisted
//! `Expanded` flag is set, and a subtree always occupies the rows directly
//! below its node. Expanding and collapsing splice contiguous slices instead
//! of re-walking the store.
//!
//! # Example
//!
//! ```
//! use treerow::store::MemoryStore;
//! use treerow::TreeIndex;
//!
//! let store = MemoryStore::from_outline(
//!     "
//!     R0
//!       C0
//!         G0
//!       C1
//!     R1
//!     ",
//! );
//! let mut index = TreeIndex::new();
//! index.initialize_items(store).unwrap();
//! assert_eq!(index.count(), 2);
//!
//! assert!(index.expand_row(0).unwrap());
//! assert_eq!(index.count(), 4);
//! assert_eq!(index.level_at_row(1).unwrap(), 1);
//!
//! assert!(index.collapse_row(0));
//! assert_eq!(index.count(), 2);
//! ```

mod events;
mod guides;
mod node;

pub use events::{ExpansionEvent, ListenerId, RowsChanged, TreeListener};
pub use guides::{Guide, GuideStyle, render_guides};
pub use node::FlatNode;

use std::collections::HashMap;
use std::ops::Range;

use crate::config::{CollapsePolicy, IndexConfig};
use crate::error::{StoreError, TreeError, TreeResult};
use crate::store::{ChangeKind, StoreChange, TreeStore};

use events::Listeners;

/// Whether the item's subtree belongs in the flat list.
fn is_open<S: TreeStore>(store: &S, item: &S::Item) -> bool {
    store.is_expandable(item) && store.is_expanded(item)
}

/// Accumulates a slice of rows pulled from the store.
///
/// Rows are numbered as they will be once the slice is spliced in at
/// `base_row`, so parent references inside the slice need no re-basing.
struct SliceBuilder<'a, S: TreeStore> {
    store: &'a S,
    base_row: usize,
    rows: Vec<FlatNode<S::Item>>,
}

impl<'a, S: TreeStore> SliceBuilder<'a, S> {
    fn new(store: &'a S, base_row: usize) -> Self {
        Self {
            store,
            base_row,
            rows: Vec::new(),
        }
    }

    /// Append the children `indices` of `parent`, descending into every
    /// child that is itself open.
    fn children(
        &mut self,
        parent: Option<&S::Item>,
        indices: Range<usize>,
        sibling_count: usize,
        level: usize,
        parent_row: Option<usize>,
    ) -> Result<(), StoreError> {
        for index in indices {
            let child = self.store.child_at(parent, index)?;
            let row = self.base_row + self.rows.len();
            let open = is_open(self.store, &child);
            log::trace!("TreeIndex: row {row} <- {child:?} (level {level}, open {open})");
            self.rows.push(FlatNode::new(
                child.clone(),
                level,
                parent_row,
                index,
                sibling_count,
            ));
            if open {
                let count = self.store.child_count(Some(&child))?;
                self.children(Some(&child), 0..count, count, level + 1, Some(row))?;
            }
        }
        Ok(())
    }

    fn finish(self) -> Vec<FlatNode<S::Item>> {
        self.rows
    }
}

/// Walks the ancestor rows of a row, nearest first.
#[derive(Debug, Clone)]
pub struct Ancestors<'a, I> {
    rows: &'a [FlatNode<I>],
    next: Option<usize>,
}

impl<I> Iterator for Ancestors<'_, I> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let row = self.next?;
        self.next = self.rows.get(row).and_then(|n| n.parent_row);
        Some(row)
    }
}

/// Flat row index over a [`TreeStore`].
///
/// `TreeIndex` is the only owner of the visible rows. Readers go through
/// the row accessors; the rows change only through [`expand_row`],
/// [`collapse_row`], store change notifications and store replacement.
/// Each change is announced to the registered [`TreeListener`]s.
///
/// [`expand_row`]: TreeIndex::expand_row
/// [`collapse_row`]: TreeIndex::collapse_row
#[derive(Debug)]
pub struct TreeIndex<S: TreeStore> {
    store: Option<S>,
    rows: Vec<FlatNode<S::Item>>,
    listeners: Listeners<S::Item>,
    config: IndexConfig,
}

impl<S: TreeStore> TreeIndex<S> {
    /// Create an index with no store attached.
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    /// Create an index with the given configuration.
    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            store: None,
            rows: Vec::new(),
            listeners: Listeners::default(),
            config,
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Store attachment
    // -------------------------------------------------------------------------

    /// Attach `store` and build the rows from scratch.
    ///
    /// Every root is listed, plus the subtree of every open node reachable
    /// through open nodes; collapsed children are never queried. Raises a
    /// single `Reset`, no expansion notifications. Changes the store queued
    /// before attachment are dropped, since the build already reflects them.
    ///
    /// On a store fault the store stays attached, the rows are empty and the
    /// error is returned; [`refresh`](Self::refresh) retries.
    pub fn initialize_items(&mut self, store: S) -> TreeResult<()> {
        self.store = Some(store);
        self.rebuild()
    }

    /// Rebuild the rows from the attached store.
    pub fn refresh(&mut self) -> TreeResult<()> {
        self.rebuild()
    }

    /// Detach the store, clearing the rows.
    pub fn take_store(&mut self) -> Option<S> {
        let store = self.store.take();
        if store.is_some() {
            self.rows.clear();
            log::debug!("TreeIndex: store detached");
            self.listeners.rows_changed(RowsChanged::reset(0));
        }
        store
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    /// Mutable access to the attached store.
    ///
    /// Structural edits must be reported back, either through the store's
    /// [`drain_changes`](TreeStore::drain_changes) and [`sync`](Self::sync),
    /// or through [`apply_store_change`](Self::apply_store_change). Writing
    /// `Expanded` flags of visible rows here bypasses the index; use
    /// [`expand_row`](Self::expand_row)/[`collapse_row`](Self::collapse_row)
    /// instead.
    pub fn store_mut(&mut self) -> Option<&mut S> {
        self.store.as_mut()
    }

    fn rebuild(&mut self) -> TreeResult<()> {
        let result = match self.store.as_mut() {
            Some(store) => {
                store.drain_changes();
                let store = &*store;
                store.child_count(None).and_then(|count| {
                    let mut builder = SliceBuilder::new(store, 0);
                    builder.children(None, 0..count, count, 0, None)?;
                    Ok(builder.finish())
                })
            }
            None => Ok(Vec::new()),
        };

        let result = match result {
            Ok(rows) => {
                self.rows = rows;
                Ok(())
            }
            Err(e) => {
                log::warn!("TreeIndex: rebuild failed: {e}");
                self.rows.clear();
                Err(e.into())
            }
        };

        log::debug!("TreeIndex: rebuilt {} rows", self.rows.len());
        self.listeners.rows_changed(RowsChanged::reset(self.rows.len()));
        self.after_mutation();
        result
    }

    // -------------------------------------------------------------------------
    // Row access
    // -------------------------------------------------------------------------

    /// Number of visible rows.
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The record of a visible row.
    pub fn node_at_row(&self, row: usize) -> TreeResult<&FlatNode<S::Item>> {
        self.rows.get(row).ok_or(TreeError::InvalidIndex {
            row,
            count: self.rows.len(),
        })
    }

    /// The store item shown on a row.
    pub fn item_at_row(&self, row: usize) -> TreeResult<&S::Item> {
        self.node_at_row(row).map(FlatNode::item)
    }

    pub fn level_at_row(&self, row: usize) -> TreeResult<usize> {
        self.node_at_row(row).map(FlatNode::level)
    }

    /// The persisted `Expanded` flag of the row's item; false for items that
    /// are not expandable.
    pub fn is_expanded_at_row(&self, row: usize) -> TreeResult<bool> {
        let node = self.node_at_row(row)?;
        Ok(self
            .store
            .as_ref()
            .is_some_and(|store| is_open(store, &node.item)))
    }

    /// All visible rows in order.
    pub fn rows(&self) -> &[FlatNode<S::Item>] {
        &self.rows
    }

    /// The visible rows within `range`, clamped to the row count.
    pub fn rows_in(&self, range: Range<usize>) -> &[FlatNode<S::Item>] {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        &self.rows[start..end]
    }

    /// First visible row holding `item`.
    pub fn row_of(&self, item: &S::Item) -> Option<usize> {
        self.rows.iter().position(|node| node.item == *item)
    }

    /// Row of the parent of `row`, `None` for roots.
    pub fn parent_row(&self, row: usize) -> TreeResult<Option<usize>> {
        self.node_at_row(row).map(FlatNode::parent_row)
    }

    /// Ancestor rows of `row`, parent first.
    pub fn ancestors(&self, row: usize) -> TreeResult<Ancestors<'_, S::Item>> {
        let node = self.node_at_row(row)?;
        Ok(Ancestors {
            rows: &self.rows,
            next: node.parent_row,
        })
    }

    /// Number of visible descendants of `row`.
    pub fn subtree_len(&self, row: usize) -> TreeResult<usize> {
        self.node_at_row(row)?;
        Ok(self.subtree_end(row) - row - 1)
    }

    /// Connector guides for the indentation of `row`.
    ///
    /// One entry per level below the roots: `Vertical`/`Blank` for each
    /// non-root ancestor, outermost first, then `Branch`/`Last` for the row.
    pub fn guides(&self, row: usize) -> TreeResult<Vec<Guide>> {
        let node = self.node_at_row(row)?;
        if node.is_root() {
            return Ok(Vec::new());
        }

        let mut guides = Vec::with_capacity(node.level);
        guides.push(if node.is_last_node() {
            Guide::Last
        } else {
            Guide::Branch
        });
        for ancestor in self.ancestors(row)? {
            let ancestor = &self.rows[ancestor];
            if ancestor.is_root() {
                break;
            }
            guides.push(if ancestor.is_last_node() {
                Guide::Blank
            } else {
                Guide::Vertical
            });
        }
        guides.reverse();
        Ok(guides)
    }

    /// Row just past the visible subtree of `row`.
    fn subtree_end(&self, row: usize) -> usize {
        let level = self.rows[row].level;
        let mut end = row + 1;
        while end < self.rows.len() && self.rows[end].level > level {
            end += 1;
        }
        end
    }

    /// Rows of the direct children of `parent_row` (`None` = roots) and the
    /// row just past the parent's subtree.
    fn child_rows(&self, parent_row: Option<usize>) -> (Vec<usize>, usize) {
        let (start, end, level) = match parent_row {
            Some(row) => (row + 1, self.subtree_end(row), self.rows[row].level + 1),
            None => (0, self.rows.len(), 0),
        };
        let children = (start..end)
            .filter(|&r| self.rows[r].level == level)
            .collect();
        (children, end)
    }

    // -------------------------------------------------------------------------
    // Expand/Collapse
    // -------------------------------------------------------------------------

    /// Expand a row.
    ///
    /// Returns `Ok(false)` without touching anything when the row is out of
    /// range, not expandable, already expanded, or a listener canceled
    /// `Expanding`. Children whose own `Expanded` flag is set are expanded in
    /// the same call, so a previously open subtree comes back whole.
    ///
    /// A store fault while pulling children is returned as is; the slice is
    /// spliced only after all children resolved, so the rows and the flag
    /// are unchanged in that case.
    pub fn expand_row(&mut self, row: usize) -> TreeResult<bool> {
        let (Some(node), Some(store)) = (self.rows.get(row), self.store.as_ref()) else {
            return Ok(false);
        };
        if !store.is_expandable(&node.item) || store.is_expanded(&node.item) {
            return Ok(false);
        }
        let item = node.item.clone();
        let level = node.level;

        if self.listeners.expanding(&item, row) {
            log::debug!("TreeIndex: expanding row {row} canceled");
            return Ok(false);
        }

        // Listeners cannot reach the store, so this is the same store.
        let Some(store) = self.store.as_ref() else {
            return Ok(false);
        };
        let count = store.child_count(Some(&item))?;
        let mut builder = SliceBuilder::new(store, row + 1);
        builder.children(Some(&item), 0..count, count, level + 1, Some(row))?;
        let slice = builder.finish();
        let inserted = slice.len();

        self.splice_insert(row + 1, slice);
        if let Some(store) = self.store.as_mut() {
            store.set_expanded(&item, true);
        }
        log::debug!("TreeIndex: expanded row {row} ({inserted} rows)");

        self.listeners.expanded(&item, row);
        self.listeners.rows_changed(RowsChanged::insert(row + 1, inserted));
        self.after_mutation();
        Ok(true)
    }

    /// Collapse a row.
    ///
    /// Returns false without touching anything when the row is out of range,
    /// not expandable, already collapsed, or a listener canceled
    /// `Collapsing`. Under [`CollapsePolicy::PreserveDescendants`] the hidden
    /// descendants keep their own `Expanded` flags.
    pub fn collapse_row(&mut self, row: usize) -> bool {
        let (Some(node), Some(store)) = (self.rows.get(row), self.store.as_ref()) else {
            return false;
        };
        if !is_open(store, &node.item) {
            return false;
        }
        let item = node.item.clone();

        if self.listeners.collapsing(&item, row) {
            log::debug!("TreeIndex: collapsing row {row} canceled");
            return false;
        }

        let end = self.subtree_end(row);
        let removed = self.splice_remove(row + 1..end);
        if let Some(store) = self.store.as_mut() {
            store.set_expanded(&item, false);
            if self.config.collapse_policy == CollapsePolicy::ResetDescendants {
                for node in &removed {
                    if store.is_expanded(&node.item) {
                        store.set_expanded(&node.item, false);
                    }
                }
            }
        }
        log::debug!("TreeIndex: collapsed row {row} ({} rows)", removed.len());

        self.listeners.collapsed(&item, row);
        self.listeners
            .rows_changed(RowsChanged::remove(row + 1, removed.len()));
        self.after_mutation();
        true
    }

    /// Expand a collapsed row or collapse an expanded one.
    pub fn toggle_row(&mut self, row: usize) -> TreeResult<bool> {
        if self.is_expanded_at_row(row)? {
            Ok(self.collapse_row(row))
        } else {
            self.expand_row(row)
        }
    }

    /// Expand every expandable row, top-down, including rows that appear
    /// along the way. Returns the number of rows expanded.
    ///
    /// Does not terminate on an infinite store.
    pub fn expand_all(&mut self) -> TreeResult<usize> {
        let mut expanded = 0;
        let mut row = 0;
        while row < self.rows.len() {
            if self.expand_row(row)? {
                expanded += 1;
            }
            row += 1;
        }
        Ok(expanded)
    }

    /// Collapse every visible expanded row, bottom-up. Returns the number of
    /// rows collapsed.
    pub fn collapse_all(&mut self) -> usize {
        let mut collapsed = 0;
        for row in (0..self.rows.len()).rev() {
            if self.collapse_row(row) {
                collapsed += 1;
            }
        }
        collapsed
    }

    // -------------------------------------------------------------------------
    // Splicing
    // -------------------------------------------------------------------------

    fn splice_insert(&mut self, at: usize, slice: Vec<FlatNode<S::Item>>) {
        let len = slice.len();
        if len == 0 {
            return;
        }
        self.rows.splice(at..at, slice);
        for node in &mut self.rows[at + len..] {
            node.rebase_parent(at, len as isize);
        }
    }

    /// Remove whole subtrees occupying `range`.
    fn splice_remove(&mut self, range: Range<usize>) -> Vec<FlatNode<S::Item>> {
        let Range { start, end } = range;
        let removed: Vec<_> = self.rows.drain(start..end).collect();
        for node in &mut self.rows[start..] {
            node.rebase_parent(end, -(removed.len() as isize));
        }
        removed
    }

    fn renumber_siblings(&mut self, parent_row: Option<usize>) {
        let (children, _) = self.child_rows(parent_row);
        let count = children.len();
        for (index, row) in children.into_iter().enumerate() {
            let node = &mut self.rows[row];
            node.sibling_index = index;
            node.sibling_count = count;
        }
    }

    // -------------------------------------------------------------------------
    // Store notifications
    // -------------------------------------------------------------------------

    /// Pull the store's queued changes and apply them in order.
    ///
    /// A root-level reset among them turns the whole batch into one rebuild.
    /// If a change cannot be applied because later changes in the batch
    /// already moved the store on, the rows are rebuilt. Returns the number
    /// of changes consumed.
    pub fn sync(&mut self) -> TreeResult<usize> {
        let Some(store) = self.store.as_mut() else {
            return Ok(0);
        };
        let changes = store.drain_changes();
        let consumed = changes.len();
        if consumed == 0 {
            return Ok(0);
        }

        if changes
            .iter()
            .any(|c| c.parent.is_none() && c.kind == ChangeKind::Reset)
        {
            self.rebuild()?;
            return Ok(consumed);
        }

        for change in changes {
            if let Err(e) = self.apply_store_change(change) {
                log::warn!("TreeIndex: store change failed ({e}), rebuilding");
                self.rebuild()?;
                break;
            }
        }
        Ok(consumed)
    }

    /// Apply one structural change reported by the store.
    ///
    /// Only the affected sibling group (or subtree, for a reset) is
    /// re-queried. Changes under a node that is not visible, or visible but
    /// collapsed, are absorbed: the store is asked again when the node is
    /// next expanded.
    pub fn apply_store_change(&mut self, change: StoreChange<S::Item>) -> TreeResult<()> {
        let Some(store) = self.store.as_ref() else {
            return Ok(());
        };

        let parent_row = match &change.parent {
            None => None,
            Some(item) => {
                let Some(row) = self.row_of(item) else {
                    log::debug!("TreeIndex: absorbed {:?} under hidden {item:?}", change.kind);
                    return Ok(());
                };
                let shown = self.subtree_end(row) > row + 1;
                if !shown && !is_open(store, item) {
                    log::debug!("TreeIndex: absorbed {:?} under collapsed row {row}", change.kind);
                    return Ok(());
                }
                Some(row)
            }
        };

        match change.kind {
            ChangeKind::Reset => self.reset_children(parent_row),
            ChangeKind::Insert => self.insert_children(parent_row, change.start, change.count),
            ChangeKind::Remove => self.remove_children(parent_row, change.start, change.count),
        }
    }

    fn insert_children(
        &mut self,
        parent_row: Option<usize>,
        start: usize,
        count: usize,
    ) -> TreeResult<()> {
        if count == 0 {
            return Ok(());
        }
        let Some(store) = self.store.as_ref() else {
            return Ok(());
        };
        let parent = parent_row.map(|row| self.rows[row].item.clone());
        if let Some(item) = &parent
            && !is_open(store, item)
        {
            return self.reset_children(parent_row);
        }

        let (children, end) = self.child_rows(parent_row);
        let total = store.child_count(parent.as_ref())?;
        if start > children.len() || children.len() + count != total {
            log::warn!(
                "TreeIndex: insert {start}+{count} does not match {} visible of {total} children, resetting",
                children.len()
            );
            return self.reset_children(parent_row);
        }

        let at = children.get(start).copied().unwrap_or(end);
        let level = parent_row.map_or(0, |row| self.rows[row].level + 1);
        let mut builder = SliceBuilder::new(store, at);
        builder.children(parent.as_ref(), start..start + count, total, level, parent_row)?;
        let slice = builder.finish();
        let inserted = slice.len();

        self.splice_insert(at, slice);
        self.renumber_siblings(parent_row);
        log::debug!("TreeIndex: store inserted {inserted} rows at {at}");
        self.listeners.rows_changed(RowsChanged::insert(at, inserted));
        self.after_mutation();
        Ok(())
    }

    fn remove_children(
        &mut self,
        parent_row: Option<usize>,
        start: usize,
        count: usize,
    ) -> TreeResult<()> {
        if count == 0 {
            return Ok(());
        }
        let Some(store) = self.store.as_ref() else {
            return Ok(());
        };
        let parent = parent_row.map(|row| self.rows[row].item.clone());
        if let Some(item) = &parent
            && !is_open(store, item)
        {
            return self.reset_children(parent_row);
        }

        let (children, end) = self.child_rows(parent_row);
        let total = store.child_count(parent.as_ref())?;
        if start + count > children.len() || children.len() - count != total {
            log::warn!(
                "TreeIndex: remove {start}+{count} does not match {} visible of {total} children, resetting",
                children.len()
            );
            return self.reset_children(parent_row);
        }

        let from = children[start];
        let to = children.get(start + count).copied().unwrap_or(end);
        self.splice_remove(from..to);
        self.renumber_siblings(parent_row);
        log::debug!("TreeIndex: store removed {} rows at {from}", to - from);
        self.listeners.rows_changed(RowsChanged::remove(from, to - from));
        self.after_mutation();
        Ok(())
    }

    /// Replace the visible subtree of `parent_row` with a fresh pull from the
    /// store. At root level this is a full rebuild.
    fn reset_children(&mut self, parent_row: Option<usize>) -> TreeResult<()> {
        let Some(row) = parent_row else {
            return self.rebuild();
        };
        let Some(store) = self.store.as_ref() else {
            return Ok(());
        };

        let item = self.rows[row].item.clone();
        let level = self.rows[row].level + 1;
        let total = if is_open(store, &item) {
            store.child_count(Some(&item))?
        } else {
            0
        };
        let mut builder = SliceBuilder::new(store, row + 1);
        builder.children(Some(&item), 0..total, total, level, Some(row))?;
        let slice = builder.finish();

        let end = self.subtree_end(row);
        let removed = self.splice_remove(row + 1..end).len();
        let inserted = slice.len();
        self.splice_insert(row + 1, slice);
        log::debug!("TreeIndex: reset row {row} subtree ({removed} -> {inserted} rows)");

        if removed > 0 {
            self.listeners.rows_changed(RowsChanged::remove(row + 1, removed));
        }
        if inserted > 0 {
            self.listeners.rows_changed(RowsChanged::insert(row + 1, inserted));
        }
        self.after_mutation();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Register a listener; notifications are delivered in registration
    /// order.
    pub fn add_listener(&mut self, listener: impl TreeListener<S::Item> + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    /// Unregister a listener, handing it back.
    pub fn remove_listener(&mut self, id: ListenerId) -> Option<Box<dyn TreeListener<S::Item>>> {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Check the rows against their structural invariants and the store.
    ///
    /// Verifies that levels only deepen one step at a time, that every
    /// `parent_row` names the nearest preceding shallower row, that sibling
    /// numbering is dense, and that exactly the open rows show children, as
    /// many as the store reports.
    pub fn validate(&self) -> TreeResult<()> {
        let fail = |row: usize, reason: String| Err(TreeError::Inconsistent { row, reason });

        let mut open_ancestors: Vec<usize> = Vec::new();
        let mut seen_children: HashMap<Option<usize>, usize> = HashMap::new();

        for (row, node) in self.rows.iter().enumerate() {
            if node.level > open_ancestors.len() {
                return fail(row, format!("level {} jumps past its parent", node.level));
            }
            open_ancestors.truncate(node.level);
            let expected_parent = open_ancestors.last().copied();
            if node.parent_row != expected_parent {
                return fail(
                    row,
                    format!(
                        "parent row {:?}, expected {expected_parent:?}",
                        node.parent_row
                    ),
                );
            }
            open_ancestors.push(row);

            let seen = seen_children.entry(node.parent_row).or_insert(0);
            if node.sibling_index != *seen {
                return fail(
                    row,
                    format!("sibling index {}, expected {seen}", node.sibling_index),
                );
            }
            *seen += 1;
        }

        for (row, node) in self.rows.iter().enumerate() {
            let count = seen_children.get(&node.parent_row).copied().unwrap_or(0);
            if node.sibling_count != count {
                return fail(
                    row,
                    format!("sibling count {}, expected {count}", node.sibling_count),
                );
            }
        }

        let Some(store) = self.store.as_ref() else {
            if self.rows.is_empty() {
                return Ok(());
            }
            return fail(0, "rows without a store".to_string());
        };

        let roots = seen_children.get(&None).copied().unwrap_or(0);
        if let Ok(expected) = store.child_count(None)
            && roots != expected
        {
            return fail(0, format!("{roots} roots shown, store has {expected}"));
        }

        for (row, node) in self.rows.iter().enumerate() {
            let shown = seen_children.get(&Some(row)).copied().unwrap_or(0);
            if is_open(store, &node.item) {
                if let Ok(expected) = store.child_count(Some(&node.item))
                    && shown != expected
                {
                    return fail(row, format!("{shown} children shown, store has {expected}"));
                }
            } else if shown > 0 {
                return fail(row, format!("collapsed row shows {shown} children"));
            }
        }

        Ok(())
    }

    fn after_mutation(&self) {
        if self.config.validate_after_mutation
            && let Err(e) = self.validate()
        {
            log::error!("TreeIndex: {e}");
        }
    }
}

impl<S: TreeStore> Default for TreeIndex<S> {
    fn default() -> Self {
        Self::new()
    }
}
