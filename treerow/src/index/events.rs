//! Change notifications raised by the tree index.
//!
//! Consumers implement [`TreeListener`] for the notifications they care
//! about and register it with [`TreeIndex::add_listener`]. Listeners run
//! synchronously inside the mutating call and never see the index itself,
//! so they cannot mutate it re-entrantly.
//!
//! [`TreeIndex::add_listener`]: crate::TreeIndex::add_listener

use std::cell::RefCell;
use std::rc::Rc;

use crate::store::ChangeKind;

/// A contiguous change of the visible rows.
///
/// For `Insert` the rows `start_row..start_row + count` are new; for
/// `Remove` the rows that were at `start_row..start_row + count` are gone.
/// For `Reset` the whole list was replaced and `count` is the new row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsChanged {
    pub kind: ChangeKind,
    pub start_row: usize,
    pub count: usize,
}

impl RowsChanged {
    pub fn insert(start_row: usize, count: usize) -> Self {
        Self {
            kind: ChangeKind::Insert,
            start_row,
            count,
        }
    }

    pub fn remove(start_row: usize, count: usize) -> Self {
        Self {
            kind: ChangeKind::Remove,
            start_row,
            count,
        }
    }

    pub fn reset(count: usize) -> Self {
        Self {
            kind: ChangeKind::Reset,
            start_row: 0,
            count,
        }
    }

    /// Row count after applying this change to a list of `before` rows.
    pub fn apply_to_count(&self, before: usize) -> usize {
        match self.kind {
            ChangeKind::Insert => before + self.count,
            ChangeKind::Remove => before.saturating_sub(self.count),
            ChangeKind::Reset => self.count,
        }
    }
}

/// Payload of the cancelable `Expanding`/`Collapsing` notifications.
///
/// Setting `cancel` aborts the operation; the index checks the flag only
/// after every listener ran, before anything is touched.
#[derive(Debug)]
pub struct ExpansionEvent<'a, I> {
    pub item: &'a I,
    pub row: usize,
    pub cancel: bool,
}

/// Receiver of tree index notifications.
///
/// # Default Implementations
///
/// All methods do nothing by default, so listeners only implement the
/// notifications they care about.
pub trait TreeListener<I> {
    /// A row is about to be expanded. Set `event.cancel` to veto.
    fn on_expanding(&mut self, _event: &mut ExpansionEvent<'_, I>) {}

    /// A row was expanded; its rows are already spliced in.
    fn on_expanded(&mut self, _item: &I, _row: usize) {}

    /// A row is about to be collapsed. Set `event.cancel` to veto.
    fn on_collapsing(&mut self, _event: &mut ExpansionEvent<'_, I>) {}

    /// A row was collapsed; its descendants are already removed.
    fn on_collapsed(&mut self, _item: &I, _row: usize) {}

    /// The visible rows changed.
    fn on_rows_changed(&mut self, _change: RowsChanged) {}
}

/// Shared listener state: the consumer keeps one handle, the index another.
impl<I, L: TreeListener<I>> TreeListener<I> for Rc<RefCell<L>> {
    fn on_expanding(&mut self, event: &mut ExpansionEvent<'_, I>) {
        self.borrow_mut().on_expanding(event);
    }

    fn on_expanded(&mut self, item: &I, row: usize) {
        self.borrow_mut().on_expanded(item, row);
    }

    fn on_collapsing(&mut self, event: &mut ExpansionEvent<'_, I>) {
        self.borrow_mut().on_collapsing(event);
    }

    fn on_collapsed(&mut self, item: &I, row: usize) {
        self.borrow_mut().on_collapsed(item, row);
    }

    fn on_rows_changed(&mut self, change: RowsChanged) {
        self.borrow_mut().on_rows_changed(change);
    }
}

/// Handle of a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

/// Registered listeners, in registration order.
pub(crate) struct Listeners<I> {
    entries: Vec<(ListenerId, Box<dyn TreeListener<I>>)>,
    next_id: usize,
}

impl<I> Default for Listeners<I> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<I> Listeners<I> {
    pub fn add(&mut self, listener: Box<dyn TreeListener<I>>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> Option<Box<dyn TreeListener<I>>> {
        let position = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.remove(position).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Raise `Expanding`; returns true if any listener canceled.
    pub fn expanding(&mut self, item: &I, row: usize) -> bool {
        let mut event = ExpansionEvent {
            item,
            row,
            cancel: false,
        };
        for (_, listener) in &mut self.entries {
            listener.on_expanding(&mut event);
        }
        event.cancel
    }

    pub fn expanded(&mut self, item: &I, row: usize) {
        for (_, listener) in &mut self.entries {
            listener.on_expanded(item, row);
        }
    }

    /// Raise `Collapsing`; returns true if any listener canceled.
    pub fn collapsing(&mut self, item: &I, row: usize) -> bool {
        let mut event = ExpansionEvent {
            item,
            row,
            cancel: false,
        };
        for (_, listener) in &mut self.entries {
            listener.on_collapsing(&mut event);
        }
        event.cancel
    }

    pub fn collapsed(&mut self, item: &I, row: usize) {
        for (_, listener) in &mut self.entries {
            listener.on_collapsed(item, row);
        }
    }

    pub fn rows_changed(&mut self, change: RowsChanged) {
        for (_, listener) in &mut self.entries {
            listener.on_rows_changed(change);
        }
    }
}

impl<I> std::fmt::Debug for Listeners<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
