//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;

use simplelog::{Config, LevelFilter, TestLogger};
use treerow::store::{MemoryStore, NodeId, StoreChange, TreeStore};
use treerow::{ExpansionEvent, RowsChanged, StoreError, TreeIndex, TreeListener};

/// Roots R0,R1,R2; R0 has C0,C1; C0 has G0.
pub const SCENARIO: &str = "
R0
  C0
    G0
  C1
R1
R2
";

pub fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

pub fn index_from_outline(outline: &str) -> TreeIndex<MemoryStore> {
    init_logging();
    let mut index = TreeIndex::new();
    index
        .initialize_items(MemoryStore::from_outline(outline))
        .unwrap();
    index
}

/// `(label, level)` of every visible row.
pub fn snapshot(index: &TreeIndex<MemoryStore>) -> Vec<(String, usize)> {
    let store = index.store().unwrap();
    index
        .rows()
        .iter()
        .map(|node| (store.label(*node.item()).unwrap().to_string(), node.level()))
        .collect()
}

/// Labels of every visible row.
pub fn labels(index: &TreeIndex<MemoryStore>) -> Vec<String> {
    snapshot(index).into_iter().map(|(label, _)| label).collect()
}

pub fn node(index: &TreeIndex<MemoryStore>, label: &str) -> NodeId {
    index.store().unwrap().find(label).unwrap()
}

// ============================================================================
// Listener
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Expanding(NodeId, usize),
    Expanded(NodeId, usize),
    Collapsing(NodeId, usize),
    Collapsed(NodeId, usize),
    Rows(RowsChanged),
}

/// Records every notification and optionally vetoes expansion changes.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
    pub cancel_expanding: bool,
    pub cancel_collapsing: bool,
}

impl Recorder {
    pub fn rows_changed(&self) -> Vec<RowsChanged> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Rows(change) => Some(*change),
                _ => None,
            })
            .collect()
    }
}

impl TreeListener<NodeId> for Recorder {
    fn on_expanding(&mut self, event: &mut ExpansionEvent<'_, NodeId>) {
        self.events.push(Event::Expanding(*event.item, event.row));
        if self.cancel_expanding {
            event.cancel = true;
        }
    }

    fn on_expanded(&mut self, item: &NodeId, row: usize) {
        self.events.push(Event::Expanded(*item, row));
    }

    fn on_collapsing(&mut self, event: &mut ExpansionEvent<'_, NodeId>) {
        self.events.push(Event::Collapsing(*event.item, event.row));
        if self.cancel_collapsing {
            event.cancel = true;
        }
    }

    fn on_collapsed(&mut self, item: &NodeId, row: usize) {
        self.events.push(Event::Collapsed(*item, row));
    }

    fn on_rows_changed(&mut self, change: RowsChanged) {
        self.events.push(Event::Rows(change));
    }
}

// ============================================================================
// Store wrapper
// ============================================================================

/// A `MemoryStore` that records which child lists were queried and can fail
/// on demand.
#[derive(Debug, Default)]
pub struct ProbeStore {
    pub inner: MemoryStore,
    pub fail_under: Option<NodeId>,
    pub queried: RefCell<Vec<Option<NodeId>>>,
}

impl ProbeStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            ..Default::default()
        }
    }

    fn check(&self, parent: Option<&NodeId>) -> Result<(), StoreError> {
        if parent.is_some() && parent.copied() == self.fail_under {
            return Err(StoreError::Other("backend unavailable".to_string()));
        }
        Ok(())
    }
}

impl TreeStore for ProbeStore {
    type Item = NodeId;

    fn child_count(&self, parent: Option<&NodeId>) -> Result<usize, StoreError> {
        self.queried.borrow_mut().push(parent.copied());
        self.check(parent)?;
        self.inner.child_count(parent)
    }

    fn child_at(&self, parent: Option<&NodeId>, index: usize) -> Result<NodeId, StoreError> {
        self.check(parent)?;
        self.inner.child_at(parent, index)
    }

    fn is_expandable(&self, item: &NodeId) -> bool {
        self.inner.is_expandable(item)
    }

    fn is_expanded(&self, item: &NodeId) -> bool {
        self.inner.is_expanded(item)
    }

    fn set_expanded(&mut self, item: &NodeId, expanded: bool) {
        self.inner.set_expanded(item, expanded);
    }

    fn drain_changes(&mut self) -> Vec<StoreChange<NodeId>> {
        self.inner.drain_changes()
    }
}

/// Pre-order traversal of the store restricted to open nodes.
pub fn reference_rows<S: TreeStore>(store: &S) -> Vec<(S::Item, usize)> {
    fn walk<S: TreeStore>(
        store: &S,
        parent: Option<&S::Item>,
        level: usize,
        out: &mut Vec<(S::Item, usize)>,
    ) {
        let count = store.child_count(parent).unwrap();
        for index in 0..count {
            let child = store.child_at(parent, index).unwrap();
            out.push((child.clone(), level));
            if store.is_expandable(&child) && store.is_expanded(&child) {
                walk(store, Some(&child), level + 1, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(store, None, 0, &mut out);
    out
}

pub fn index_rows<S: TreeStore>(index: &TreeIndex<S>) -> Vec<(S::Item, usize)> {
    index
        .rows()
        .iter()
        .map(|node| (node.item().clone(), node.level()))
        .collect()
}
