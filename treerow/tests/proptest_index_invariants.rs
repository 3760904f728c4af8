//! Property-based invariant tests for the tree index.
//!
//! These tests verify structural invariants that must hold for any forest
//! and any sequence of operations:
//!
//! 1. The initial rows equal a naive pre-order walk of the open nodes.
//! 2. Expanding then collapsing a row restores the exact rows.
//! 3. A row's level equals the number of its ancestors in the store.
//! 4. Collapsing a row removes exactly its visible subtree.
//! 5. A canceled expand or collapse changes nothing.
//! 6. Arbitrary operation and store edit sequences keep the rows equal to
//!    the naive walk, and the rows valid.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::*;
use proptest::prelude::*;
use treerow::store::{MemoryStore, NodeId, TreeStore};
use treerow::{CollapsePolicy, IndexConfig, TreeIndex};

// ── Helpers ─────────────────────────────────────────────────────────────

/// Each entry creates one node: the first value picks its parent among the
/// nodes created before it (or none), the second sets its `Expanded` flag.
fn forest(max_nodes: usize) -> impl Strategy<Value = Vec<(usize, bool)>> {
    proptest::collection::vec((any::<usize>(), any::<bool>()), 1..=max_nodes)
}

fn build_store(spec: &[(usize, bool)]) -> MemoryStore {
    let mut store = MemoryStore::new();
    let mut ids: Vec<NodeId> = Vec::new();
    for (i, &(pick, expanded)) in spec.iter().enumerate() {
        let choice = pick % (i + 1);
        let id = if choice == i {
            store.add_root(format!("n{i}"))
        } else {
            store.add_child(ids[choice], format!("n{i}")).unwrap()
        };
        store.set_expanded(&id, expanded);
        ids.push(id);
    }
    store
}

fn build_index(spec: &[(usize, bool)], config: IndexConfig) -> TreeIndex<MemoryStore> {
    let mut index = TreeIndex::with_config(config);
    index.initialize_items(build_store(spec)).unwrap();
    index
}

fn live_nodes(store: &MemoryStore) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut pending: Vec<NodeId> = store.children(None).to_vec();
    while let Some(id) = pending.pop() {
        out.push(id);
        pending.extend_from_slice(store.children(Some(id)));
    }
    out.sort();
    out
}

fn depth(store: &MemoryStore, mut id: NodeId) -> usize {
    let mut depth = 0;
    while let Some(parent) = store.parent(id) {
        depth += 1;
        id = parent;
    }
    depth
}

#[derive(Debug, Clone)]
enum Op {
    Expand(usize),
    Collapse(usize),
    Toggle(usize),
    ExpandAll,
    CollapseAll,
    AddChild(usize),
    AddRoot,
    Remove(usize),
    SetExpandable(usize, Option<bool>),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<usize>().prop_map(Op::Expand),
        any::<usize>().prop_map(Op::Collapse),
        any::<usize>().prop_map(Op::Toggle),
        Just(Op::ExpandAll),
        Just(Op::CollapseAll),
        any::<usize>().prop_map(Op::AddChild),
        Just(Op::AddRoot),
        any::<usize>().prop_map(Op::Remove),
        (any::<usize>(), any::<Option<bool>>()).prop_map(|(pick, e)| Op::SetExpandable(pick, e)),
    ]
}

fn apply(index: &mut TreeIndex<MemoryStore>, op: &Op) {
    let count = index.count().max(1);
    match *op {
        Op::Expand(row) => {
            index.expand_row(row % count).unwrap();
        }
        Op::Collapse(row) => {
            index.collapse_row(row % count);
        }
        Op::Toggle(row) => {
            if !index.is_empty() {
                index.toggle_row(row % count).unwrap();
            }
        }
        Op::ExpandAll => {
            index.expand_all().unwrap();
        }
        Op::CollapseAll => {
            index.collapse_all();
        }
        Op::AddChild(pick) => {
            let store = index.store_mut().unwrap();
            let nodes = live_nodes(store);
            if let Some(&parent) = nodes.get(pick % nodes.len().max(1)) {
                store.add_child(parent, "added").unwrap();
            }
            index.sync().unwrap();
        }
        Op::AddRoot => {
            index.store_mut().unwrap().add_root("root");
            index.sync().unwrap();
        }
        Op::Remove(pick) => {
            let store = index.store_mut().unwrap();
            let nodes = live_nodes(store);
            if let Some(&id) = nodes.get(pick % nodes.len().max(1)) {
                store.remove(id).unwrap();
            }
            index.sync().unwrap();
        }
        Op::SetExpandable(pick, expandable) => {
            let store = index.store_mut().unwrap();
            let nodes = live_nodes(store);
            if let Some(&id) = nodes.get(pick % nodes.len().max(1)) {
                store.set_expandable(id, expandable).unwrap();
            }
            index.sync().unwrap();
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Initial rows match the naive walk
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn initial_rows_match_walk(spec in forest(40)) {
        let index = build_index(&spec, IndexConfig::default());
        prop_assert_eq!(index_rows(&index), reference_rows(index.store().unwrap()));
        prop_assert!(index.validate().is_ok());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Expand then collapse round-trips
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn expand_collapse_round_trip(spec in forest(40), pick in any::<usize>()) {
        let mut index = build_index(&spec, IndexConfig::default());
        let row = pick % index.count().max(1);
        let before = index.rows().to_vec();

        if index.expand_row(row).unwrap() {
            prop_assert!(index.collapse_row(row));
        }
        prop_assert_eq!(index.rows(), &before[..]);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Levels equal store depth
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn level_equals_store_depth(spec in forest(40)) {
        let mut index = build_index(&spec, IndexConfig::default());
        index.expand_all().unwrap();
        let store = index.store().unwrap();
        for (row, node) in index.rows().iter().enumerate() {
            prop_assert_eq!(
                node.level(), depth(store, *node.item()),
                "row {} holds {}", row, node.item()
            );
            prop_assert_eq!(index.ancestors(row).unwrap().count(), node.level());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Collapse removes the visible subtree
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn collapse_removes_subtree(spec in forest(40), pick in any::<usize>()) {
        let mut index = build_index(&spec, IndexConfig::default());
        index.expand_all().unwrap();
        let row = pick % index.count();
        let before = index.count();
        let subtree = index.subtree_len(row).unwrap();

        if index.collapse_row(row) {
            prop_assert_eq!(index.count(), before - subtree);
        } else {
            prop_assert_eq!(subtree, 0);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Canceled requests are no-ops
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn canceled_request_is_noop(spec in forest(40), pick in any::<usize>()) {
        let mut index = build_index(&spec, IndexConfig::default());
        let recorder = Rc::new(RefCell::new(Recorder {
            cancel_expanding: true,
            cancel_collapsing: true,
            ..Default::default()
        }));
        index.add_listener(recorder.clone());

        let row = pick % index.count();
        let item = *index.item_at_row(row).unwrap();
        let flag = index.store().unwrap().is_expanded(&item);
        let before = index.rows().to_vec();

        prop_assert!(!index.toggle_row(row).unwrap());
        prop_assert_eq!(index.rows(), &before[..]);
        prop_assert_eq!(index.store().unwrap().is_expanded(&item), flag);
        prop_assert!(recorder.borrow().rows_changed().is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Operation sequences keep the rows exact
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn operations_match_walk(
        spec in forest(30),
        ops in proptest::collection::vec(op(), 0..30),
        reset_descendants in any::<bool>(),
    ) {
        let policy = if reset_descendants {
            CollapsePolicy::ResetDescendants
        } else {
            CollapsePolicy::PreserveDescendants
        };
        let mut index = build_index(&spec, IndexConfig::new().collapse_policy(policy));

        for op in &ops {
            apply(&mut index, op);
            prop_assert_eq!(
                index_rows(&index),
                reference_rows(index.store().unwrap()),
                "after {:?}", op
            );
            prop_assert!(index.validate().is_ok(), "after {:?}: {:?}", op, index.validate());
        }
    }
}
