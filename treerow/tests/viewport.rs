//! Tests for the scroll window and its tracking of index row changes.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::*;
use treerow::store::MemoryStore;
use treerow::{RowsChanged, TreeIndex, Viewport};

fn wide_outline(children: usize) -> String {
    let mut outline = String::from("R0\n");
    for i in 0..children {
        outline.push_str(&format!("  C{i}\n"));
    }
    outline.push_str("R1\n");
    outline
}

// ============================================================================
// Scrolling
// ============================================================================

#[test]
fn test_empty_viewport() {
    let viewport = Viewport::new(5);
    assert_eq!(viewport.range(), 0..0);
    assert!(!viewport.contains(0));
}

#[test]
fn test_scroll_by_clamps() {
    let mut viewport = Viewport::new(4);
    viewport.set_rows(10);

    viewport.scroll_by(3);
    assert_eq!(viewport.range(), 3..7);
    viewport.scroll_by(100);
    assert_eq!(viewport.offset(), 6);
    viewport.scroll_by(-2);
    assert_eq!(viewport.offset(), 4);
    viewport.scroll_by(-100);
    assert_eq!(viewport.offset(), 0);
}

#[test]
fn test_scroll_to_minimal_move() {
    let mut viewport = Viewport::new(4);
    viewport.set_rows(20);

    viewport.scroll_to(2);
    assert_eq!(viewport.offset(), 0);
    viewport.scroll_to(9);
    assert_eq!(viewport.range(), 6..10);
    viewport.scroll_to(7);
    assert_eq!(viewport.offset(), 6);
    viewport.scroll_to(1);
    assert_eq!(viewport.offset(), 1);

    // Past the end is ignored.
    viewport.scroll_to(20);
    assert_eq!(viewport.offset(), 1);
}

#[test]
fn test_resize_clamps_offset() {
    let mut viewport = Viewport::new(4);
    viewport.set_rows(10);
    viewport.scroll_to_bottom();
    assert_eq!(viewport.offset(), 6);

    viewport.set_height(8);
    assert_eq!(viewport.offset(), 2);
    viewport.set_height(20);
    assert_eq!(viewport.range(), 0..10);
}

#[test]
fn test_changes_below_window_do_not_scroll() {
    let mut viewport = Viewport::new(3);
    viewport.set_rows(10);
    viewport.scroll_by(2);

    viewport.apply(RowsChanged::insert(5, 4));
    assert_eq!(viewport.range(), 2..5);
    viewport.apply(RowsChanged::remove(2, 3));
    assert_eq!(viewport.offset(), 2);
    assert_eq!(viewport.rows(), 11);
}

// ============================================================================
// Following an index
// ============================================================================

#[test]
fn test_follows_index_count() {
    init_logging();
    let viewport = Rc::new(RefCell::new(Viewport::new(3)));
    let mut index: TreeIndex<MemoryStore> = TreeIndex::new();
    index.add_listener(viewport.clone());

    index
        .initialize_items(MemoryStore::from_outline(SCENARIO))
        .unwrap();
    assert_eq!(viewport.borrow().rows(), 3);

    index.expand_all().unwrap();
    assert_eq!(viewport.borrow().rows(), index.count());

    index.take_store();
    assert_eq!(viewport.borrow().range(), 0..0);
}

#[test]
fn test_keeps_content_when_rows_change_above() {
    let mut index = index_from_outline(SCENARIO);
    index.expand_all().unwrap();
    let viewport = Rc::new(RefCell::new(Viewport::new(3)));
    viewport.borrow_mut().set_rows(index.count());
    index.add_listener(viewport.clone());

    viewport.borrow_mut().scroll_to_bottom();
    let shown = |index: &TreeIndex<MemoryStore>, viewport: &Viewport| -> Vec<String> {
        let store = index.store().unwrap();
        index
            .rows_in(viewport.range())
            .iter()
            .map(|n| store.label(*n.item()).unwrap().to_string())
            .collect()
    };
    assert_eq!(shown(&index, &viewport.borrow()), ["C1", "R1", "R2"]);

    // G0 disappears above the window.
    index.collapse_row(1);
    assert_eq!(shown(&index, &viewport.borrow()), ["C1", "R1", "R2"]);
    assert_eq!(viewport.borrow().offset(), 2);
}

#[test]
fn test_collapse_around_window() {
    let mut index = index_from_outline(&wide_outline(10));
    index.expand_row(0).unwrap();
    let viewport = Rc::new(RefCell::new(Viewport::new(3)));
    viewport.borrow_mut().set_rows(index.count());
    index.add_listener(viewport.clone());

    viewport.borrow_mut().scroll_to(6);
    assert_eq!(viewport.borrow().offset(), 4);

    index.collapse_row(0);
    let viewport = viewport.borrow();
    assert_eq!(viewport.rows(), 2);
    assert_eq!(viewport.range(), 0..2);
}
