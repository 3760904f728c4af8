//! The explorer session: one index over a directory, its viewport and the
//! command dispatch.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use treerow::{GuideStyle, IndexConfig, TreeError, TreeIndex, Viewport};

use crate::commands::Command;
use crate::error::ExplorerError;
use crate::fs_store::FsStore;
use crate::grid::GridView;
use crate::state::ExpansionState;

/// What the prompt should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Redraw,
    Help,
    Quit,
}

#[derive(Debug)]
pub struct Explorer {
    index: TreeIndex<FsStore>,
    viewport: Rc<RefCell<Viewport>>,
    grid: GridView,
}

impl Explorer {
    pub fn new(
        store: FsStore,
        height: usize,
        style: GuideStyle,
        config: IndexConfig,
    ) -> Result<Self, ExplorerError> {
        let viewport = Rc::new(RefCell::new(Viewport::new(height)));
        let mut index = TreeIndex::with_config(config);
        index.add_listener(viewport.clone());
        index.initialize_items(store)?;
        Ok(Self {
            index,
            viewport,
            grid: GridView::new(style),
        })
    }

    /// Reject rows the index does not have, rather than silently ignoring
    /// them.
    fn check_row(&self, row: usize) -> Result<(), TreeError> {
        self.index.node_at_row(row).map(|_| ())
    }

    pub fn execute(&mut self, command: Command) -> Result<Flow, ExplorerError> {
        log::debug!("Explorer: {command:?}");
        match command {
            Command::Expand(row) => {
                self.check_row(row)?;
                self.index.expand_row(row)?;
            }
            Command::Collapse(row) => {
                self.check_row(row)?;
                self.index.collapse_row(row);
            }
            Command::Toggle(row) => {
                self.index.toggle_row(row)?;
            }
            Command::Scroll(delta) => self.viewport.borrow_mut().scroll_by(delta),
            Command::Goto(row) => {
                self.check_row(row)?;
                self.viewport.borrow_mut().scroll_to(row);
            }
            Command::Top => self.viewport.borrow_mut().scroll_to_top(),
            Command::Bottom => self.viewport.borrow_mut().scroll_to_bottom(),
            Command::ExpandAll => {
                let expanded = self.index.expand_all()?;
                log::info!("Explorer: expanded {expanded} directories");
            }
            Command::CollapseAll => {
                self.index.collapse_all();
            }
            Command::Refresh(Some(row)) => {
                let entry = self.index.item_at_row(row)?.clone();
                if !entry.is_dir() {
                    return Err(ExplorerError::NotADirectory(row));
                }
                if let Some(store) = self.index.store_mut() {
                    store.refresh(entry.path());
                }
                self.index.sync()?;
            }
            Command::Refresh(None) => {
                if let Some(store) = self.index.store_mut() {
                    store.refresh_all();
                }
                self.index.sync()?;
            }
            Command::Help => return Ok(Flow::Help),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Redraw)
    }

    pub fn render<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        self.grid
            .render(&self.index, &self.viewport.borrow(), |e| e.name(), out)
    }

    /// Record the expanded directories of this session's root.
    pub fn save_state(&self, state: &mut ExpansionState) {
        if let Some(store) = self.index.store() {
            state.set_expanded(store.root().path(), store.expanded_paths());
        }
    }
}
