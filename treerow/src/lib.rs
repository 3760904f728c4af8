//! Flat, row-indexed views over lazily enumerated trees.
//!
//! A virtualized grid addresses its rows by integer; the data behind it is a
//! hierarchy with per-node expand/collapse state. [`TreeIndex`] bridges the
//! two: it keeps the pre-order list of visible nodes, splices it on
//! expand/collapse instead of re-walking the hierarchy, and exposes per-row
//! level, sibling and connector information for indentation rendering.
//!
//! The hierarchy itself is any [`TreeStore`](store::TreeStore). Its
//! `Expanded` flags live in the store, so a store re-attached to a new index
//! comes back with the same rows.

pub mod config;
pub mod error;
pub mod index;
pub mod store;
pub mod viewport;

pub use config::{CollapsePolicy, IndexConfig};
pub use error::{StoreError, TreeError, TreeResult};
pub use index::{
    Ancestors, ExpansionEvent, FlatNode, Guide, GuideStyle, ListenerId, RowsChanged, TreeIndex,
    TreeListener, render_guides,
};
pub use viewport::Viewport;

pub mod prelude {
    pub use crate::config::{CollapsePolicy, IndexConfig};
    pub use crate::error::{StoreError, TreeError, TreeResult};
    pub use crate::index::{
        ExpansionEvent, FlatNode, Guide, GuideStyle, RowsChanged, TreeIndex, TreeListener,
    };
    pub use crate::store::{ChangeKind, MemoryStore, NodeId, StoreChange, TreeStore};
    pub use crate::viewport::Viewport;
}
