//! Arena-backed in-memory store.

use crate::error::StoreError;

use super::{StoreChange, TreeStore};

/// Handle of a node in a [`MemoryStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the store's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct MemoryNode {
    label: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    expanded: bool,
    /// Overrides the "has children" rule, for nodes populated on expand.
    expandable: Option<bool>,
    alive: bool,
}

/// A mutable forest kept in a `Vec` arena.
///
/// Every structural edit queues a [`StoreChange`], handed to the index by
/// [`TreeIndex::sync`](crate::TreeIndex::sync). Removed nodes keep their slot
/// so that stale ids are reported as unknown instead of aliasing new nodes.
///
/// ```
/// use treerow::store::{MemoryStore, TreeStore};
///
/// let store = MemoryStore::from_outline(
///     "
///     +R0
///       C0
///         G0
///       C1
///     R1
///     ",
/// );
/// let r0 = store.find("R0").unwrap();
/// assert!(store.is_expanded(&r0));
/// assert_eq!(store.child_count(Some(&r0)).unwrap(), 2);
/// assert_eq!(store.child_count(None).unwrap(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    nodes: Vec<MemoryNode>,
    roots: Vec<NodeId>,
    changes: Vec<StoreChange<NodeId>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an indented outline, one node per line.
    ///
    /// Deeper indentation nests a line under the closest shallower line above
    /// it. A leading `+` marks the node as expanded. Blank lines are skipped.
    /// No changes are queued for the initial content.
    pub fn from_outline(outline: &str) -> Self {
        let mut store = Self::new();
        let mut stack: Vec<(usize, NodeId)> = Vec::new();

        for line in outline.lines() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() {
                continue;
            }
            let indent = line.len() - trimmed.len();
            let (expanded, label) = match trimmed.strip_prefix('+') {
                Some(rest) => (true, rest.trim()),
                None => (false, trimmed.trim_end()),
            };

            while let Some(&(depth, _)) = stack.last()
                && depth >= indent
            {
                stack.pop();
            }
            let parent = stack.last().map(|&(_, id)| id);
            let id = store.push_node(parent, label);
            store.nodes[id.0].expanded = expanded;
            match parent {
                Some(parent) => store.nodes[parent.0].children.push(id),
                None => store.roots.push(id),
            }
            stack.push((indent, id));
        }

        store
    }

    fn push_node(&mut self, parent: Option<NodeId>, label: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MemoryNode {
            label: label.to_string(),
            parent,
            children: Vec::new(),
            expanded: false,
            expandable: None,
            alive: true,
        });
        id
    }

    fn node(&self, id: NodeId) -> Result<&MemoryNode, StoreError> {
        self.nodes
            .get(id.0)
            .filter(|n| n.alive)
            .ok_or_else(|| StoreError::UnknownItem(id.to_string()))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut MemoryNode, StoreError> {
        self.nodes
            .get_mut(id.0)
            .filter(|n| n.alive)
            .ok_or_else(|| StoreError::UnknownItem(id.to_string()))
    }

    fn siblings(&self, parent: Option<NodeId>) -> Result<&Vec<NodeId>, StoreError> {
        match parent {
            Some(id) => Ok(&self.node(id)?.children),
            None => Ok(&self.roots),
        }
    }

    fn siblings_mut(&mut self, parent: Option<NodeId>) -> Result<&mut Vec<NodeId>, StoreError> {
        match parent {
            Some(id) => Ok(&mut self.node_mut(id)?.children),
            None => Ok(&mut self.roots),
        }
    }

    // -------------------------------------------------------------------------
    // Structural edits
    // -------------------------------------------------------------------------

    /// Append a root node.
    pub fn add_root(&mut self, label: impl Into<String>) -> NodeId {
        let label = label.into();
        let index = self.roots.len();
        let id = self.push_node(None, &label);
        self.roots.push(id);
        self.changes.push(StoreChange::insert(None, index, 1));
        id
    }

    /// Append a child to `parent`.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        label: impl Into<String>,
    ) -> Result<NodeId, StoreError> {
        let index = self.node(parent)?.children.len();
        self.insert_child(Some(parent), index, label)
    }

    /// Insert a node at `index` among the children of `parent`
    /// (`None` = roots).
    pub fn insert_child(
        &mut self,
        parent: Option<NodeId>,
        index: usize,
        label: impl Into<String>,
    ) -> Result<NodeId, StoreError> {
        let count = self.siblings(parent)?.len();
        if index > count {
            return Err(StoreError::ChildOutOfRange { index, count });
        }
        let label = label.into();
        let id = self.push_node(parent, &label);
        self.siblings_mut(parent)?.insert(index, id);
        self.changes.push(StoreChange::insert(parent, index, 1));
        log::trace!("MemoryStore: inserted {id} '{label}' under {parent:?} at {index}");
        Ok(id)
    }

    /// Remove a node together with its subtree.
    pub fn remove(&mut self, id: NodeId) -> Result<(), StoreError> {
        let parent = self.node(id)?.parent;
        let siblings = self.siblings_mut(parent)?;
        let Some(position) = siblings.iter().position(|&c| c == id) else {
            return Err(StoreError::UnknownItem(id.to_string()));
        };
        siblings.remove(position);

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let node = &mut self.nodes[next.0];
            node.alive = false;
            pending.append(&mut node.children);
        }

        self.changes.push(StoreChange::remove(parent, position, 1));
        log::trace!("MemoryStore: removed {id} from {parent:?} at {position}");
        Ok(())
    }

    /// Replace all children of `parent` with freshly created nodes.
    ///
    /// Queues a single `Reset` for the parent.
    pub fn replace_children<L: Into<String>>(
        &mut self,
        parent: Option<NodeId>,
        labels: impl IntoIterator<Item = L>,
    ) -> Result<Vec<NodeId>, StoreError> {
        let old = std::mem::take(self.siblings_mut(parent)?);
        for id in old {
            let mut pending = vec![id];
            while let Some(next) = pending.pop() {
                let node = &mut self.nodes[next.0];
                node.alive = false;
                pending.append(&mut node.children);
            }
        }

        let mut created = Vec::new();
        for label in labels {
            let label = label.into();
            created.push(self.push_node(parent, &label));
        }
        self.siblings_mut(parent)?.extend(created.iter().copied());
        self.changes.push(StoreChange::reset(parent));
        Ok(created)
    }

    /// Force a node to be (or not be) expandable regardless of its children.
    ///
    /// `None` restores the default rule: expandable iff it has children.
    /// Queues a `Reset` of the node when its effective expandability changes.
    pub fn set_expandable(&mut self, id: NodeId, expandable: Option<bool>) -> Result<(), StoreError> {
        let before = self.is_expandable(&id);
        self.node_mut(id)?.expandable = expandable;
        if self.is_expandable(&id) != before {
            self.changes.push(StoreChange::reset(Some(id)));
            log::trace!("MemoryStore: {id} expandable changed to {}", !before);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Label of a live node.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.node(id).ok().map(|n| n.label.as_str())
    }

    /// Parent of a live node, `None` for roots and unknown ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).ok().and_then(|n| n.parent)
    }

    /// Children of `parent` (`None` = roots).
    pub fn children(&self, parent: Option<NodeId>) -> &[NodeId] {
        self.siblings(parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First live node (in creation order) with the given label.
    pub fn find(&self, label: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.alive && n.label == label)
            .map(NodeId)
    }

    /// Whether the id names a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.alive).count()
    }

    /// Number of queued, not yet drained changes.
    pub fn pending_changes(&self) -> usize {
        self.changes.len()
    }
}

impl TreeStore for MemoryStore {
    type Item = NodeId;

    fn child_count(&self, parent: Option<&NodeId>) -> Result<usize, StoreError> {
        Ok(self.siblings(parent.copied())?.len())
    }

    fn child_at(&self, parent: Option<&NodeId>, index: usize) -> Result<NodeId, StoreError> {
        let siblings = self.siblings(parent.copied())?;
        siblings
            .get(index)
            .copied()
            .ok_or(StoreError::ChildOutOfRange {
                index,
                count: siblings.len(),
            })
    }

    fn is_expandable(&self, item: &NodeId) -> bool {
        self.node(*item)
            .map(|n| n.expandable.unwrap_or(!n.children.is_empty()))
            .unwrap_or(false)
    }

    fn is_expanded(&self, item: &NodeId) -> bool {
        self.node(*item).map(|n| n.expanded).unwrap_or(false)
    }

    fn set_expanded(&mut self, item: &NodeId, expanded: bool) {
        if let Ok(node) = self.node_mut(*item) {
            node.expanded = expanded;
        }
    }

    fn drain_changes(&mut self) -> Vec<StoreChange<NodeId>> {
        std::mem::take(&mut self.changes)
    }
}
