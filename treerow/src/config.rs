//! Tree index configuration types.

/// Behavior of `collapse_row` towards the rows it hides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollapsePolicy {
    /// Leave the `Expanded` flag of hidden descendants untouched, so that
    /// expanding the row again restores the whole previously open subtree.
    #[default]
    PreserveDescendants,
    /// Also clear the `Expanded` flag of every hidden descendant row.
    ResetDescendants,
}

/// Per-index configuration.
///
/// ```
/// use treerow::{CollapsePolicy, IndexConfig};
///
/// let config = IndexConfig::new()
///     .collapse_policy(CollapsePolicy::ResetDescendants)
///     .validate_after_mutation(true);
/// assert_eq!(config.collapse_policy, CollapsePolicy::ResetDescendants);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndexConfig {
    /// What collapsing does to descendants' persisted flags.
    pub collapse_policy: CollapsePolicy,

    /// Run [`TreeIndex::validate`](crate::TreeIndex::validate) after every
    /// splice and log any violation. Costs a full pass over the rows.
    pub validate_after_mutation: bool,
}

impl IndexConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the collapse policy.
    pub fn collapse_policy(mut self, policy: CollapsePolicy) -> Self {
        self.collapse_policy = policy;
        self
    }

    /// Enable or disable post-mutation validation.
    pub fn validate_after_mutation(mut self, enabled: bool) -> Self {
        self.validate_after_mutation = enabled;
        self
    }
}
