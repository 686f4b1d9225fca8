//! Expand State
//!
//! Which tree nodes currently show their children. Membership is the only
//! state; an id that is absent is collapsed.

use std::collections::HashSet;

use crate::domain::ItemId;
use crate::hierarchy::Forest;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandState {
    expanded: HashSet<ItemId>,
}

impl ExpandState {
    /// Everything collapsed
    pub fn new() -> Self {
        Self::default()
    }

    /// State right after a project's first successful build
    pub fn for_forest(forest: &Forest, auto_expand: bool) -> Self {
        let mut state = Self::new();
        if auto_expand {
            state.expand_all(forest);
        }
        state
    }

    pub fn is_expanded(&self, id: &ItemId) -> bool {
        self.expanded.contains(id)
    }

    /// Flip one node; returns whether it is now expanded
    pub fn toggle(&mut self, id: &ItemId) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    /// Replace the state with every node that has children
    pub fn expand_all(&mut self, forest: &Forest) {
        self.expanded = forest.internal_ids().cloned().collect();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Forget ids that are no longer in `forest` after a rebuild
    pub fn retain_existing(&mut self, forest: &Forest) {
        self.expanded.retain(|id| forest.contains(id));
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.expanded.iter()
    }
}
