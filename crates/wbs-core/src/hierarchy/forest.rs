//! Forest Arena
//!
//! Nodes live in a flat id → node map; edges are id lists. Ancestor lookups
//! walk parent ids, there are no back pointers.

use std::collections::HashMap;

use crate::domain::{ItemId, WbsItem};

/// One WBS item placed in the hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    pub item: WbsItem,
    /// 0 for roots, parent depth + 1 otherwise
    pub depth: usize,
    pub parent: Option<ItemId>,
    /// Sorted by code
    pub children: Vec<ItemId>,
}

impl HierarchyNode {
    pub fn id(&self) -> &ItemId {
        &self.item.item_id
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A set of disjoint rooted trees
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    nodes: HashMap<ItemId, HierarchyNode>,
    roots: Vec<ItemId>,
}

impl Forest {
    pub(crate) fn from_parts(nodes: HashMap<ItemId, HierarchyNode>, roots: Vec<ItemId>) -> Self {
        Self { nodes, roots }
    }

    /// Top-level ids in sibling order
    pub fn roots(&self) -> &[ItemId] {
        &self.roots
    }

    pub fn node(&self, id: &ItemId) -> Option<&HierarchyNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Child ids in sibling order; empty for leaves and unknown ids
    pub fn children(&self, id: &ItemId) -> &[ItemId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: &ItemId) -> Option<&HierarchyNode> {
        let parent_id = self.nodes.get(id)?.parent.as_ref()?;
        self.nodes.get(parent_id)
    }

    /// Ancestors nearest first, ending at the root
    pub fn ancestors(&self, id: &ItemId) -> Vec<&HierarchyNode> {
        let mut chain = Vec::new();
        let mut current = self.parent(id);
        while let Some(node) = current {
            chain.push(node);
            current = self.parent(node.id());
        }
        chain
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of nodes with at least one child
    pub fn internal_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.nodes
            .values()
            .filter(|n| n.has_children())
            .map(HierarchyNode::id)
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.nodes.values().map(|n| n.depth).max()
    }

    /// Number of nodes below `id`, at any depth
    pub fn descendant_count(&self, id: &ItemId) -> usize {
        let mut count = 0;
        let mut stack: Vec<&ItemId> = self.children(id).iter().collect();
        while let Some(child) = stack.pop() {
            count += 1;
            stack.extend(self.children(child));
        }
        count
    }

    /// Every node in pre-order, ignoring expand state
    pub fn depth_first(&self) -> Vec<&HierarchyNode> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<&ItemId> = self.roots.iter().rev().collect();
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                out.push(node);
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }
}
