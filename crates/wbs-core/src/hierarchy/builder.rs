//! Hierarchy Builder
//!
//! Turns a flat item list into a [`Forest`]. Bad references never abort a
//! build: duplicates are reported, dangling parents and cycles fall back to
//! roots.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::forest::{Forest, HierarchyNode};
use crate::domain::{ItemId, SkipReason, SkippedItem, WbsItem};

/// Forest plus the data-quality findings made while building it
#[derive(Debug, Clone, Default)]
pub struct ForestBuild {
    pub forest: Forest,
    /// Items left out of the forest
    pub skipped: Vec<SkippedItem>,
    /// Items whose parent code matched nothing, placed at the top level
    pub dangling: Vec<ItemId>,
    /// Items found in their own ancestor chain, placed at the top level
    pub cyclic: Vec<ItemId>,
}

impl ForestBuild {
    /// True when nothing was skipped or re-rooted
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.dangling.is_empty() && self.cyclic.is_empty()
    }
}

/// Build a forest from items whose codes are already validated.
///
/// Duplicate ids and duplicate codes keep the later occurrence.
pub fn build_forest(items: &[WbsItem]) -> ForestBuild {
    let mut skipped = Vec::new();

    let mut latest_by_id: HashMap<&ItemId, usize> = HashMap::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        if let Some(prev) = latest_by_id.insert(&item.item_id, idx) {
            warn!(item_id = %item.item_id, "duplicate item id, keeping the later item");
            skipped.push(skipped_item(&items[prev], SkipReason::DuplicateId));
        }
    }
    let unique_ids: Vec<usize> = (0..items.len())
        .filter(|idx| latest_by_id[&items[*idx].item_id] == *idx)
        .collect();

    let mut by_code: HashMap<&str, usize> = HashMap::with_capacity(unique_ids.len());
    for &idx in &unique_ids {
        let item = &items[idx];
        if let Some(prev) = by_code.insert(item.code.as_str(), idx) {
            warn!(
                code = %item.code,
                kept = %item.item_id,
                dropped = %items[prev].item_id,
                "duplicate WBS code, keeping the later item"
            );
            skipped.push(skipped_item(
                &items[prev],
                SkipReason::DuplicateCode { replaced_by: item.item_id.clone() },
            ));
        }
    }
    let live: Vec<usize> = unique_ids
        .into_iter()
        .filter(|idx| by_code[items[*idx].code.as_str()] == *idx)
        .collect();

    // Parent edges as input positions
    let mut dangling = Vec::new();
    let mut parent_of: HashMap<usize, usize> = HashMap::with_capacity(live.len());
    for &idx in &live {
        let item = &items[idx];
        let Some(parent_code) = item.parent_code.as_deref() else {
            continue;
        };
        match by_code.get(parent_code) {
            Some(&parent_idx) => {
                parent_of.insert(idx, parent_idx);
            }
            None => {
                debug!(item_id = %item.item_id, parent_code, "parent not found, placing at top level");
                dangling.push(item.item_id.clone());
            }
        }
    }

    // Promoting every member of every cycle leaves the remaining edges acyclic
    let on_cycle = cycle_members(&live, &parent_of);
    let cyclic_positions: Vec<usize> = live.iter().copied().filter(|idx| on_cycle.contains(idx)).collect();
    let mut cyclic = Vec::with_capacity(cyclic_positions.len());
    for idx in cyclic_positions {
        warn!(item_id = %items[idx].item_id, code = %items[idx].code, "cyclic parent reference, placing at top level");
        parent_of.remove(&idx);
        cyclic.push(items[idx].item_id.clone());
    }

    let mut children_of: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();
    for &idx in &live {
        match parent_of.get(&idx) {
            Some(&parent_idx) => children_of.entry(parent_idx).or_default().push(idx),
            None => roots.push(idx),
        }
    }
    let by_code_order = |a: &usize, b: &usize| items[*a].code.cmp(&items[*b].code);
    roots.sort_by(by_code_order);
    for children in children_of.values_mut() {
        children.sort_by(by_code_order);
    }

    let mut nodes = HashMap::with_capacity(live.len());
    let mut stack: Vec<(usize, usize)> = roots.iter().rev().map(|&idx| (idx, 0)).collect();
    while let Some((idx, depth)) = stack.pop() {
        let children = children_of.get(&idx).map(Vec::as_slice).unwrap_or(&[]);
        for &child in children.iter().rev() {
            stack.push((child, depth + 1));
        }
        let item = &items[idx];
        nodes.insert(
            item.item_id.clone(),
            HierarchyNode {
                item: item.clone(),
                depth,
                parent: parent_of.get(&idx).map(|p| items[*p].item_id.clone()),
                children: children.iter().map(|c| items[*c].item_id.clone()).collect(),
            },
        );
    }

    let root_ids = roots.iter().map(|idx| items[*idx].item_id.clone()).collect();
    let forest = Forest::from_parts(nodes, root_ids);

    debug!(
        items = items.len(),
        nodes = forest.len(),
        roots = forest.roots().len(),
        skipped = skipped.len(),
        dangling = dangling.len(),
        cyclic = cyclic.len(),
        "built WBS forest"
    );

    ForestBuild {
        forest,
        skipped,
        dangling,
        cyclic,
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Walk {
    /// On the chain currently being walked (walk number)
    Active(usize),
    Settled,
}

/// Positions that lie on a parent cycle.
///
/// Each position is walked at most once: a walk stops at the first position
/// already settled by an earlier walk, so the whole pass is linear.
fn cycle_members(live: &[usize], parent_of: &HashMap<usize, usize>) -> HashSet<usize> {
    let mut state: HashMap<usize, Walk> = HashMap::with_capacity(live.len());
    let mut on_cycle = HashSet::new();
    let mut path = Vec::new();

    for (walk, &start) in live.iter().enumerate() {
        path.clear();
        let mut current = Some(start);
        while let Some(idx) = current {
            match state.get(&idx) {
                Some(Walk::Settled) => break,
                Some(Walk::Active(w)) if *w == walk => {
                    // closed a loop: everything from `idx` onwards is on it
                    if let Some(pos) = path.iter().position(|p| *p == idx) {
                        on_cycle.extend(path[pos..].iter().copied());
                    }
                    break;
                }
                _ => {
                    state.insert(idx, Walk::Active(walk));
                    path.push(idx);
                    current = parent_of.get(&idx).copied();
                }
            }
        }
        for idx in &path {
            state.insert(*idx, Walk::Settled);
        }
    }
    on_cycle
}

fn skipped_item(item: &WbsItem, reason: SkipReason) -> SkippedItem {
    SkippedItem {
        item_id: Some(item.item_id.to_string()),
        code: Some(item.code.to_string()),
        reason,
    }
}
