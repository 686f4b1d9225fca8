//! Tree Flattening
//!
//! Forest + expand state to display rows in depth-first order.

use crate::domain::{ItemId, WbsItem};
use crate::expand::ExpandState;
use crate::hierarchy::Forest;

/// One visible row of the tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlatRow {
    pub item: WbsItem,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}

/// Rows for every visible node. Children follow their parent only when the
/// parent is expanded; collapsed subtrees stay in the forest.
pub fn flatten(forest: &Forest, state: &ExpandState) -> Vec<FlatRow> {
    let mut rows = Vec::new();
    // explicit stack: tree depth is unbounded
    let mut stack: Vec<&ItemId> = forest.roots().iter().rev().collect();
    while let Some(id) = stack.pop() {
        let Some(node) = forest.node(id) else {
            continue;
        };
        let expanded = node.has_children() && state.is_expanded(id);
        rows.push(FlatRow {
            item: node.item.clone(),
            depth: node.depth,
            has_children: node.has_children(),
            expanded,
        });
        if expanded {
            stack.extend(node.children.iter().rev());
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WbsCode;
    use crate::hierarchy::build_forest;

    fn make_item(code: &str, parent: Option<&str>) -> WbsItem {
        let base = WbsItem::new(code, WbsCode::parse(code).unwrap());
        match parent {
            Some(p) => base.with_parent(p),
            None => base,
        }
    }

    fn view(rows: &[FlatRow]) -> Vec<(&str, usize)> {
        rows.iter().map(|r| (r.item.code.as_str(), r.depth)).collect()
    }

    #[test]
    fn test_flatten_tree() {
        let items = vec![
            make_item("1", None),
            make_item("2", None),
            make_item("1.1", Some("1")),
            make_item("1.2", Some("1")),
            make_item("1.1.1", Some("1.1")),
        ];
        let forest = build_forest(&items).forest;
        let state = ExpandState::for_forest(&forest, true);

        let rows = flatten(&forest, &state);
        assert_eq!(
            view(&rows),
            vec![("1", 0), ("1.1", 1), ("1.1.1", 2), ("1.2", 1), ("2", 0)]
        );
        assert!(rows[0].has_children && rows[0].expanded);
        assert!(!rows[2].has_children);
    }

    #[test]
    fn test_collapsed_parent_hides_subtree() {
        let items = vec![make_item("1", None), make_item("1.1", Some("1")), make_item("1.1.1", Some("1.1"))];
        let forest = build_forest(&items).forest;
        let mut state = ExpandState::new();
        state.toggle(&ItemId::new("1.1"));

        // 1.1 is expanded but hidden behind collapsed 1
        assert_eq!(view(&flatten(&forest, &state)), vec![("1", 0)]);
        state.toggle(&ItemId::new("1"));
        assert_eq!(view(&flatten(&forest, &state)), vec![("1", 0), ("1.1", 1), ("1.1.1", 2)]);
    }

    #[test]
    fn test_leaf_in_state_is_harmless() {
        let forest = build_forest(&[make_item("1", None)]).forest;
        let mut state = ExpandState::new();
        state.toggle(&ItemId::new("1"));
        let rows = flatten(&forest, &state);
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].has_children);
        assert!(!rows[0].expanded);
    }

    #[test]
    fn test_edited_rows_are_distinct() {
        let before = make_item("1", None);
        let renamed = WbsItem { task_name: "Design".into(), ..before.clone() };
        let reowned = WbsItem { primary_owner: Some("Chen".into()), ..before.clone() };
        let rows: Vec<FlatRow> = [before, renamed, reowned]
            .iter()
            .flat_map(|item| flatten(&build_forest(std::slice::from_ref(item)).forest, &ExpandState::new()))
            .collect();

        // same item id, but each edit must give a distinct row
        let distinct: std::collections::HashSet<&FlatRow> = rows.iter().collect();
        assert_eq!(distinct.len(), 3);
    }

    #[test]
    fn test_deep_chain_flattens() {
        let n = 60_000;
        let items: Vec<WbsItem> = (0..n)
            .map(|i| {
                let code = i.to_string();
                let base = WbsItem::new(code.clone(), WbsCode::parse(&code).unwrap());
                if i == 0 {
                    base
                } else {
                    base.with_parent(&(i - 1).to_string())
                }
            })
            .collect();
        let forest = build_forest(&items).forest;
        let state = ExpandState::for_forest(&forest, true);

        let rows = flatten(&forest, &state);
        assert_eq!(rows.len(), n);
        assert_eq!(rows[n - 1].depth, n - 1);
        assert_eq!(forest.depth_first().len(), n);
        assert_eq!(forest.descendant_count(&ItemId::new("0")), n - 1);
        assert_eq!(forest.ancestors(&ItemId::new((n - 1).to_string())).len(), n - 1);
    }
}
