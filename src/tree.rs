//! Tree Utilities
//!
//! Stages of the tree view, each memoised separately by the app:
//! build the project forest when items change, narrow it when filters
//! change, flatten it when the expand state changes.

use chrono::NaiveDate;
use wbs_core::{apply_filters, build_forest, FilterCriteria, Forest, ItemId, SkippedItem, WbsItem};

/// Data-quality findings of the unfiltered build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeDiagnostics {
    /// Duplicates dropped by the builder
    pub duplicates: Vec<SkippedItem>,
    pub dangling: Vec<ItemId>,
    pub cyclic: Vec<ItemId>,
}

impl TreeDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.dangling.is_empty() && self.cyclic.is_empty()
    }
}

/// Forest of every item in the project
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectTree {
    pub forest: Forest,
    pub diagnostics: TreeDiagnostics,
}

impl ProjectTree {
    pub fn build(items: &[WbsItem]) -> Self {
        let build = build_forest(items);
        Self {
            forest: build.forest,
            diagnostics: TreeDiagnostics {
                duplicates: build.skipped,
                dangling: build.dangling,
                cyclic: build.cyclic,
            },
        }
    }
}

/// Forest of the items passing `criteria`; `None` when no filter is active.
///
/// Works on the deduplicated items of `full`, so the duplicate reports of
/// the full build are not repeated. Parents hidden by a filter leave their
/// children at top level without counting as missing.
pub fn filter_forest(full: &Forest, criteria: &FilterCriteria, today: NaiveDate) -> Option<Forest> {
    if criteria.is_empty() {
        return None;
    }
    let kept: Vec<WbsItem> = full.depth_first().into_iter().map(|node| node.item.clone()).collect();
    let filtered = apply_filters(&kept, criteria, today);
    let forest = build_forest(&filtered).forest;
    tracing::debug!(total = full.len(), matched = forest.len(), "filters applied");
    Some(forest)
}

/// `N visible of M items`
pub fn summary(visible: usize, total: usize, matched: usize) -> String {
    if matched == total {
        format!("{visible} visible of {total} items")
    } else {
        format!("{visible} visible of {total} items ({matched} match filters)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wbs_core::{flatten, ExpandState, WbsCode};

    fn make_item(code: &str, parent: Option<&str>) -> WbsItem {
        let base = WbsItem::new(format!("PRJ001_{code}"), WbsCode::parse(code).unwrap());
        match parent {
            Some(p) => base.with_parent(&format!("PRJ001_{p}")),
            None => base,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn codes(forest: &Forest, expand: &ExpandState) -> Vec<String> {
        flatten(forest, expand).iter().map(|r| r.item.code.to_string()).collect()
    }

    fn sample() -> Vec<WbsItem> {
        vec![
            make_item("2", None),
            make_item("1.2", Some("1")),
            make_item("1", None),
            make_item("1.1", Some("1")),
        ]
    }

    #[test]
    fn test_project_tree_expanded_and_collapsed() {
        let tree = ProjectTree::build(&sample());
        assert!(tree.diagnostics.is_clean());

        let expand = ExpandState::for_forest(&tree.forest, true);
        assert_eq!(codes(&tree.forest, &expand), vec!["1", "1.1", "1.2", "2"]);
        assert_eq!(codes(&tree.forest, &ExpandState::new()), vec!["1", "2"]);
    }

    #[test]
    fn test_no_filter_reuses_full_forest() {
        let tree = ProjectTree::build(&sample());
        assert_eq!(filter_forest(&tree.forest, &FilterCriteria::default(), today()), None);
    }

    #[test]
    fn test_filter_hides_parent_without_dangling_report() {
        let tree = ProjectTree::build(&sample());
        let criteria = FilterCriteria {
            code_contains: Some("1.1".into()),
            ..Default::default()
        };
        let filtered = filter_forest(&tree.forest, &criteria, today()).unwrap();
        assert_eq!(codes(&filtered, &ExpandState::new()), vec!["1.1"]);
        assert_eq!(filtered.node(&ItemId::new("PRJ001_1.1")).unwrap().depth, 0);
        assert!(tree.diagnostics.dangling.is_empty());
    }

    #[test]
    fn test_filter_sees_deduplicated_items() {
        let mut first = make_item("1", None);
        first.item_id = ItemId::new("first");
        first.status = "進行中".into();
        let items = vec![first, make_item("1", None)];
        let tree = ProjectTree::build(&items);
        assert_eq!(tree.diagnostics.duplicates.len(), 1);

        let criteria = FilterCriteria {
            status_equals: Some("進行中".into()),
            ..Default::default()
        };
        assert!(filter_forest(&tree.forest, &criteria, today()).unwrap().is_empty());
    }

    #[test]
    fn test_diagnostics_report_data_problems() {
        let items = vec![
            make_item("1", None),
            make_item("3.1", Some("3")),
            make_item("1", None),
        ];
        let tree = ProjectTree::build(&items);
        assert_eq!(tree.diagnostics.duplicates.len(), 1);
        assert_eq!(tree.diagnostics.dangling, vec![ItemId::new("PRJ001_3.1")]);
        assert!(!tree.diagnostics.is_clean());
        assert_eq!(codes(&tree.forest, &ExpandState::new()), vec!["1", "3.1"]);
    }

    #[test]
    fn test_summary() {
        assert_eq!(summary(4, 4, 4), "4 visible of 4 items");
        assert_eq!(summary(1, 4, 1), "1 visible of 4 items (1 match filters)");
    }
}
