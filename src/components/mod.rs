//! UI Components
//!
//! Reusable Leptos components.

mod filter_bar;
mod project_selector;
mod skipped_items_notice;
mod tree_row;
mod wbs_tree_view;

pub use filter_bar::FilterBar;
pub use project_selector::ProjectSelector;
pub use skipped_items_notice::SkippedItemsNotice;
pub use tree_row::TreeRow;
pub use wbs_tree_view::WbsTreeView;
