//! Hierarchy
//!
//! Flat WBS items to a sorted, depth-annotated forest.

mod builder;
mod forest;

pub use builder::{build_forest, ForestBuild};
pub use forest::{Forest, HierarchyNode};
