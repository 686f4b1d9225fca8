//! WBS Core
//!
//! Client-side work-breakdown-structure logic:
//! - domain: typed items, dotted codes, ingestion from the backend shape
//! - filter: AND-combined predicates over the flat item list
//! - hierarchy: forest construction with cycle and dangling-parent handling
//! - expand / flatten: expand state and the visible row sequence
//!
//! Everything here is synchronous and in-memory.

mod domain;
mod expand;
mod filter;
mod flatten;
mod hierarchy;

pub use domain::{
    ingest, normalize_parent_ref, CodeError, Ingested, ItemId, RawWbsItem, Schedule, SkipReason,
    SkippedItem, WbsCode, WbsItem, DEFAULT_STATUS, PROJECT_CODE_SEPARATOR,
};
pub use expand::ExpandState;
pub use filter::{apply_filters, DateWindow, FilterCriteria, FilterInput, STATUSES};
pub use flatten::{flatten, FlatRow};
pub use hierarchy::{build_forest, Forest, ForestBuild, HierarchyNode};
