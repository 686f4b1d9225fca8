//! Domain Layer
//!
//! WBS items, their dotted codes and ingestion diagnostics.
//! No web or I/O dependencies here.

mod code;
mod item;
mod skipped;

pub use code::{CodeError, WbsCode};
pub use item::{
    ingest, normalize_parent_ref, Ingested, ItemId, RawWbsItem, Schedule, WbsItem, DEFAULT_STATUS,
    PROJECT_CODE_SEPARATOR,
};
pub use skipped::{SkipReason, SkippedItem};
