//! Skipped Items
//!
//! Non-fatal data-quality reports handed back to the caller.

use thiserror::Error;

use super::code::CodeError;
use super::item::ItemId;

/// Why an item did not make it into the forest
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("missing WBS code")]
    MissingCode,
    #[error("malformed WBS code: {0}")]
    MalformedCode(CodeError),
    #[error("WBS code already used by {replaced_by}")]
    DuplicateCode { replaced_by: ItemId },
    #[error("item id appears more than once")]
    DuplicateId,
}

/// An input item excluded from the forest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub item_id: Option<String>,
    pub code: Option<String>,
    pub reason: SkipReason,
}
