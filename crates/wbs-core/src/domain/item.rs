//! WBS Item Entity
//!
//! Typed WBS record plus the ingestion step from the backend's JSON shape.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::code::WbsCode;
use super::skipped::{SkipReason, SkippedItem};

/// Separator the backend uses in composite ids (`PRJ001_2.1`)
pub const PROJECT_CODE_SEPARATOR: char = '_';

/// Status the backend assigns to new items
pub const DEFAULT_STATUS: &str = "未開始";

/// Opaque item identifier, stable across requests
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Reduce a parent reference to a bare code.
///
/// `"PRJ001_1.2"` becomes `"1.2"`, `"1.2"` stays as is, blank becomes `None`.
/// Codes never contain the separator, so everything up to the last one is
/// the project prefix.
pub fn normalize_parent_ref(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let code = match trimmed.rsplit_once(PROJECT_CODE_SEPARATOR) {
        Some((_, code)) => code.trim(),
        None => trimmed,
    };
    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}

/// Planned and actual dates of an item
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Schedule {
    pub original_start: Option<NaiveDate>,
    pub original_end: Option<NaiveDate>,
    pub revised_start: Option<NaiveDate>,
    pub revised_end: Option<NaiveDate>,
    pub actual_start: Option<NaiveDate>,
    pub actual_end: Option<NaiveDate>,
}

impl Schedule {
    /// Revised start if present, else original start
    pub fn effective_start(&self) -> Option<NaiveDate> {
        self.revised_start.or(self.original_start)
    }

    /// Revised end if present, else original end
    pub fn effective_end(&self) -> Option<NaiveDate> {
        self.revised_end.or(self.original_end)
    }

    pub fn has_revision(&self) -> bool {
        self.revised_start.is_some() || self.revised_end.is_some()
    }
}

/// A WBS item as consumed by the hierarchy, filter and tree stages
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WbsItem {
    /// Node identity
    pub item_id: ItemId,
    pub project_id: Option<String>,
    /// Own dotted code, unique within a project
    pub code: WbsCode,
    /// Bare parent code (project prefix already stripped), `None` = top level
    pub parent_code: Option<String>,
    pub task_name: String,
    pub category: Option<String>,
    pub owner_unit: Option<String>,
    pub primary_owner: Option<String>,
    pub secondary_owner: Option<String>,
    pub schedule: Schedule,
    pub actual_progress: i32,
    pub progress_variance: i32,
    pub status: String,
    pub is_overdue: bool,
    pub notes: Option<String>,
}

impl WbsItem {
    /// Create a top-level item with empty display fields
    pub fn new(item_id: impl Into<String>, code: WbsCode) -> Self {
        Self {
            item_id: ItemId::new(item_id),
            project_id: None,
            code,
            parent_code: None,
            task_name: String::new(),
            category: None,
            owner_unit: None,
            primary_owner: None,
            secondary_owner: None,
            schedule: Schedule::default(),
            actual_progress: 0,
            progress_variance: 0,
            status: DEFAULT_STATUS.to_string(),
            is_overdue: false,
            notes: None,
        }
    }

    /// Set the parent reference, normalizing composite ids
    pub fn with_parent(mut self, parent_ref: &str) -> Self {
        self.parent_code = normalize_parent_ref(parent_ref).map(str::to_string);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_code.is_none()
    }

    /// All owner fields that are set
    pub fn owners(&self) -> impl Iterator<Item = &str> {
        [&self.owner_unit, &self.primary_owner, &self.secondary_owner]
            .into_iter()
            .filter_map(|o| o.as_deref())
    }
}

/// WBS item as the backend sends it; every field may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawWbsItem {
    pub item_id: Option<String>,
    pub project_id: Option<String>,
    pub wbs_id: Option<String>,
    pub parent_id: Option<String>,
    pub task_name: Option<String>,
    pub category: Option<String>,
    pub owner_unit: Option<String>,
    pub primary_owner: Option<String>,
    pub secondary_owner: Option<String>,
    pub original_planned_start: Option<String>,
    pub original_planned_end: Option<String>,
    pub revised_planned_start: Option<String>,
    pub revised_planned_end: Option<String>,
    pub actual_start_date: Option<String>,
    pub actual_end_date: Option<String>,
    pub actual_progress: Option<i32>,
    pub progress_variance: Option<i32>,
    pub status: Option<String>,
    pub is_overdue: Option<bool>,
    pub notes: Option<String>,
}

impl RawWbsItem {
    /// Validate and normalize into a typed item.
    ///
    /// Fails only on a missing or malformed code. A missing `item_id`
    /// is rebuilt the way the backend composes it (`<project>_<code>`).
    pub fn into_item(self) -> Result<WbsItem, SkippedItem> {
        let raw_code = self.wbs_id.as_deref().map(str::trim).unwrap_or_default();
        if raw_code.is_empty() {
            return Err(SkippedItem {
                item_id: self.item_id.clone(),
                code: None,
                reason: SkipReason::MissingCode,
            });
        }
        let code = WbsCode::parse(raw_code).map_err(|e| SkippedItem {
            item_id: self.item_id.clone(),
            code: Some(raw_code.to_string()),
            reason: SkipReason::MalformedCode(e),
        })?;

        let item_id = match self.item_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => ItemId::new(id),
            _ => match self.project_id.as_deref() {
                Some(project) => ItemId::new(format!("{project}{PROJECT_CODE_SEPARATOR}{code}")),
                None => ItemId::new(code.as_str()),
            },
        };

        let schedule = Schedule {
            original_start: parse_date(&item_id, "original_planned_start", self.original_planned_start.as_deref()),
            original_end: parse_date(&item_id, "original_planned_end", self.original_planned_end.as_deref()),
            revised_start: parse_date(&item_id, "revised_planned_start", self.revised_planned_start.as_deref()),
            revised_end: parse_date(&item_id, "revised_planned_end", self.revised_planned_end.as_deref()),
            actual_start: parse_date(&item_id, "actual_start_date", self.actual_start_date.as_deref()),
            actual_end: parse_date(&item_id, "actual_end_date", self.actual_end_date.as_deref()),
        };

        Ok(WbsItem {
            parent_code: self
                .parent_id
                .as_deref()
                .and_then(normalize_parent_ref)
                .map(str::to_string),
            item_id,
            project_id: self.project_id,
            code,
            task_name: self.task_name.unwrap_or_default(),
            category: non_blank(self.category),
            owner_unit: non_blank(self.owner_unit),
            primary_owner: non_blank(self.primary_owner),
            secondary_owner: non_blank(self.secondary_owner),
            schedule,
            actual_progress: self.actual_progress.unwrap_or(0),
            progress_variance: self.progress_variance.unwrap_or(0),
            status: non_blank(self.status).unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            is_overdue: self.is_overdue.unwrap_or(false),
            notes: non_blank(self.notes),
        })
    }
}

/// Result of ingesting a backend list
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    pub items: Vec<WbsItem>,
    pub skipped: Vec<SkippedItem>,
}

/// Convert backend records into typed items, keeping input order.
pub fn ingest(raw: impl IntoIterator<Item = RawWbsItem>) -> Ingested {
    let mut out = Ingested::default();
    for record in raw {
        match record.into_item() {
            Ok(item) => out.items.push(item),
            Err(skipped) => {
                warn!(item_id = ?skipped.item_id, code = ?skipped.code, "skipping WBS item: {}", skipped.reason);
                out.skipped.push(skipped);
            }
        }
    }
    out
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accepts `YYYY-MM-DD`, or a datetime whose first ten characters are one
fn parse_date(item_id: &ItemId, field: &str, value: Option<&str>) -> Option<NaiveDate> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    let date_part = value.get(..10).unwrap_or(value);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            warn!(%item_id, field, value, "ignoring unparsable date");
            None
        }
    }
}
