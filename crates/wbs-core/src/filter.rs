//! Filter Predicate Stage
//!
//! Independent optional predicates combined with AND, applied to the flat
//! item list before the hierarchy is built.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{normalize_parent_ref, WbsItem};

/// Status values the backend uses, in workflow order
pub const STATUSES: [&str; 3] = ["未開始", "進行中", "已完成"];

/// Optional bounds on an item's effective schedule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Items missing the relevant date are never excluded
    fn admits(&self, item: &WbsItem) -> bool {
        if let (Some(from), Some(end)) = (self.from, item.schedule.effective_end()) {
            if end < from {
                return false;
            }
        }
        if let (Some(to), Some(start)) = (self.to, item.schedule.effective_start()) {
            if start > to {
                return false;
            }
        }
        true
    }
}

/// Filter configuration; every field is optional and blank means "any"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub status_equals: Option<String>,
    /// Case-insensitive, matched against every owner field
    pub owner_contains: Option<String>,
    /// Case-insensitive substring of the code
    pub code_contains: Option<String>,
    pub overdue_only: bool,
    /// Effective end date within `[today, today + n]`
    pub due_within_days: Option<u32>,
    /// Keep this item and its direct children only (one level)
    pub parent_filter: Option<String>,
    pub date_window: DateWindow,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        blank(&self.status_equals)
            && blank(&self.owner_contains)
            && blank(&self.code_contains)
            && !self.overdue_only
            && self.due_within_days.is_none()
            && blank(&self.parent_filter)
            && self.date_window.is_open()
    }

    pub fn matches(&self, item: &WbsItem, today: NaiveDate) -> bool {
        if let Some(status) = present(&self.status_equals) {
            if item.status != status {
                return false;
            }
        }

        if let Some(owner) = present(&self.owner_contains) {
            let needle = owner.to_lowercase();
            if !item.owners().any(|o| o.to_lowercase().contains(&needle)) {
                return false;
            }
        }

        if let Some(code) = present(&self.code_contains) {
            if !item.code.as_str().to_lowercase().contains(&code.to_lowercase()) {
                return false;
            }
        }

        if self.overdue_only && !item.is_overdue {
            return false;
        }

        if let Some(days) = self.due_within_days {
            let Some(end) = item.schedule.effective_end() else {
                return false;
            };
            if end < today {
                return false;
            }
            if let Some(limit) = today.checked_add_days(Days::new(u64::from(days))) {
                if end > limit {
                    return false;
                }
            }
        }

        if let Some(parent) = self.parent_filter.as_deref().and_then(normalize_parent_ref) {
            let is_parent = item.code.as_str() == parent;
            let is_child = item.parent_code.as_deref() == Some(parent);
            if !is_parent && !is_child {
                return false;
            }
        }

        self.date_window.admits(item)
    }
}

/// Keep the items matching every present criterion, in input order.
pub fn apply_filters(items: &[WbsItem], criteria: &FilterCriteria, today: NaiveDate) -> Vec<WbsItem> {
    if criteria.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| criteria.matches(item, today))
        .cloned()
        .collect()
}

/// Filter form values exactly as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterInput {
    pub status: String,
    pub owner: String,
    pub code: String,
    pub overdue_only: bool,
    pub due_within_days: String,
    pub parent: String,
    pub from: String,
    pub to: String,
}

impl FilterInput {
    /// Values that fail to parse are dropped rather than reported
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            status_equals: text(&self.status),
            owner_contains: text(&self.owner),
            code_contains: text(&self.code),
            overdue_only: self.overdue_only,
            due_within_days: self.due_within_days.trim().parse::<u32>().ok(),
            parent_filter: text(&self.parent),
            date_window: DateWindow {
                from: date(&self.from),
                to: date(&self.to),
            },
        }
    }
}

fn text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn blank(value: &Option<String>) -> bool {
    present(value).is_none()
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
