//! Frontend Models
//!
//! Data structures matching backend responses.

use serde::{Deserialize, Serialize};

pub use wbs_core::RawWbsItem;

/// Project data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: String,
    pub project_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_wbs: u32,
    #[serde(default)]
    pub completed_wbs: u32,
}

impl Project {
    /// `PRJ001 - Name`, as shown in the project picker
    pub fn label(&self) -> String {
        format!("{} - {}", self.project_id, self.project_name)
    }
}

/// Paged list envelope used by the list endpoints
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub total: usize,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_list_response() {
        let json = r#"{
            "total": 1,
            "items": [{
                "project_id": "PRJ001",
                "project_name": "Office move",
                "status": "Active",
                "created_at": "2024-01-01T00:00:00",
                "updated_at": "2024-01-02T00:00:00",
                "total_wbs": 12
            }]
        }"#;
        let list: ListResponse<Project> = serde_json::from_str(json).unwrap();
        assert_eq!(list.total, 1);
        assert_eq!(list.items[0].label(), "PRJ001 - Office move");
        assert_eq!(list.items[0].total_wbs, 12);
    }

    #[test]
    fn test_wbs_list_response_tolerates_missing_items() {
        let list: ListResponse<RawWbsItem> = serde_json::from_str(r#"{"total": 0}"#).unwrap();
        assert!(list.items.is_empty());
    }
}
