//! WBS Commands
//!
//! Frontend bindings for WBS item endpoints.

use super::{collect_pages, ApiClient, ApiError};
use crate::models::{ListResponse, RawWbsItem};

impl ApiClient {
    /// `GET /wbs/?project_id=…`, every item of one project, page by page
    pub async fn list_wbs_items(&self, project_id: &str) -> Result<Vec<RawWbsItem>, ApiError> {
        let items = collect_pages(self.list_limit(), |skip, limit| {
            let query = [
                ("project_id", project_id.to_string()),
                ("skip", skip.to_string()),
                ("limit", limit.to_string()),
            ];
            async move { self.get_json::<ListResponse<RawWbsItem>>("/wbs/", &query).await }
        })
        .await?;
        tracing::debug!(project_id, count = items.len(), "fetched WBS pages");
        Ok(items)
    }
}
