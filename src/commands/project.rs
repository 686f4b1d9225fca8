//! Project Commands
//!
//! Frontend bindings for project endpoints.

use super::{collect_pages, ApiClient, ApiError};
use crate::models::{ListResponse, Project};

impl ApiClient {
    /// `GET /projects/`
    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        collect_pages(self.list_limit(), |skip, limit| {
            let query = [("skip", skip.to_string()), ("limit", limit.to_string())];
            async move { self.get_json::<ListResponse<Project>>("/projects/", &query).await }
        })
        .await
    }
}
