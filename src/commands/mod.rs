//! REST Command Wrappers
//!
//! Frontend bindings to the backend's HTTP JSON endpoints, organized by
//! domain.

mod project;
mod wbs;

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::ListResponse;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// FastAPI error body; `detail` is a string or a validation error list
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl ApiError {
    /// Prefer the backend's `detail`, fall back to the raw body
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody { detail: serde_json::Value::String(detail) }) => detail,
            Ok(ErrorBody { detail }) => detail.to_string(),
            Err(_) if body.trim().is_empty() => "no response body".to_string(),
            Err(_) => body.trim().to_string(),
        };
        ApiError::Status { status, message }
    }
}

/// Backend location resolved against the page origin
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    origin: String,
    config: AppConfig,
}

impl ApiClient {
    pub fn new(origin: impl Into<String>, config: AppConfig) -> Self {
        Self {
            origin: origin.into(),
            config,
        }
    }

    /// Client for the page this app was served from
    pub fn for_current_page(config: AppConfig) -> Self {
        let origin = leptos::prelude::window().location().origin().unwrap_or_default();
        Self::new(origin, config)
    }

    pub fn url(&self, path: &str) -> String {
        self.config.endpoint(&self.origin, path)
    }

    pub fn list_limit(&self) -> u32 {
        self.config.page_size()
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, ?query, "GET");
        let response = reqwest::Client::new()
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status.as_u16(), &body));
        }
        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Request `limit`-sized pages (`fetch_page(skip, limit)`) until `total`
/// items have arrived or the backend returns an empty page.
pub(crate) async fn collect_pages<T, F, Fut>(limit: u32, mut fetch_page: F) -> Result<Vec<T>, ApiError>
where
    F: FnMut(usize, u32) -> Fut,
    Fut: Future<Output = Result<ListResponse<T>, ApiError>>,
{
    let mut items = Vec::new();
    loop {
        let page = fetch_page(items.len(), limit).await?;
        let received = page.items.len();
        items.extend(page.items);
        if received == 0 || items.len() >= page.total {
            if items.len() < page.total {
                tracing::warn!(total = page.total, received = items.len(), "backend stopped paging early");
            }
            return Ok(items);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::ready;

    use futures::executor::block_on;

    use super::*;

    /// Backend holding `total` numbered rows
    fn page(total: usize, skip: usize, limit: u32) -> ListResponse<usize> {
        let end = total.min(skip + limit as usize);
        ListResponse { total, items: (skip.min(end)..end).collect() }
    }

    #[test]
    fn test_collect_pages_walks_skip() {
        let mut requests = Vec::new();
        let items = block_on(collect_pages(1000, |skip, limit| {
            requests.push((skip, limit));
            ready(Ok(page(2500, skip, limit)))
        }))
        .unwrap();
        assert_eq!(items.len(), 2500);
        assert_eq!(items[1000], 1000);
        assert_eq!(requests, vec![(0, 1000), (1000, 1000), (2000, 1000)]);
    }

    #[test]
    fn test_collect_pages_single_and_empty() {
        let mut calls = 0;
        let items = block_on(collect_pages(1000, |skip, limit| {
            calls += 1;
            ready(Ok(page(0, skip, limit)))
        }))
        .unwrap();
        assert!(items.is_empty());
        assert_eq!(calls, 1);

        let items = block_on(collect_pages(1000, |skip, limit| ready(Ok(page(10, skip, limit))))).unwrap();
        assert_eq!(items.len(), 10);
    }

    #[test]
    fn test_collect_pages_stops_on_short_backend() {
        // reports more rows than it ever returns
        let mut calls = 0;
        let items = block_on(collect_pages(2, |skip, _| {
            calls += 1;
            let items = if skip < 3 { vec![skip, skip + 1] } else { Vec::new() };
            ready(Ok(ListResponse { total: 10, items }))
        }))
        .unwrap();
        assert_eq!(items, vec![0, 1, 2, 3]);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_collect_pages_propagates_errors() {
        let result: Result<Vec<usize>, _> = block_on(collect_pages(1000, |skip, limit| {
            ready(if skip == 0 {
                Ok(page(1500, skip, limit))
            } else {
                Err(ApiError::Network("offline".into()))
            })
        }));
        assert_eq!(result, Err(ApiError::Network("offline".into())));
    }

    #[test]
    fn test_error_detail_string() {
        let err = ApiError::from_response(404, r#"{"detail": "Project not found"}"#);
        assert_eq!(err, ApiError::Status { status: 404, message: "Project not found".into() });
        assert_eq!(err.to_string(), "request failed (404): Project not found");
    }

    #[test]
    fn test_error_detail_list() {
        let err = ApiError::from_response(422, r#"{"detail": [{"msg": "field required"}]}"#);
        let ApiError::Status { message, .. } = err else {
            panic!("expected status error");
        };
        assert!(message.contains("field required"));
    }

    #[test]
    fn test_error_plain_body() {
        assert_eq!(
            ApiError::from_response(502, "Bad Gateway\n"),
            ApiError::Status { status: 502, message: "Bad Gateway".into() }
        );
        assert_eq!(
            ApiError::from_response(500, ""),
            ApiError::Status { status: 500, message: "no response body".into() }
        );
    }

    #[test]
    fn test_client_url() {
        let client = ApiClient::new("http://localhost:8000", AppConfig::default());
        assert_eq!(client.url("/wbs/"), "http://localhost:8000/api/wbs/");
        assert_eq!(client.list_limit(), 1000);

        let oversized = ApiClient::new("http://h", AppConfig { list_limit: 5000, ..Default::default() });
        assert_eq!(oversized.list_limit(), 1000);
    }
}
