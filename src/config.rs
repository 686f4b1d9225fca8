//! Application Configuration
//!
//! Read once at startup from an inline JSON block in `index.html`:
//! `<script type="application/json" id="app-config">{ ... }</script>`.
//! Missing fields keep their defaults.

use rolling_logger::RollingLoggerConfig;
use serde::{Deserialize, Serialize};

/// Element id of the inline config block
pub const CONFIG_ELEMENT_ID: &str = "app-config";

/// Largest `limit` the backend accepts on list endpoints
pub const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path prefix of the REST backend, relative to the page origin
    pub api_base: String,
    /// Page size for list requests, clamped to `1..=MAX_PAGE_SIZE`
    pub list_limit: u32,
    /// Expand every parent the first time a project's tree loads
    pub auto_expand_on_load: bool,
    pub log_buffer_lines: usize,
    pub log_level: String,
    /// Project selected when the page opens
    pub default_project: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "/api".to_string(),
            list_limit: 1000,
            auto_expand_on_load: true,
            log_buffer_lines: 500,
            log_level: "info".to_string(),
            default_project: None,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Inline config if present, defaults otherwise
    pub fn load() -> Result<Self, serde_json::Error> {
        match read_inline_config() {
            Some(json) if !json.trim().is_empty() => Self::from_json(&json),
            _ => Ok(Self::default()),
        }
    }

    /// `list_limit` as the backend will accept it
    pub fn page_size(&self) -> u32 {
        self.list_limit.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn logger(&self) -> RollingLoggerConfig {
        RollingLoggerConfig {
            capacity: self.log_buffer_lines,
            level: self.log_level.clone(),
        }
    }

    /// Absolute endpoint URL: `origin` + `api_base` + `path`
    pub fn endpoint(&self, origin: &str, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let origin = origin.trim_end_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            format!("{base}/{path}")
        } else if base.is_empty() {
            format!("{origin}/{path}")
        } else {
            format!("{origin}/{}/{path}", base.trim_start_matches('/'))
        }
    }
}

fn read_inline_config() -> Option<String> {
    let element = leptos::prelude::document().get_element_by_id(CONFIG_ELEMENT_ID)?;
    element.text_content()
}
