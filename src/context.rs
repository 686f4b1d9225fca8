//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use rolling_logger::LogBuffer;

use crate::commands::ApiClient;
use crate::config::AppConfig;

/// App-wide handles provided via context
#[derive(Clone)]
pub struct AppContext {
    /// Trigger to reload items from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload items from backend - write
    set_reload_trigger: WriteSignal<u32>,
    pub api: ApiClient,
    pub config: AppConfig,
    /// Recent log lines; absent when the logger failed to install
    pub logs: Option<LogBuffer>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        api: ApiClient,
        config: AppConfig,
        logs: Option<LogBuffer>,
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            api,
            config,
            logs,
        }
    }

    /// Trigger a reload of items
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn recent_logs(&self, n: usize) -> Vec<String> {
        self.logs.as_ref().map(|logs| logs.tail(n)).unwrap_or_default()
    }
}

/// Get the app context from context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
