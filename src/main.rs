//! WBS Tracker Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod models;
mod store;
mod tree;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let logs = match rolling_logger::init(&config.logger()) {
        Ok(buffer) => Some(buffer),
        Err(e) => {
            leptos::logging::error!("logger setup failed: {e}");
            None
        }
    };
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "invalid inline config, using defaults");
    }
    tracing::info!(api_base = %config.api_base, "starting WBS tracker");

    mount_to_body(move || view! { <App config=config.clone() logs=logs.clone() /> });
}
