//! Item Console Frontend Entry Point

mod api;
mod app;
mod browser;
mod components;
mod context;
mod pages;

use app::App;
use item_console_core::config::{
    ENV_API_BASE_URL, ENV_LOGS_BASE_URL, ENV_LOG_LEVEL, ENV_POLL_INTERVAL_MS,
};
use item_console_core::AppConfig;
use leptos::prelude::*;

/// Deployment settings are baked in at build time; there is no process
/// environment in the browser.
fn build_env(key: &str) -> Option<String> {
    let value = match key {
        ENV_API_BASE_URL => option_env!("ITEM_CONSOLE_API_BASE_URL"),
        ENV_LOGS_BASE_URL => option_env!("ITEM_CONSOLE_LOGS_BASE_URL"),
        ENV_LOG_LEVEL => option_env!("ITEM_CONSOLE_LOG_LEVEL"),
        ENV_POLL_INTERVAL_MS => option_env!("ITEM_CONSOLE_POLL_INTERVAL_MS"),
        _ => None,
    };
    value.map(str::to_string)
}

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_lookup(build_env);
    if let Err(err) = console_logger::init(console_logger::parse_level(&config.log_level)) {
        web_sys::console::error_1(&format!("logger already set: {}", err).into());
    }
    log::info!("item console starting against {}", config.api_base_url);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
