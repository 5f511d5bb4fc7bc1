//! Configuration
//!
//! One struct holding every service address, built once at startup.

use crate::models::ItemId;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;
pub const DEFAULT_LOG_PAGE_SIZE: u32 = 100;

/// Keys read by [`AppConfig::from_lookup`]
pub const ENV_API_BASE_URL: &str = "ITEM_CONSOLE_API_BASE_URL";
pub const ENV_LOGS_BASE_URL: &str = "ITEM_CONSOLE_LOGS_BASE_URL";
pub const ENV_LOG_LEVEL: &str = "ITEM_CONSOLE_LOG_LEVEL";
pub const ENV_POLL_INTERVAL_MS: &str = "ITEM_CONSOLE_POLL_INTERVAL_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base of the collections API, e.g. `http://localhost:8000/api`
    pub api_base_url: String,
    /// Base of the logs API; same origin as the collections API unless overridden
    pub logs_base_url: String,
    /// Console log level name (`debug`, `info`, ...)
    pub log_level: String,
    pub poll_interval_ms: u64,
    pub log_page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }
}

impl AppConfig {
    /// Config with both services under one base address
    pub fn with_base_url(base: &str) -> Self {
        let base = normalize_base(base);
        Self {
            logs_base_url: base.clone(),
            api_base_url: base,
            log_level: "info".to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            log_page_size: DEFAULT_LOG_PAGE_SIZE,
        }
    }

    /// Build from a key lookup (environment, build-time values, a map in tests).
    ///
    /// Missing keys keep their defaults; unparsable numbers are logged and
    /// ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = match get(ENV_API_BASE_URL) {
            Some(base) => Self::with_base_url(&base),
            None => Self::default(),
        };
        if let Some(logs) = get(ENV_LOGS_BASE_URL) {
            config.logs_base_url = normalize_base(&logs);
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            config.log_level = level.trim().to_lowercase();
        }
        if let Some(raw) = get(ENV_POLL_INTERVAL_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.poll_interval_ms = ms,
                _ => log::warn!("ignoring invalid {}={:?}", ENV_POLL_INTERVAL_MS, raw),
            }
        }
        config
    }

    pub fn collections_url(&self) -> String {
        format!("{}/collections/", self.api_base_url)
    }

    pub fn item_url(&self, id: ItemId) -> String {
        format!("{}/collections/{}/", self.api_base_url, id)
    }

    pub fn bulk_delete_url(&self) -> String {
        format!("{}/collections/bulk_delete/", self.api_base_url)
    }

    pub fn logs_url(&self) -> String {
        format!("{}/logs/", self.logs_base_url)
    }

    /// Newest-first page of logs
    pub fn logs_query_url(&self) -> String {
        format!(
            "{}?ordering=-timestamp&limit={}",
            self.logs_url(),
            self.log_page_size
        )
    }
}

fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}
