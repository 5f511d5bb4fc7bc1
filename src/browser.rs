//! Browser Helpers
//!
//! Thin wrappers over `window` APIs used by the pages.

use chrono::{DateTime, Utc};
use wasm_bindgen::JsValue;

use item_console_core::Prompt;

/// `window.confirm`; a missing window counts as "no"
pub struct BrowserPrompt;

impl Prompt for BrowserPrompt {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

pub fn history_back() {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        if let Err(err) = history.back() {
            log::warn!("history.back failed: {:?}", err);
        }
    }
}

/// Timestamp in the user's locale, e.g. for log rows
pub fn format_local_timestamp(ts: &DateTime<Utc>) -> String {
    let date = js_sys::Date::new(&JsValue::from_str(&ts.to_rfc3339()));
    date.to_locale_string("default", &JsValue::UNDEFINED).into()
}

/// `Jan 5, 2024`
pub fn format_short_date(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y").to_string()
}

/// `January 5, 2024 at 14:03`
pub fn format_long_date(ts: &DateTime<Utc>) -> String {
    ts.format("%B %-d, %Y at %H:%M").to_string()
}
