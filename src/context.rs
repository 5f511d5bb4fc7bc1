//! Application Context
//!
//! Services provided to every page via Leptos Context API.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use item_console_core::{AppConfig, Route};

use crate::api::HttpApi;

/// App-wide services, built once at startup
#[derive(Clone)]
pub struct AppContext {
    api: HttpApi,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            api: HttpApi::new(config),
        }
    }

    /// Shared HTTP client (clone per controller)
    pub fn api(&self) -> HttpApi {
        self.api.clone()
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}

/// Copyable handle on the router's navigate function
#[derive(Clone, Copy)]
pub struct Navigator(StoredValue<Box<dyn Fn(&str)>, LocalStorage>);

impl Navigator {
    pub fn go(&self, route: Route) {
        let path = route.path();
        log::debug!("navigating to {}", path);
        // A disposed handle means the page is already gone
        let _ = self.0.try_with_value(|navigate| navigate(&path));
    }
}

/// Must be called inside a `<Router>`
pub fn use_navigator() -> Navigator {
    let navigate = use_navigate();
    let navigate: Box<dyn Fn(&str)> =
        Box::new(move |path: &str| navigate(path, NavigateOptions::default()));
    Navigator(StoredValue::new_local(navigate))
}
