//! Item Console App
//!
//! Router shell: header plus one page per route.

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use item_console_core::AppConfig;

use crate::components::Header;
use crate::context::AppContext;
use crate::pages::{
    CreateItemPage, EditItemPage, ItemDetailPage, ItemsListPage, LogsPage, NotFoundPage,
};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    provide_context(AppContext::new(config));

    view! {
        <Router>
            <div class="app-layout">
                <Header />
                <main class="app-main">
                    <Routes fallback=|| view! { <NotFoundPage /> }>
                        <Route path=path!("/") view=ItemsListPage />
                        <Route path=path!("/items") view=ItemsListPage />
                        <Route path=path!("/items/new") view=CreateItemPage />
                        <Route path=path!("/items/:id") view=ItemDetailPage />
                        <Route path=path!("/items/:id/edit") view=EditItemPage />
                        <Route path=path!("/logs") view=LogsPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
