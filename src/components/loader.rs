//! Loader Component

use leptos::prelude::*;

#[component]
pub fn Loader(#[prop(into, default = "Loading...".to_string())] label: String) -> impl IntoView {
    view! {
        <div class="loader" role="status">
            <div class="spinner"></div>
            <span class="loader-label">{label}</span>
        </div>
    }
}
