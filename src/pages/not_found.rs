use leptos::prelude::*;
use leptos_router::components::A;

use crate::browser::history_back;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="page not-found">
            <h1>"404"</h1>
            <h2>"Page Not Found"</h2>
            <p>"The page you are looking for does not exist or has been moved."</p>
            <div class="not-found-actions">
                <button class="btn btn-secondary" on:click=move |_| history_back()>
                    "Go Back"
                </button>
                <A href="/" attr:class="btn btn-primary">"Home"</A>
            </div>
        </div>
    }
}
