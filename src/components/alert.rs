//! Alert Component

use leptos::prelude::*;

/// Inline error banner. Shows a dismiss button when `on_close` is given.
#[component]
pub fn Alert(
    #[prop(into)] message: String,
    #[prop(optional, into)] on_close: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="alert alert-error" role="alert">
            <span class="alert-message">{message}</span>
            {on_close.map(|on_close| view! {
                <button
                    class="alert-close"
                    aria-label="Dismiss"
                    on:click=move |_| on_close.run(())
                >
                    "×"
                </button>
            })}
        </div>
    }
}
