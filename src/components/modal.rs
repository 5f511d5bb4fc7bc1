//! Modal Component
//!
//! Centered dialog over a backdrop. Clicking the backdrop, the × or the
//! footer button closes it.

use leptos::prelude::*;

#[component]
pub fn Modal(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="modal-root">
                <div class="modal-backdrop" on:click=move |_| on_close.run(())></div>
                <div class="modal" role="dialog" aria-modal="true">
                    <div class="modal-header modal-header-error">
                        <h3>{title.clone()}</h3>
                        <button
                            class="modal-close"
                            aria-label="Close"
                            on:click=move |_| on_close.run(())
                        >
                            "×"
                        </button>
                    </div>
                    <div class="modal-body">{children()}</div>
                    <div class="modal-footer">
                        <button class="btn btn-primary" on:click=move |_| on_close.run(())>
                            "OK"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
