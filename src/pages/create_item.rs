//! Create Item Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use item_console_core::{ItemFormData, ItemPageController, ItemPageState, Liveness, Route};

use crate::components::{Alert, ItemForm};
use crate::context::{use_app_context, use_navigator};

#[component]
pub fn CreateItemPage() -> impl IntoView {
    let ctx = use_app_context();
    let navigator = use_navigator();
    let controller = StoredValue::new(ItemPageController::new(ctx.api()));
    let state = RwSignal::new(ItemPageState::for_create());
    let alive = Liveness::new();
    on_cleanup({
        let alive = alive.clone();
        move || alive.cancel()
    });

    let on_submit = Callback::new(move |data: ItemFormData| {
        if !state.try_update(|s| s.begin_save()).unwrap_or(false) {
            return;
        }
        let ctl = controller.get_value();
        let alive = alive.clone();
        spawn_local(async move {
            let result = ctl.create(&data).await;
            if !alive.is_alive() {
                return;
            }
            if let Some(route) = state.try_update(|s| s.finish_create(&result)).flatten() {
                navigator.go(route);
            }
        });
    });

    view! {
        <div class="page page-narrow">
            <A href=Route::ItemList.path() attr:class="back-link">"← Back to Items"</A>
            <header>
                <h1>"Create New Item"</h1>
                <p class="page-subtitle">"Add a new item to your collection"</p>
            </header>
            {move || {
                state
                    .with(|s| s.error().map(|e| e.message.clone()))
                    .map(|message| view! {
                        <Alert message=message on_close=move |_| state.update(|s| s.dismiss_error()) />
                    })
            }}
            <ItemForm
                on_submit=on_submit
                on_cancel=move |_| navigator.go(Route::ItemList)
                loading=Signal::derive(move || state.with(|s| s.is_saving()))
                server_error=Signal::derive(move || state.with(|s| s.error().cloned()))
                submit_label="Create Item"
            />
        </div>
    }
}
