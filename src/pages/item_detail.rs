//! Item Detail Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use item_console_core::{
    ItemId, ItemPageController, ItemPageState, LoadPurpose, Liveness, PageView, Route,
};

use crate::browser::BrowserPrompt;
use crate::components::{Alert, ItemDetails, Loader};
use crate::context::{use_app_context, use_navigator};

#[component]
pub fn ItemDetailPage() -> impl IntoView {
    let ctx = use_app_context();
    let navigator = use_navigator();
    let params = use_params_map();
    let controller = StoredValue::new(ItemPageController::new(ctx.api()));
    let state = RwSignal::new(ItemPageState::new());
    let alive = Liveness::new();
    on_cleanup({
        let alive = alive.clone();
        move || alive.cancel()
    });

    Effect::new({
        let alive = alive.clone();
        move |_| {
            let raw = params.with(|p| p.get("id")).unwrap_or_default();
            let Some(id) = state.try_update(|s| s.begin_load(&raw)).flatten() else {
                return;
            };
            let ctl = controller.get_value();
            let alive = alive.clone();
            spawn_local(async move {
                let result = ctl.load(id, LoadPurpose::Detail).await;
                if alive.is_alive() {
                    state.update(|s| {
                        s.finish_load(id, result);
                    });
                }
            });
        }
    });

    let on_delete = Callback::new(move |id: ItemId| {
        if !state.try_update(|s| s.begin_save()).unwrap_or(false) {
            return;
        }
        let ctl = controller.get_value();
        let alive = alive.clone();
        spawn_local(async move {
            let Some(result) = ctl.delete(id, &BrowserPrompt).await else {
                if alive.is_alive() {
                    state.update(|s| s.cancel_save());
                }
                return;
            };
            if !alive.is_alive() {
                return;
            }
            if let Some(route) = state.try_update(|s| s.finish_delete(&result)).flatten() {
                navigator.go(route);
            }
        });
    });

    let page_view = Memo::new(move |_| state.with(|s| s.view()));

    view! {
        <div class="page page-narrow">
            <A href=Route::ItemList.path() attr:class="back-link">"← Back to Items"</A>
            {move || match page_view.get() {
                PageView::Loading => view! { <Loader label="Loading item..." /> }.into_any(),
                PageView::Failed(message) => view! { <Alert message=message /> }.into_any(),
                PageView::Ready(None) => view! { <Alert message="Item not found" /> }.into_any(),
                PageView::Ready(Some(item)) => view! {
                    {move || {
                        state
                            .with(|s| s.error().map(|e| e.message.clone()))
                            .map(|message| view! {
                                <Alert message=message on_close=move |_| state.update(|s| s.dismiss_error()) />
                            })
                    }}
                    <ItemDetails
                        item=item
                        on_delete=on_delete
                        deleting=Signal::derive(move || state.with(|s| s.is_saving()))
                    />
                }
                .into_any(),
            }}
        </div>
    }
}
