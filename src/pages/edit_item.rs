//! Edit Item Page
//!
//! Loads the item named by the route, pre-fills the form, and saves a
//! partial update. An unparsable id never reaches the network.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use item_console_core::{
    ItemFormData, ItemPageController, ItemPageState, LoadPurpose, Liveness, PageView, Route,
};

use crate::components::{Alert, ItemForm, Loader};
use crate::context::{use_app_context, use_navigator};

#[component]
pub fn EditItemPage() -> impl IntoView {
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
                let result = ctl.load(id, LoadPurpose::Edit).await;
                if alive.is_alive() {
                    state.update(|s| {
                        s.finish_load(id, result);
                    });
                }
            });
        }
    });

    let on_submit = Callback::new(move |data: ItemFormData| {
        let Some(id) = state.with_untracked(|s| s.item().map(|item| item.id)) else {
            return;
        };
        if !state.try_update(|s| s.begin_save()).unwrap_or(false) {
            return;
        }
        let ctl = controller.get_value();
        let alive = alive.clone();
        spawn_local(async move {
            let result = ctl.update(id, &data).await;
            if !alive.is_alive() {
                return;
            }
            if let Some(route) = state.try_update(|s| s.finish_update(&result)).flatten() {
                navigator.go(route);
            }
        });
    });

    let page_view = Memo::new(move |_| state.with(|s| s.view()));

    view! {
        <div class="page page-narrow">
            {move || match page_view.get() {
                PageView::Loading => view! { <Loader label="Loading item..." /> }.into_any(),
                PageView::Failed(message) => view! {
                    <A href=Route::ItemList.path() attr:class="back-link">"← Back to Items"</A>
                    <Alert message=message />
                }
                .into_any(),
                PageView::Ready(None) => view! { <Alert message="Item not found" /> }.into_any(),
                PageView::Ready(Some(item)) => {
                    let id = item.id;
                    let subtitle = format!("Update the details for \"{}\"", item.name);
                    view! {
                        <A href=Route::ItemDetail(id).path() attr:class="back-link">"← Back to Item"</A>
                        <header>
                            <h1>"Edit Item"</h1>
                            <p class="page-subtitle">{subtitle}</p>
                        </header>
                        {move || {
                            state
                                .with(|s| s.error().map(|e| e.message.clone()))
                                .map(|message| view! {
                                    <Alert message=message on_close=move |_| state.update(|s| s.dismiss_error()) />
                                })
                        }}
                        <ItemForm
                            initial=item.form_data()
                            on_submit=on_submit
                            on_cancel=move |_| navigator.go(Route::ItemDetail(id))
                            loading=Signal::derive(move || state.with(|s| s.is_saving()))
                            server_error=Signal::derive(move || state.with(|s| s.error().cloned()))
                            submit_label="Update Item"
                        />
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
