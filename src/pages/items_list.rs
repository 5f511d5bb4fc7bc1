//! Items List Page
//!
//! Fetches every item once on mount. Search and group filtering happen in
//! memory; deletes remove rows locally without a refetch.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use item_console_core::{GroupFilter, ItemId, ItemListController, ItemListState, Liveness, Route};

use crate::browser::BrowserPrompt;
use crate::components::{Alert, ItemsList, Loader};
use crate::context::use_app_context;

#[component]
pub fn ItemsListPage() -> impl IntoView {
    let ctx = use_app_context();
    let controller = StoredValue::new(ItemListController::new(ctx.api()));
    let state = RwSignal::new(ItemListState::new());
    let alive = Liveness::new();
    on_cleanup({
        let alive = alive.clone();
        move || alive.cancel()
    });

    state.update(|s| s.begin_fetch());
    spawn_local({
        let alive = alive.clone();
        let ctl = controller.get_value();
        async move {
            let result = ctl.fetch_all().await;
            if alive.is_alive() {
                state.update(|s| s.finish_fetch(result));
            }
        }
    });

    let on_delete = Callback::new({
        let alive = alive.clone();
        move |id: ItemId| {
            let ctl = controller.get_value();
            let alive = alive.clone();
            spawn_local(async move {
                let Some(result) = ctl.delete_one(id, &BrowserPrompt).await else {
                    return;
                };
                if alive.is_alive() {
                    state.update(|s| s.finish_delete_one(id, &result));
                }
            });
        }
    });

    let delete_selected = Callback::new(move |_: ()| {
        let ids = state.with_untracked(|s| s.selected_ids());
        let ctl = controller.get_value();
        let alive = alive.clone();
        spawn_local(async move {
            let Some(result) = ctl.delete_many(&ids, &BrowserPrompt).await else {
                return;
            };
            if alive.is_alive() {
                state.update(|s| s.finish_delete_many(&ids, &result));
            }
        });
    });

    let multi_select = move || state.with(|s| s.is_multi_select());
    let selected_count = move || state.with(|s| s.selected_count());
    let plural = |n: usize| if n == 1 { "" } else { "s" };

    view! {
        <div class="page items-page">
            <div class="page-header">
                <header>
                    <h1>"Items"</h1>
                    <p class="page-subtitle">"Manage your collection of items"</p>
                </header>
                <div class="page-actions">
                    <button
                        class="btn btn-secondary"
                        on:click=move |_| state.update(|s| s.toggle_multi_select())
                    >
                        {move || if multi_select() { "Exit Select" } else { "Select Items" }}
                    </button>
                    <Show when={move || multi_select() && selected_count() > 0}>
                        <button class="btn btn-danger" on:click=move |_| delete_selected.run(())>
                            {move || {
                                let n = selected_count();
                                format!("Delete {} item{}", n, plural(n))
                            }}
                        </button>
                    </Show>
                    <A href=Route::NewItem.path() attr:class="btn btn-primary">"New Item"</A>
                </div>
            </div>

            {move || {
                state
                    .with(|s| s.error().map(str::to_string))
                    .map(|message| view! {
                        <Alert message=message on_close=move |_| state.update(|s| s.dismiss_error()) />
                    })
            }}

            <div class="filters">
                <input
                    type="search"
                    class="form-control search-input"
                    placeholder="Search items..."
                    prop:value=move || state.with(|s| s.search_term().to_string())
                    on:input=move |ev| state.update(|s| s.set_search_term(event_target_value(&ev)))
                />
                <select
                    class="form-control group-filter"
                    prop:value=move || state.with(|s| s.group_filter().value())
                    on:change=move |ev| {
                        let filter = GroupFilter::from_value(&event_target_value(&ev));
                        state.update(|s| s.set_group_filter(filter));
                    }
                >
                    {GroupFilter::OPTIONS
                        .iter()
                        .map(|f| view! { <option value=f.value()>{f.label()}</option> })
                        .collect_view()}
                </select>
            </div>

            <Show when=multi_select>
                <div class="selection-bar">
                    <button
                        class="btn btn-small"
                        on:click=move |_| state.update(|s| s.toggle_select_all())
                    >
                        {move || {
                            if state.with(|s| s.all_visible_selected()) {
                                "Deselect All"
                            } else {
                                "Select All"
                            }
                        }}
                    </button>
                    <Show when={move || selected_count() > 0}>
                        <span class="selection-count">
                            {move || {
                                let n = selected_count();
                                format!("{} item{} selected", n, plural(n))
                            }}
                        </span>
                    </Show>
                </div>
            </Show>

            <Show
                when=move || !state.with(|s| s.is_loading())
                fallback=|| view! { <Loader label="Loading items..." /> }
            >
                <Show when=move || state.with(|s| !s.filtered_items().is_empty())>
                    <p class="items-count">
                        {move || state.with(|s| {
                            format!("Showing {} of {} items", s.filtered_items().len(), s.items().len())
                        })}
                    </p>
                </Show>
                <ItemsList state=state on_delete=on_delete />
            </Show>
        </div>
    }
}
