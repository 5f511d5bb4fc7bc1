//! Items List Component
//!
//! Grid of item cards for the current filter, or an empty state.

use leptos::prelude::*;

use item_console_core::{Item, ItemId, ItemListState};

use super::ItemCard;

#[component]
pub fn ItemsList(
    state: RwSignal<ItemListState>,
    #[prop(into)] on_delete: Callback<ItemId>,
) -> impl IntoView {
    let has_items = move || state.with(|s| !s.filtered_items().is_empty());
    let on_select = Callback::new(move |(id, checked): (ItemId, bool)| {
        state.update(|s| s.toggle_select(id, checked))
    });
    let multi_select = Signal::derive(move || state.with(|s| s.is_multi_select()));

    view! {
        <Show
            when=has_items
            fallback=|| view! {
                <div class="empty-state">
                    <p>"No items found"</p>
                </div>
            }
        >
            <div class="items-grid">
                <For
                    each=move || state.with(|s| s.filtered_items().to_vec())
                    key=|item: &Item| (item.id, item.updated_at)
                    children=move |item: Item| {
                        let id = item.id;
                        view! {
                            <ItemCard
                                item=item
                                selected=Signal::derive(move || state.with(|s| s.is_selected(id)))
                                show_checkbox=multi_select
                                on_delete=on_delete
                                on_select=on_select
                            />
                        }
                    }
                />
            </div>
        </Show>
    }
}
