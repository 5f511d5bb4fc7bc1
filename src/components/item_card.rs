//! Item Card Component

use leptos::prelude::*;
use leptos_router::components::A;

use item_console_core::{Group, Item, ItemId, Route};

use crate::browser::format_short_date;

pub(crate) fn group_badge_class(group: Group) -> &'static str {
    match group {
        Group::Primary => "group-badge group-primary",
        Group::Secondary => "group-badge group-secondary",
    }
}

/// One item in the list grid
///
/// The checkbox is only rendered in multi-select mode.
#[component]
pub fn ItemCard(
    item: Item,
    #[prop(into)] selected: Signal<bool>,
    #[prop(into)] show_checkbox: Signal<bool>,
    #[prop(into)] on_delete: Callback<ItemId>,
    #[prop(into)] on_select: Callback<(ItemId, bool)>,
) -> impl IntoView {
    let id = item.id;

    view! {
        <div class=move || if selected.get() { "item-card selected" } else { "item-card" }>
            <Show when=move || show_checkbox.get()>
                <label class="item-card-select">
                    <input
                        type="checkbox"
                        prop:checked=move || selected.get()
                        on:change=move |ev| on_select.run((id, event_target_checked(&ev)))
                    />
                </label>
            </Show>
            <div class="item-card-body">
                <h3 class="item-card-name">{item.name.clone()}</h3>
                <span class=group_badge_class(item.group)>{item.group.as_str()}</span>
                <p class="item-card-meta">"Created " {format_short_date(&item.created_at)}</p>
            </div>
            <div class="item-card-actions">
                <A href=Route::ItemDetail(id).path() attr:class="btn btn-small">"View"</A>
                <A href=Route::EditItem(id).path() attr:class="btn btn-small">"Edit"</A>
                <button
                    class="btn btn-small btn-danger"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_delete.run(id);
                    }
                >
                    "Delete"
                </button>
            </div>
        </div>
    }
}
