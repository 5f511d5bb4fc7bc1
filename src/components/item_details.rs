//! Item Details Component

use leptos::prelude::*;
use leptos_router::components::A;

use item_console_core::{Item, ItemId, Route};

use super::item_card::group_badge_class;
use crate::browser::format_long_date;

#[component]
pub fn ItemDetails(
    item: Item,
    #[prop(into)] on_delete: Callback<ItemId>,
    #[prop(into)] deleting: Signal<bool>,
) -> impl IntoView {
    let id = item.id;

    view! {
        <article class="item-details">
            <header class="item-details-header">
                <h1>{item.name.clone()}</h1>
                <span class=group_badge_class(item.group)>{item.group.as_str()}</span>
            </header>
            <dl class="item-details-fields">
                <dt>"ID"</dt>
                <dd>{id}</dd>
                <dt>"Group"</dt>
                <dd>{item.group.as_str()}</dd>
                <dt>"Created"</dt>
                <dd>{format_long_date(&item.created_at)}</dd>
                <dt>"Last Updated"</dt>
                <dd>{format_long_date(&item.updated_at)}</dd>
            </dl>
            <div class="item-details-actions">
                <A href=Route::EditItem(id).path() attr:class="btn btn-primary">"Edit"</A>
                <button
                    class="btn btn-danger"
                    on:click=move |_| on_delete.run(id)
                    disabled=move || deleting.get()
                >
                    {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                </button>
            </div>
        </article>
    }
}
