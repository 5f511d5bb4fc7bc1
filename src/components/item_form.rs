//! Item Form Component
//!
//! Shared by the create and edit pages. Field errors appear once a field
//! has been touched; submitting touches every field. A duplicate-name
//! rejection from the server also opens a blocking modal.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use item_console_core::{
    duplicate_message, Field, Group, ItemFormData, ItemFormState, ServerError, NAME_MAX_CHARS,
};

use super::Modal;

fn field_class(form: RwSignal<ItemFormState>, field: Field) -> &'static str {
    if form.with(|f| f.visible_error(field).is_some()) {
        "form-control invalid"
    } else {
        "form-control"
    }
}

#[component]
pub fn ItemForm(
    #[prop(optional)] initial: Option<ItemFormData>,
    #[prop(into)] on_submit: Callback<ItemFormData>,
    #[prop(into)] on_cancel: Callback<()>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] server_error: Signal<Option<ServerError>>,
    #[prop(into)] submit_label: String,
) -> impl IntoView {
    let form = RwSignal::new(ItemFormState::new(initial));
    let (show_duplicate, set_show_duplicate) = signal(false);

    Effect::new(move |_| {
        if server_error.with(|e| e.as_ref().is_some_and(|e| e.duplicate)) {
            set_show_duplicate.set(true);
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        match form.try_update(|f| f.submit()) {
            Some(Ok(data)) => on_submit.run(data),
            Some(Err(errors)) => log::debug!("form has {} invalid fields", errors.len()),
            None => {}
        }
    };

    let summary = move || {
        let messages = form.with(|f| f.summary());
        (!messages.is_empty()).then(|| {
            view! {
                <div class="form-summary" role="alert">
                    <h3>"Please fix the following errors:"</h3>
                    <ul>
                        {messages.into_iter().map(|m| view! { <li>{m}</li> }).collect_view()}
                    </ul>
                </div>
            }
        })
    };

    let field_error = move |field: Field| {
        move || {
            form.with(|f| f.visible_error(field))
                .map(|message| view! { <p class="field-error">{message}</p> })
        }
    };

    view! {
        <form class="item-form" on:submit=handle_submit novalidate>
            {summary}

            <div class="form-group">
                <label for="name">"Item Name " <span class="required">"*"</span></label>
                <input
                    type="text"
                    id="name"
                    name="name"
                    placeholder="Enter item name"
                    maxlength="101"
                    class=move || field_class(form, Field::Name)
                    prop:value=move || form.with(|f| f.value(Field::Name).to_string())
                    on:input=move |ev| form.update(|f| f.set_value(Field::Name, event_target_value(&ev)))
                    on:blur=move |_| form.update(|f| f.blur(Field::Name))
                    disabled=move || loading.get()
                />
                <div class=move || if form.with(|f| f.name_too_long()) { "char-count over" } else { "char-count" }>
                    {move || format!("{}/{}", form.with(|f| f.name_char_count()), NAME_MAX_CHARS)}
                </div>
                {field_error(Field::Name)}
            </div>

            <div class="form-group">
                <label for="group">"Group " <span class="required">"*"</span></label>
                <select
                    id="group"
                    name="group"
                    class=move || field_class(form, Field::Group)
                    prop:value=move || form.with(|f| f.value(Field::Group).to_string())
                    on:change=move |ev| form.update(|f| f.set_value(Field::Group, event_target_value(&ev)))
                    on:blur=move |_| form.update(|f| f.blur(Field::Group))
                    disabled=move || loading.get()
                >
                    <option value="">"Select a group"</option>
                    {Group::ALL
                        .iter()
                        .map(|g| view! { <option value=g.as_str()>{g.as_str()}</option> })
                        .collect_view()}
                </select>
                {field_error(Field::Group)}
            </div>

            <div class="form-actions">
                <button
                    type="button"
                    class="btn btn-secondary"
                    on:click=move |_| on_cancel.run(())
                    disabled=move || loading.get()
                >
                    "Cancel"
                </button>
                <button
                    type="submit"
                    class="btn btn-primary"
                    disabled=move || loading.get() || !form.with(|f| f.is_valid())
                >
                    {move || if loading.get() { "Saving...".to_string() } else { submit_label.clone() }}
                </button>
            </div>
        </form>

        <Modal
            open=show_duplicate
            title="Duplicate Item Name"
            on_close=move |_| set_show_duplicate.set(false)
        >
            <p>{move || form.with(|f| duplicate_message(f.data()))}</p>
            <p class="modal-hint">
                "Each group can only contain items with unique names. Please choose a different name or select a different group."
            </p>
        </Modal>
    }
}
