//! Page Controllers
//!
//! Detail, create and edit screens share one state machine:
//! `Idle -> Loading -> (Ready | NotFound | Failed)` and, for mutations,
//! `Ready -> Saving -> (Navigated | Ready with error)`. Only the most
//! recently requested load may land; a late answer for an older id is
//! dropped.

use serde_json::json;

use crate::api::{AuditEvent, AuditSink, ItemApi, ItemPatch, Prompt};
use crate::error::{ApiError, ApiResult, ServerError};
use crate::models::{Item, ItemFormData, ItemId};
use crate::routes::{parse_item_id, Route};

pub const INVALID_ID: &str = "Invalid item ID";
pub const NOT_FOUND: &str = "Item not found";
pub const FETCH_FAILED: &str = "Failed to fetch item";
pub const CREATE_FAILED: &str = "Failed to create item";
pub const UPDATE_FAILED: &str = "Failed to update item";
pub const DELETE_FAILED: &str = "Failed to delete item";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePhase {
    Idle,
    Loading,
    Ready,
    NotFound,
    Failed,
    Saving,
    Navigated,
}

/// What the screen should render. Changes only when the rendered layout
/// changes, so a page can memoize it without rebuilding its form on every
/// state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Loading,
    Failed(String),
    Ready(Option<Item>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemPageState {
    phase: PagePhase,
    item: Option<Item>,
    error: Option<ServerError>,
    loading_id: Option<ItemId>,
}

impl Default for ItemPageState {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemPageState {
    /// Detail and edit screens start idle until the id is known
    pub fn new() -> Self {
        Self {
            phase: PagePhase::Idle,
            item: None,
            error: None,
            loading_id: None,
        }
    }

    /// The create screen has nothing to fetch
    pub fn for_create() -> Self {
        Self {
            phase: PagePhase::Ready,
            ..Self::new()
        }
    }

    pub fn phase(&self) -> PagePhase {
        self.phase
    }

    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    pub fn error(&self) -> Option<&ServerError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, PagePhase::Idle | PagePhase::Loading)
    }

    pub fn is_saving(&self) -> bool {
        self.phase == PagePhase::Saving
    }

    /// Message for the terminal error view, when there is no item to show
    pub fn terminal_error(&self) -> Option<&str> {
        match self.phase {
            PagePhase::NotFound | PagePhase::Failed if self.item.is_none() => Some(
                self.error
                    .as_ref()
                    .map(|e| e.message.as_str())
                    .unwrap_or(NOT_FOUND),
            ),
            _ => None,
        }
    }

    pub fn view(&self) -> PageView {
        if self.is_loading() {
            return PageView::Loading;
        }
        match self.terminal_error() {
            Some(message) => PageView::Failed(message.to_string()),
            None => PageView::Ready(self.item.clone()),
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Parse the route parameter. An unparsable id is terminal and no
    /// request should be made.
    pub fn begin_load(&mut self, raw_id: &str) -> Option<ItemId> {
        match parse_item_id(raw_id) {
            Some(id) => {
                self.phase = PagePhase::Loading;
                self.error = None;
                self.loading_id = Some(id);
                Some(id)
            }
            None => {
                self.phase = PagePhase::Failed;
                self.item = None;
                self.loading_id = None;
                self.error = Some(ServerError::new(INVALID_ID));
                None
            }
        }
    }

    /// Apply the answer for `id`. Returns false, leaving the state alone,
    /// when a newer `begin_load` has superseded that request.
    pub fn finish_load(&mut self, id: ItemId, result: ApiResult<Item>) -> bool {
        if self.loading_id != Some(id) {
            log::debug!("dropping superseded load of item {}", id);
            return false;
        }
        self.loading_id = None;
        match result {
            Ok(item) => {
                self.phase = PagePhase::Ready;
                self.item = Some(item);
                self.error = None;
            }
            Err(ApiError::NotFound) => {
                self.phase = PagePhase::NotFound;
                self.item = None;
                self.error = Some(ServerError::new(NOT_FOUND));
            }
            Err(_) => {
                self.phase = PagePhase::Failed;
                self.item = None;
                self.error = Some(ServerError::new(FETCH_FAILED));
            }
        }
        true
    }

    /// Enter `Saving`. Refused unless the page is ready.
    pub fn begin_save(&mut self) -> bool {
        if self.phase != PagePhase::Ready {
            return false;
        }
        self.phase = PagePhase::Saving;
        self.error = None;
        true
    }

    /// Leave `Saving` without a request, e.g. a declined confirmation
    pub fn cancel_save(&mut self) {
        if self.phase == PagePhase::Saving {
            self.phase = PagePhase::Ready;
        }
    }

    pub fn finish_create(&mut self, result: &ApiResult<Item>) -> Option<Route> {
        self.finish_mutation(result.as_ref().map(|_| Route::ItemList), CREATE_FAILED, true)
    }

    /// On success navigates to the loaded item's detail page; on failure the
    /// loaded item is kept and the server message shown inline.
    pub fn finish_update(&mut self, result: &ApiResult<Item>) -> Option<Route> {
        let loaded_id = self.item.as_ref().map(|item| item.id);
        let outcome = result
            .as_ref()
            .map(|updated| Route::ItemDetail(loaded_id.unwrap_or(updated.id)));
        self.finish_mutation(outcome, UPDATE_FAILED, true)
    }

    pub fn finish_delete(&mut self, result: &ApiResult<()>) -> Option<Route> {
        self.finish_mutation(result.as_ref().map(|_| Route::ItemList), DELETE_FAILED, false)
    }

    fn finish_mutation(
        &mut self,
        outcome: Result<Route, &ApiError>,
        fallback: &str,
        use_server_message: bool,
    ) -> Option<Route> {
        match outcome {
            Ok(route) => {
                self.phase = PagePhase::Navigated;
                Some(route)
            }
            Err(err) => {
                self.phase = PagePhase::Ready;
                self.error = Some(if use_server_message {
                    ServerError::from_api(err, fallback)
                } else {
                    ServerError::new(fallback)
                });
                None
            }
        }
    }
}

/// Which screen is loading an item; only changes the audit wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPurpose {
    Detail,
    Edit,
}

/// Network side of the detail, create and edit screens
#[derive(Debug, Clone)]
pub struct ItemPageController<A> {
    api: A,
}

impl<A> ItemPageController<A>
where
    A: ItemApi + AuditSink,
{
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn load(&self, id: ItemId, purpose: LoadPurpose) -> ApiResult<Item> {
        let result = self.api.get_item(id).await;
        match (&result, purpose) {
            (Ok(_), LoadPurpose::Detail) => self.api.record(AuditEvent::info(
                format!("Loaded detail for item {}", id),
                json!({ "itemId": id }),
            )),
            (Ok(_), LoadPurpose::Edit) => self.api.record(AuditEvent::info(
                format!("Fetched item {} for edit", id),
                json!({ "itemId": id }),
            )),
            (Err(err), _) => {
                log::error!("fetching item {} failed: {}", id, err);
                let message = match purpose {
                    LoadPurpose::Detail => "Failed to fetch item",
                    LoadPurpose::Edit => "Failed to fetch item for edit",
                };
                self.api.record(AuditEvent::error(
                    message,
                    json!({ "itemId": id, "error": err.to_string() }),
                ));
            }
        }
        result
    }

    pub async fn create(&self, data: &ItemFormData) -> ApiResult<Item> {
        let result = self.api.create_item(data).await;
        match &result {
            Ok(item) => self.api.record(AuditEvent::info(
                format!("Created item {}", item.id),
                json!({ "formData": data }),
            )),
            Err(err) => {
                log::error!("creating item failed: {}", err);
                self.api.record(AuditEvent::error(
                    CREATE_FAILED,
                    json!({ "error": err.user_message(CREATE_FAILED), "formData": data }),
                ));
            }
        }
        result
    }

    pub async fn update(&self, id: ItemId, data: &ItemFormData) -> ApiResult<Item> {
        let result = self.api.update_item(id, &ItemPatch::from(data)).await;
        match &result {
            Ok(_) => self.api.record(AuditEvent::info(
                format!("Successfully updated item {}", id),
                json!({ "itemId": id, "formData": data }),
            )),
            Err(err) => {
                log::error!("updating item {} failed: {}", id, err);
                self.api.record(AuditEvent::error(
                    UPDATE_FAILED,
                    json!({ "itemId": id, "error": err.user_message(UPDATE_FAILED), "formData": data }),
                ));
            }
        }
        result
    }

    /// Delete after confirmation. `None` when the user declined.
    pub async fn delete(&self, id: ItemId, prompt: &dyn Prompt) -> Option<ApiResult<()>> {
        if !prompt.confirm("Are you sure you want to delete this item?") {
            return None;
        }
        let result = self.api.delete_item(id).await;
        match &result {
            Ok(()) => self.api.record(AuditEvent::warning(
                format!("Deleted item {}", id),
                json!({ "itemId": id }),
            )),
            Err(err) => {
                log::error!("deleting item {} failed: {}", id, err);
                self.api.record(AuditEvent::error(
                    format!("Failed to delete item {}", id),
                    json!({ "itemId": id, "error": err.to_string() }),
                ));
            }
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{duplicate_message, ItemFormState};
    use crate::models::{Group, LogLevel};
    use crate::testing::{item, Answer, FakeApi};
    use crate::validation::Field;

    #[test]
    fn test_invalid_id_is_terminal() {
        let mut state = ItemPageState::new();
        assert!(state.is_loading());
        assert_eq!(state.begin_load("abc"), None);
        assert_eq!(state.phase(), PagePhase::Failed);
        assert_eq!(state.terminal_error(), Some("Invalid item ID"));
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_not_found_maps_to_message() {
        let api = FakeApi::new();
        let ctl = ItemPageController::new(api.clone());
        let mut state = ItemPageState::new();

        let id = state.begin_load("999").unwrap();
        state.finish_load(id, ctl.load(id, LoadPurpose::Detail).await);

        assert_eq!(state.phase(), PagePhase::NotFound);
        assert_eq!(state.error().unwrap().message, "Item not found");
        assert!(state.item().is_none());
        assert_eq!(api.audit_events()[0].level, LogLevel::Error);
    }

    #[tokio::test]
    async fn test_other_failures_are_generic() {
        let api = FakeApi::with_items(vec![item(5, "Widget", Group::Primary)]);
        api.fail_items(true);
        let ctl = ItemPageController::new(api.clone());
        let mut state = ItemPageState::new();

        let id = state.begin_load("5").unwrap();
        state.finish_load(id, ctl.load(id, LoadPurpose::Edit).await);
        assert_eq!(state.terminal_error(), Some("Failed to fetch item"));
        assert_eq!(api.audit_events()[0].message, "Failed to fetch item for edit");
    }

    #[tokio::test]
    async fn test_load_success() {
        let api = FakeApi::with_items(vec![item(5, "Widget", Group::Primary)]);
        let ctl = ItemPageController::new(api.clone());
        let mut state = ItemPageState::new();

        let id = state.begin_load("5").unwrap();
        state.finish_load(id, ctl.load(id, LoadPurpose::Detail).await);
        assert_eq!(state.phase(), PagePhase::Ready);
        assert_eq!(state.item().unwrap().name, "Widget");
        assert_eq!(api.audit_events()[0].message, "Loaded detail for item 5");
    }

    #[tokio::test]
    async fn test_create_navigates_to_list() {
        let api = FakeApi::new();
        let ctl = ItemPageController::new(api.clone());
        let mut state = ItemPageState::for_create();
        let mut form = ItemFormState::new(None);
        form.set_value(Field::Name, " Widget ".into());

        let payload = form.submit().unwrap();
        assert!(state.begin_save());
        assert!(state.is_saving());
        let result = ctl.create(&payload).await;
        let route = state.finish_create(&result);

        assert_eq!(route, Some(Route::ItemList));
        assert_eq!(route.unwrap().path(), "/items");
        assert_eq!(api.items()[0].name, "Widget");
    }

    #[tokio::test]
    async fn test_duplicate_create_opens_modal() {
        let api = FakeApi::with_items(vec![item(1, "Widget", Group::Primary)]);
        let ctl = ItemPageController::new(api.clone());
        let mut state = ItemPageState::for_create();
        let mut form = ItemFormState::new(Some(ItemFormData::new("Widget", "Primary")));

        let payload = form.submit().unwrap();
        state.begin_save();
        let result = ctl.create(&payload).await;
        assert_eq!(state.finish_create(&result), None);

        let error = state.error().unwrap();
        assert!(error.message.contains("already exists"));
        assert!(error.duplicate);
        assert_eq!(state.phase(), PagePhase::Ready);
        assert_eq!(
            duplicate_message(form.data()),
            "An item named \"Widget\" already exists in the Primary group."
        );
    }

    #[tokio::test]
    async fn test_update_navigates_to_detail() {
        let api = FakeApi::with_items(vec![item(8, "Widget", Group::Primary)]);
        let ctl = ItemPageController::new(api.clone());
        let mut state = ItemPageState::new();
        let id = state.begin_load("8").unwrap();
        state.finish_load(id, ctl.load(id, LoadPurpose::Edit).await);

        let mut form = ItemFormState::new(state.item().map(Item::form_data));
        form.set_value(Field::Group, "Secondary".into());
        let payload = form.submit().unwrap();

        state.begin_save();
        let result = ctl.update(id, &payload).await;
        assert_eq!(state.finish_update(&result), Some(Route::ItemDetail(8)));
        assert_eq!(api.items()[0].group, Group::Secondary);
    }

    #[tokio::test]
    async fn test_update_failure_keeps_item() {
        let api = FakeApi::with_items(vec![item(8, "Widget", Group::Primary)]);
        let ctl = ItemPageController::new(api.clone());
        let mut state = ItemPageState::new();
        let id = state.begin_load("8").unwrap();
        state.finish_load(id, ctl.load(id, LoadPurpose::Edit).await);

        api.reject_with(400, serde_json::json!({ "detail": "Name contains forbidden words" }));
        state.begin_save();
        let result = ctl.update(id, &ItemFormData::new("Bad", "Primary")).await;
        assert_eq!(state.finish_update(&result), None);

        assert_eq!(state.item().unwrap().id, 8);
        assert_eq!(state.error().unwrap().message, "Name contains forbidden words");
        assert!(!state.error().unwrap().duplicate);
        assert_eq!(state.terminal_error(), None);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let api = FakeApi::with_items(vec![item(3, "Widget", Group::Primary)]);
        let ctl = ItemPageController::new(api.clone());
        assert!(ctl.delete(3, &Answer(false)).await.is_none());
        assert!(api.deleted_ids().is_empty());

        let mut state = ItemPageState::new();
        state.begin_load("3");
        state.finish_load(3, Ok(item(3, "Widget", Group::Primary)));
        let result = ctl.delete(3, &Answer(true)).await.unwrap();
        assert_eq!(state.finish_delete(&result), Some(Route::ItemList));
        assert_eq!(api.audit_events().last().unwrap().level, LogLevel::Warning);
    }

    #[tokio::test]
    async fn test_delete_failure_stays() {
        let api = FakeApi::with_items(vec![item(3, "Widget", Group::Primary)]);
        api.fail_items(true);
        let ctl = ItemPageController::new(api.clone());
        let mut state = ItemPageState::new();
        state.begin_load("3");
        state.finish_load(3, Ok(item(3, "Widget", Group::Primary)));

        let result = ctl.delete(3, &Answer(true)).await.unwrap();
        assert_eq!(state.finish_delete(&result), None);
        assert_eq!(state.error().unwrap().message, "Failed to delete item");
        assert!(state.item().is_some());
    }

    #[test]
    fn test_view_stable_across_save() {
        let mut state = ItemPageState::new();
        assert_eq!(state.view(), PageView::Loading);
        state.begin_load("8");
        assert_eq!(state.view(), PageView::Loading);
        state.finish_load(8, Ok(item(8, "Widget", Group::Primary)));
        let ready = state.view();
        assert!(matches!(&ready, PageView::Ready(Some(i)) if i.id == 8));

        state.begin_save();
        assert_eq!(state.view(), ready);
        state.finish_update(&Err(ApiError::Network("offline".into())));
        assert_eq!(state.view(), ready);

        let mut missing = ItemPageState::new();
        missing.begin_load("8");
        missing.finish_load(8, Err(ApiError::NotFound));
        assert_eq!(missing.view(), PageView::Failed("Item not found".into()));
        assert_eq!(ItemPageState::for_create().view(), PageView::Ready(None));
    }

    #[test]
    fn test_superseded_load_is_dropped() {
        let mut state = ItemPageState::new();
        assert_eq!(state.begin_load("1"), Some(1));
        assert_eq!(state.begin_load("2"), Some(2));

        assert!(state.finish_load(2, Ok(item(2, "Second", Group::Primary))));
        assert!(!state.finish_load(1, Ok(item(1, "First", Group::Primary))));
        assert_eq!(state.item().unwrap().id, 2);
        assert_eq!(state.phase(), PagePhase::Ready);

        // a stale failure must not wipe the current item either
        state.begin_load("3");
        assert!(!state.finish_load(2, Err(ApiError::NotFound)));
        assert!(state.is_loading());
        assert!(state.finish_load(3, Ok(item(3, "Third", Group::Secondary))));
        assert_eq!(state.item().unwrap().id, 3);
    }

    #[test]
    fn test_load_after_invalid_id_is_dropped() {
        let mut state = ItemPageState::new();
        let id = state.begin_load("4").unwrap();
        assert_eq!(state.begin_load("oops"), None);
        assert!(!state.finish_load(id, Ok(item(4, "Widget", Group::Primary))));
        assert_eq!(state.terminal_error(), Some("Invalid item ID"));
    }

    #[tokio::test]
    async fn test_delete_holds_saving_until_answered() {
        let api = FakeApi::with_items(vec![item(3, "Widget", Group::Primary)]);
        let ctl = ItemPageController::new(api.clone());
        let mut state = ItemPageState::new();
        state.begin_load("3");
        state.finish_load(3, Ok(item(3, "Widget", Group::Primary)));

        assert!(state.begin_save());
        assert!(!state.begin_save());
        assert!(ctl.delete(3, &Answer(false)).await.is_none());
        state.cancel_save();
        assert_eq!(state.phase(), PagePhase::Ready);
        assert!(api.deleted_ids().is_empty());

        assert!(state.begin_save());
        let result = ctl.delete(3, &Answer(true)).await.unwrap();
        assert_eq!(state.finish_delete(&result), Some(Route::ItemList));
        assert_eq!(api.deleted_ids(), vec![3]);
    }

    #[test]
    fn test_save_refused_unless_ready() {
        let mut state = ItemPageState::new();
        assert!(!state.begin_save());
        state.begin_load("x");
        assert!(!state.begin_save());
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_change_outcome() {
        let api = FakeApi::new();
        api.fail_log_writes(true);
        let ctl = ItemPageController::new(api.clone());
        let mut state = ItemPageState::for_create();
        state.begin_save();
        let result = ctl.create(&ItemFormData::new("Widget", "Primary")).await;
        assert_eq!(state.finish_create(&result), Some(Route::ItemList));
    }
}
