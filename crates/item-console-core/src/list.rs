//! Item List Controller
//!
//! Collection cache, search/group filtering and multi-select for the list
//! screen. Network calls live on [`ItemListController`]; their results are
//! folded into [`ItemListState`] only after they resolve.

use std::collections::BTreeSet;

use serde_json::json;

use crate::api::{AuditEvent, AuditSink, ItemApi, Prompt};
use crate::error::ApiResult;
use crate::models::{BulkDeleteResponse, Group, Item, ItemId};

const FETCH_FAILED: &str = "Failed to fetch items";
const DELETE_FAILED: &str = "Failed to delete item";
const BULK_DELETE_FAILED: &str = "Failed to delete items";

/// Group filter of the list screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupFilter {
    #[default]
    All,
    Only(Group),
}

impl GroupFilter {
    pub const OPTIONS: [GroupFilter; 3] = [
        GroupFilter::All,
        GroupFilter::Only(Group::Primary),
        GroupFilter::Only(Group::Secondary),
    ];

    /// Select-box value: `all` or a group's wire name
    pub fn value(&self) -> &'static str {
        match self {
            GroupFilter::All => "all",
            GroupFilter::Only(group) => group.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupFilter::All => "All Groups",
            GroupFilter::Only(group) => group.as_str(),
        }
    }

    /// Unknown values fall back to `All`
    pub fn from_value(value: &str) -> Self {
        Group::parse(value).map(GroupFilter::Only).unwrap_or(GroupFilter::All)
    }

    pub fn matches(&self, item: &Item) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Only(group) => item.group == *group,
        }
    }
}

/// Case-insensitive substring search plus group filter.
///
/// A blank search term matches everything.
pub fn filter_items(items: &[Item], search_term: &str, group: GroupFilter) -> Vec<Item> {
    let needle = search_term.to_lowercase();
    let search = !search_term.trim().is_empty();
    items
        .iter()
        .filter(|item| !search || item.name.to_lowercase().contains(&needle))
        .filter(|item| group.matches(item))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemListState {
    items: Vec<Item>,
    filtered: Vec<Item>,
    search_term: String,
    group_filter: GroupFilter,
    selected: BTreeSet<ItemId>,
    multi_select: bool,
    loading: bool,
    error: Option<String>,
}

impl Default for ItemListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemListState {
    /// Initial state: loading, nothing fetched yet
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            group_filter: GroupFilter::All,
            selected: BTreeSet::new(),
            multi_select: false,
            loading: true,
            error: None,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items visible under the current search term and group filter
    pub fn filtered_items(&self) -> &[Item] {
        &self.filtered
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn group_filter(&self) -> GroupFilter {
        self.group_filter
    }

    pub fn selected_ids(&self) -> Vec<ItemId> {
        self.selected.iter().copied().collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_multi_select(&self) -> bool {
        self.multi_select
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_fetch(&mut self, result: ApiResult<Vec<Item>>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
                self.refilter();
            }
            Err(_) => self.error = Some(FETCH_FAILED.to_string()),
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.refilter();
    }

    pub fn set_group_filter(&mut self, filter: GroupFilter) {
        self.group_filter = filter;
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter_items(&self.items, &self.search_term, self.group_filter);
    }

    pub fn finish_delete_one(&mut self, id: ItemId, result: &ApiResult<()>) {
        match result {
            Ok(()) => {
                self.items.retain(|item| item.id != id);
                self.selected.remove(&id);
                self.refilter();
            }
            Err(_) => self.error = Some(DELETE_FAILED.to_string()),
        }
    }

    /// Apply a bulk delete. The endpoint is treated as all-or-nothing: on
    /// success every requested id is dropped.
    pub fn finish_delete_many(&mut self, ids: &[ItemId], result: &ApiResult<BulkDeleteResponse>) {
        match result {
            Ok(_) => {
                self.items.retain(|item| !ids.contains(&item.id));
                self.selected.clear();
                self.multi_select = false;
                self.refilter();
            }
            Err(_) => self.error = Some(BULK_DELETE_FAILED.to_string()),
        }
    }

    pub fn toggle_select(&mut self, id: ItemId, selected: bool) {
        if selected {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
    }

    /// True when the selection size equals the visible count. Drives both
    /// the Select All / Deselect All label and its toggle.
    pub fn all_visible_selected(&self) -> bool {
        self.selected.len() == self.filtered.len()
    }

    /// Deselect everything, or select exactly the visible items
    pub fn toggle_select_all(&mut self) {
        if self.all_visible_selected() {
            self.selected.clear();
        } else {
            self.selected = self.filtered.iter().map(|item| item.id).collect();
        }
    }

    /// Flip multi-select mode. The selection never survives a toggle.
    pub fn toggle_multi_select(&mut self) {
        self.multi_select = !self.multi_select;
        self.selected.clear();
    }
}

/// Network side of the list screen
#[derive(Debug, Clone)]
pub struct ItemListController<A> {
    api: A,
}

impl<A> ItemListController<A>
where
    A: ItemApi + AuditSink,
{
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn fetch_all(&self) -> ApiResult<Vec<Item>> {
        let result = self.api.list_items().await;
        match &result {
            Ok(items) => self
                .api
                .record(AuditEvent::info("Fetched items list", json!({ "count": items.len() }))),
            Err(err) => {
                log::error!("fetching items failed: {}", err);
                self.api.record(AuditEvent::error(
                    "Error fetching items list",
                    json!({ "error": err.to_string() }),
                ));
            }
        }
        result
    }

    /// Delete one item after confirmation. `None` when the user declined.
    pub async fn delete_one(&self, id: ItemId, prompt: &dyn Prompt) -> Option<ApiResult<()>> {
        if !prompt.confirm("Are you sure you want to delete this item?") {
            return None;
        }
        let result = self.api.delete_item(id).await;
        match &result {
            Ok(()) => self.api.record(AuditEvent::warning(
                format!("Deleted item {} from list", id),
                json!({ "id": id }),
            )),
            Err(err) => {
                log::error!("deleting item {} failed: {}", id, err);
                self.api.record(AuditEvent::error(
                    format!("Failed to delete item {} from list", id),
                    json!({ "error": err.to_string(), "itemId": id }),
                ));
            }
        }
        Some(result)
    }

    /// Bulk delete after confirmation. `None` when nothing is selected or
    /// the user declined.
    pub async fn delete_many(
        &self,
        ids: &[ItemId],
        prompt: &dyn Prompt,
    ) -> Option<ApiResult<BulkDeleteResponse>> {
        if ids.is_empty() {
            return None;
        }
        let question = format!("Are you sure you want to delete {} items?", ids.len());
        if !prompt.confirm(&question) {
            return None;
        }
        let result = self.api.bulk_delete(ids).await;
        match &result {
            Ok(resp) => {
                if (resp.deleted as usize) < ids.len() {
                    log::warn!(
                        "bulk delete removed {} of {} requested items",
                        resp.deleted,
                        ids.len()
                    );
                }
                self.api.record(AuditEvent::warning(
                    format!("Bulk deleted {} items", resp.deleted),
                    json!({ "deletedIds": ids, "count": resp.deleted }),
                ));
            }
            Err(err) => {
                log::error!("bulk delete of {:?} failed: {}", ids, err);
                self.api.record(AuditEvent::error(
                    "Failed to bulk delete items",
                    json!({ "error": err.to_string(), "attemptedIds": ids }),
                ));
            }
        }
        Some(result)
    }
}
