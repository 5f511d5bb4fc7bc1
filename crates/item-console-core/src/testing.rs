//! In-memory fake of the collections and logs services

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use crate::api::{AuditEvent, AuditSink, ItemApi, ItemPatch, LogApi, Prompt};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    BulkDeleteResponse, Group, Item, ItemFormData, ItemId, LogEntry, LogLevel, NewLogEntry,
};

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn item(id: ItemId, name: &str, group: Group) -> Item {
    Item {
        id,
        name: name.to_string(),
        group,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn log_entry(id: u64, level: LogLevel) -> LogEntry {
    LogEntry {
        id,
        timestamp: epoch(),
        level,
        service: "frontend".to_string(),
        message: format!("entry {}", id),
    }
}

/// Canned answer to every confirmation
pub struct Answer(pub bool);

impl Prompt for Answer {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

#[derive(Default)]
struct FakeState {
    items: Vec<Item>,
    logs: Vec<LogEntry>,
    posted_logs: Vec<NewLogEntry>,
    audit: Vec<AuditEvent>,
    deleted: Vec<ItemId>,
    fail_items: bool,
    fail_log_reads: bool,
    fail_log_writes: bool,
    reject: Option<(u16, Value)>,
    fetch_count: usize,
    log_fetch_count: usize,
    log_clear_count: usize,
}

#[derive(Clone, Default)]
pub struct FakeApi {
    state: Rc<RefCell<FakeState>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        let api = Self::new();
        api.state.borrow_mut().items = items;
        api
    }

    pub fn set_logs(&self, logs: Vec<LogEntry>) {
        self.state.borrow_mut().logs = logs;
    }

    /// Every collections call answers 500
    pub fn fail_items(&self, fail: bool) {
        self.state.borrow_mut().fail_items = fail;
    }

    pub fn fail_log_reads(&self, fail: bool) {
        self.state.borrow_mut().fail_log_reads = fail;
    }

    /// Log posts, clears and audit delivery fail
    pub fn fail_log_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_log_writes = fail;
    }

    /// Create and update answer with this status and body
    pub fn reject_with(&self, status: u16, body: Value) {
        self.state.borrow_mut().reject = Some((status, body));
    }

    pub fn items(&self) -> Vec<Item> {
        self.state.borrow().items.clone()
    }

    pub fn deleted_ids(&self) -> Vec<ItemId> {
        self.state.borrow().deleted.clone()
    }

    pub fn audit_events(&self) -> Vec<AuditEvent> {
        self.state.borrow().audit.clone()
    }

    pub fn posted_logs(&self) -> Vec<NewLogEntry> {
        self.state.borrow().posted_logs.clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.state.borrow().fetch_count
    }

    pub fn log_fetch_count(&self) -> usize {
        self.state.borrow().log_fetch_count
    }

    pub fn log_clear_count(&self) -> usize {
        self.state.borrow().log_clear_count
    }

    fn check_items(&self) -> ApiResult<()> {
        let state = self.state.borrow();
        if state.fail_items {
            return Err(ApiError::from_response(500, None));
        }
        if let Some((status, body)) = &state.reject {
            return Err(ApiError::from_response(*status, Some(body)));
        }
        Ok(())
    }

    fn check_unique(&self, name: &str, group: Group, except: Option<ItemId>) -> ApiResult<()> {
        let taken = self
            .state
            .borrow()
            .items
            .iter()
            .any(|i| i.name == name && i.group == group && Some(i.id) != except);
        if taken {
            return Err(ApiError::from_response(
                400,
                Some(&json!({
                    "non_field_errors": ["Item with this Group and Name already exists."]
                })),
            ));
        }
        Ok(())
    }
}

fn parse_group(raw: &str) -> ApiResult<Group> {
    Group::parse(raw).ok_or_else(|| {
        ApiError::from_response(400, Some(&json!({ "group": ["Not a valid choice."] })))
    })
}

#[async_trait(?Send)]
impl ItemApi for FakeApi {
    async fn list_items(&self) -> ApiResult<Vec<Item>> {
        self.state.borrow_mut().fetch_count += 1;
        self.check_items()?;
        Ok(self.items())
    }

    async fn get_item(&self, id: ItemId) -> ApiResult<Item> {
        self.check_items()?;
        self.items()
            .into_iter()
            .find(|i| i.id == id)
            .ok_or(ApiError::NotFound)
    }

    async fn create_item(&self, data: &ItemFormData) -> ApiResult<Item> {
        self.check_items()?;
        let group = parse_group(&data.group)?;
        self.check_unique(&data.name, group, None)?;
        let mut state = self.state.borrow_mut();
        let id = state.items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let created = item(id, &data.name, group);
        state.items.push(created.clone());
        Ok(created)
    }

    async fn update_item(&self, id: ItemId, patch: &ItemPatch) -> ApiResult<Item> {
        self.check_items()?;
        let current = self.get_item(id).await?;
        let name = patch.name.clone().unwrap_or(current.name);
        let group = match &patch.group {
            Some(raw) => parse_group(raw)?,
            None => current.group,
        };
        self.check_unique(&name, group, Some(id))?;
        let mut state = self.state.borrow_mut();
        let stored = state
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(ApiError::NotFound)?;
        stored.name = name;
        stored.group = group;
        Ok(stored.clone())
    }

    async fn delete_item(&self, id: ItemId) -> ApiResult<()> {
        self.check_items()?;
        let mut state = self.state.borrow_mut();
        let before = state.items.len();
        state.items.retain(|i| i.id != id);
        if state.items.len() == before {
            return Err(ApiError::NotFound);
        }
        state.deleted.push(id);
        Ok(())
    }

    async fn bulk_delete(&self, ids: &[ItemId]) -> ApiResult<BulkDeleteResponse> {
        self.check_items()?;
        let mut state = self.state.borrow_mut();
        let removed: Vec<ItemId> = state
            .items
            .iter()
            .map(|i| i.id)
            .filter(|id| ids.contains(id))
            .collect();
        state.items.retain(|i| !removed.contains(&i.id));
        let deleted = removed.len() as u64;
        state.deleted.extend(removed);
        Ok(BulkDeleteResponse {
            deleted,
            message: Some(format!("Successfully deleted {} items", deleted)),
        })
    }
}

#[async_trait(?Send)]
impl LogApi for FakeApi {
    async fn list_logs(&self) -> ApiResult<Vec<LogEntry>> {
        let mut state = self.state.borrow_mut();
        state.log_fetch_count += 1;
        if state.fail_log_reads {
            return Err(ApiError::Network("connection refused".into()));
        }
        Ok(state.logs.clone())
    }

    async fn create_log(&self, entry: &NewLogEntry) -> ApiResult<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_log_writes {
            return Err(ApiError::from_response(500, None));
        }
        state.posted_logs.push(entry.clone());
        Ok(())
    }

    async fn clear_logs(&self) -> ApiResult<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_log_writes {
            return Err(ApiError::Network("connection refused".into()));
        }
        state.logs.clear();
        state.log_clear_count += 1;
        Ok(())
    }
}

impl AuditSink for FakeApi {
    fn record(&self, event: AuditEvent) {
        let mut state = self.state.borrow_mut();
        if state.fail_log_writes {
            return;
        }
        state.audit.push(event);
    }
}
