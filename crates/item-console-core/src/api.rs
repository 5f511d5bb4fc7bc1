//! API Contracts
//!
//! Async interfaces for the collections and logs services. The browser
//! frontend implements them over HTTP; tests use an in-memory fake.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiResult;
use crate::models::{BulkDeleteResponse, Item, ItemFormData, ItemId, LogEntry, LogLevel, NewLogEntry};

/// Service name attached to every audit event
pub const AUDIT_SERVICE: &str = "frontend";

/// Collections endpoint
#[async_trait(?Send)]
pub trait ItemApi {
    /// `GET /collections/`
    async fn list_items(&self) -> ApiResult<Vec<Item>>;

    /// `GET /collections/{id}/`
    async fn get_item(&self, id: ItemId) -> ApiResult<Item>;

    /// `POST /collections/`
    async fn create_item(&self, data: &ItemFormData) -> ApiResult<Item>;

    /// `PATCH /collections/{id}/`
    async fn update_item(&self, id: ItemId, patch: &ItemPatch) -> ApiResult<Item>;

    /// `DELETE /collections/{id}/`
    async fn delete_item(&self, id: ItemId) -> ApiResult<()>;

    /// `DELETE /collections/bulk_delete/`
    async fn bulk_delete(&self, ids: &[ItemId]) -> ApiResult<BulkDeleteResponse>;
}

/// Logs endpoint
#[async_trait(?Send)]
pub trait LogApi {
    /// Newest-first page of log records
    async fn list_logs(&self) -> ApiResult<Vec<LogEntry>>;

    /// `POST /logs/`
    async fn create_log(&self, entry: &NewLogEntry) -> ApiResult<()>;

    /// `DELETE /logs/` (removes every record)
    async fn clear_logs(&self) -> ApiResult<()>;
}

/// Partial update body; absent fields are left untouched by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl From<&ItemFormData> for ItemPatch {
    fn from(data: &ItemFormData) -> Self {
        Self {
            name: Some(data.name.clone()),
            group: Some(data.group.clone()),
        }
    }
}

/// Body of `DELETE /collections/bulk_delete/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkDeleteRequest<'a> {
    pub ids: &'a [ItemId],
}

/// Outcome of a user action, reported to the log collector
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEvent {
    pub level: LogLevel,
    pub message: String,
    pub context: Value,
}

impl AuditEvent {
    pub fn new(level: LogLevel, message: impl Into<String>, context: Value) -> Self {
        Self {
            level,
            message: message.into(),
            context,
        }
    }

    pub fn info(message: impl Into<String>, context: Value) -> Self {
        Self::new(LogLevel::Info, message, context)
    }

    pub fn warning(message: impl Into<String>, context: Value) -> Self {
        Self::new(LogLevel::Warning, message, context)
    }

    pub fn error(message: impl Into<String>, context: Value) -> Self {
        Self::new(LogLevel::Error, message, context)
    }

    pub fn into_entry(self) -> NewLogEntry {
        NewLogEntry {
            level: self.level,
            service: AUDIT_SERVICE.to_string(),
            message: self.message,
            context: self.context,
        }
    }
}

/// Fire-and-forget sink for audit events.
///
/// `record` must return immediately; delivery happens in the background and
/// its failure never reaches the caller.
pub trait AuditSink {
    fn record(&self, event: AuditEvent);
}

/// Blocking yes/no confirmation shown before destructive actions
pub trait Prompt {
    fn confirm(&self, message: &str) -> bool;
}

/// Post one audit event, logging and swallowing any failure
pub async fn deliver_audit<L: LogApi + ?Sized>(api: &L, event: AuditEvent) {
    let message = event.message.clone();
    if let Err(err) = api.create_log(&event.into_entry()).await {
        log::warn!("failed to deliver audit event {:?}: {}", message, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;
    use serde_json::json;

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = ItemPatch {
            name: Some("Renamed".into()),
            group: None,
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "name": "Renamed" }));

        let full = ItemPatch::from(&ItemFormData::new("Widget", "Primary"));
        assert_eq!(
            serde_json::to_value(&full).unwrap(),
            json!({ "name": "Widget", "group": "Primary" })
        );
    }

    #[test]
    fn test_audit_entry_shape() {
        let entry = AuditEvent::warning("Deleted item 3", json!({ "itemId": 3 })).into_entry();
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({
                "level": "WARNING",
                "service": "frontend",
                "message": "Deleted item 3",
                "context": { "itemId": 3 },
            })
        );
    }

    #[tokio::test]
    async fn test_deliver_audit_swallows_failure() {
        let api = FakeApi::new();
        api.fail_log_writes(true);
        deliver_audit(&api, AuditEvent::info("Fetched items list", json!({}))).await;
        assert!(api.posted_logs().is_empty());

        api.fail_log_writes(false);
        deliver_audit(&api, AuditEvent::info("Fetched items list", json!({ "count": 0 }))).await;
        assert_eq!(api.posted_logs().len(), 1);
        assert_eq!(api.posted_logs()[0].service, "frontend");
    }
}
