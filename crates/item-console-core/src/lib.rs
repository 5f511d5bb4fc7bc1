//! Item Console Core
//!
//! Target-independent state and contracts behind the item console:
//! validation, the form/list/page/log controllers, configuration and the
//! API seams the browser frontend implements over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod list;
pub mod liveness;
pub mod logs;
pub mod models;
pub mod pages;
pub mod routes;
pub mod validation;

#[cfg(test)]
mod testing;

pub use api::{
    deliver_audit, AuditEvent, AuditSink, BulkDeleteRequest, ItemApi, ItemPatch, LogApi, Prompt,
};
pub use config::AppConfig;
pub use error::{ApiError, ApiResult, ServerError};
pub use form::{duplicate_message, ItemFormState};
pub use list::{GroupFilter, ItemListController, ItemListState};
pub use liveness::Liveness;
pub use logs::{LogViewState, LogViewerController, SeverityFilter};
pub use models::{
    BulkDeleteResponse, Group, Item, ItemFormData, ItemId, LogEntry, LogLevel, NewLogEntry,
};
pub use pages::{ItemPageController, ItemPageState, LoadPurpose, PagePhase, PageView};
pub use routes::{parse_item_id, Route};
pub use validation::{validate, Field, ValidationErrors, NAME_MAX_CHARS, NAME_MIN_CHARS};
