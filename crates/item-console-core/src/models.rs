//! Models
//!
//! Data structures matching the collections and logs API payloads.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Item identifier (server-assigned)
pub type ItemId = u64;

/// Category an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Group {
    Primary,
    Secondary,
}

impl Group {
    pub const ALL: [Group; 2] = [Group::Primary, Group::Secondary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Primary => "Primary",
            Group::Secondary => "Secondary",
        }
    }

    /// Exact, case-sensitive match against the wire names
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Primary" => Some(Group::Primary),
            "Secondary" => Some(Group::Secondary),
            _ => None,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item as returned by `/collections/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub group: Group,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Form projection used to seed the edit form
    pub fn form_data(&self) -> ItemFormData {
        ItemFormData {
            name: self.name.clone(),
            group: self.group.as_str().to_string(),
        }
    }
}

/// Editable projection of an item.
///
/// `group` stays a raw string so that whatever the user picked (including
/// nothing) can be validated and reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFormData {
    pub name: String,
    pub group: String,
}

impl ItemFormData {
    pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
        }
    }
}

impl Default for ItemFormData {
    fn default() -> Self {
        Self::new("", Group::Primary.as_str())
    }
}

/// Response body of `DELETE /collections/bulk_delete/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub deleted: u64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == s)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log record as returned by `/logs/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub service: String,
    pub message: String,
}

/// Body of `POST /logs/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLogEntry {
    pub level: LogLevel,
    pub service: String,
    pub message: String,
    pub context: serde_json::Value,
}
