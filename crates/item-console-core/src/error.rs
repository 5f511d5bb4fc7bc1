//! API Errors
//!
//! Error taxonomy for calls against the collections and logs services, plus
//! the page-level error surfaced to the user.

use serde_json::Value;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single HTTP call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered 404
    #[error("resource not found")]
    NotFound,
    /// Any other non-success status. `message` and `code` are lifted from
    /// the error body when it has one.
    #[error("request rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
        code: Option<String>,
    },
    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),
    /// The response body did not match the expected shape
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Structured codes that mark a uniqueness conflict
const DUPLICATE_CODES: &[&str] = &["unique", "duplicate", "unique_together", "conflict"];

/// Phrases the server uses for uniqueness violations when no code is sent
const DUPLICATE_PHRASES: &[&str] = &[
    "unique set",
    "already exists",
    "duplicate",
    "unique constraint",
];

impl ApiError {
    /// Build the error for a non-success response from its status and body
    pub fn from_response(status: u16, body: Option<&Value>) -> Self {
        if status == 404 {
            return ApiError::NotFound;
        }
        ApiError::Rejected {
            status,
            message: body.and_then(extract_error_message),
            code: body.and_then(extract_error_code),
        }
    }

    /// Message suitable for inline display, `fallback` when the server gave none
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Whether this is a uniqueness conflict (name taken within its group).
    ///
    /// A structured code or a 409 wins; the phrase match only runs when the
    /// server sent neither.
    pub fn is_duplicate(&self) -> bool {
        match self {
            ApiError::Rejected { status: 409, .. } => true,
            ApiError::Rejected {
                code: Some(code), ..
            } => DUPLICATE_CODES.contains(&code.to_ascii_lowercase().as_str()),
            ApiError::Rejected {
                message: Some(message),
                code: None,
                ..
            } => is_duplicate_message(message),
            _ => false,
        }
    }
}

/// Case-insensitive phrase match over a server message
pub fn is_duplicate_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    DUPLICATE_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// Pull the human-readable message out of an error body.
///
/// Precedence: `non_field_errors[0]`, `detail`, `message`, `error`.
pub fn extract_error_message(body: &Value) -> Option<String> {
    let first_non_field = body
        .get("non_field_errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(Value::as_str);

    first_non_field
        .or_else(|| non_empty_str(body, "detail"))
        .or_else(|| non_empty_str(body, "message"))
        .or_else(|| non_empty_str(body, "error"))
        .map(str::to_string)
}

fn extract_error_code(body: &Value) -> Option<String> {
    non_empty_str(body, "code").map(str::to_string)
}

fn non_empty_str<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Error shown on a page after a failed network operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerError {
    pub message: String,
    /// Set when the failure is a name conflict; drives the duplicate modal
    pub duplicate: bool,
}

impl ServerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duplicate: false,
        }
    }

    pub fn from_api(err: &ApiError, fallback: &str) -> Self {
        Self {
            message: err.user_message(fallback),
            duplicate: err.is_duplicate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_precedence() {
        let body = json!({
            "non_field_errors": ["The fields group, name must make a unique set."],
            "detail": "detail text",
            "message": "message text",
        });
        assert_eq!(
            extract_error_message(&body).as_deref(),
            Some("The fields group, name must make a unique set.")
        );

        let body = json!({ "detail": "Not allowed", "message": "ignored" });
        assert_eq!(extract_error_message(&body).as_deref(), Some("Not allowed"));

        let body = json!({ "message": "Bad group" });
        assert_eq!(extract_error_message(&body).as_deref(), Some("Bad group"));

        let body = json!({ "error": "No IDs provided" });
        assert_eq!(extract_error_message(&body).as_deref(), Some("No IDs provided"));

        let body = json!({ "name": ["This field is required."] });
        assert_eq!(extract_error_message(&body), None);
    }

    #[test]
    fn test_empty_non_field_errors_falls_through() {
        let body = json!({ "non_field_errors": [], "detail": "fallback detail" });
        assert_eq!(extract_error_message(&body).as_deref(), Some("fallback detail"));
    }

    #[test]
    fn test_from_response_maps_404() {
        assert_eq!(ApiError::from_response(404, None), ApiError::NotFound);
        let err = ApiError::from_response(400, Some(&json!({ "detail": "nope", "code": "invalid" })));
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 400,
                message: Some("nope".into()),
                code: Some("invalid".into()),
            }
        );
    }

    #[test]
    fn test_user_message_fallback() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.user_message("Failed to create item"), "Failed to create item");
        let err = ApiError::from_response(500, None);
        assert_eq!(err.user_message("Failed to update item"), "Failed to update item");
    }

    #[test]
    fn test_duplicate_detection_prefers_code() {
        let coded = ApiError::from_response(
            400,
            Some(&json!({ "non_field_errors": ["already exists"], "code": "invalid" })),
        );
        assert!(!coded.is_duplicate());

        let coded = ApiError::from_response(400, Some(&json!({ "detail": "x", "code": "unique" })));
        assert!(coded.is_duplicate());

        assert!(ApiError::from_response(409, None).is_duplicate());
    }

    #[test]
    fn test_duplicate_detection_phrases() {
        for msg in [
            "The fields group, name must make a unique set.",
            "Item with this name ALREADY EXISTS",
            "Duplicate entry",
            "UNIQUE constraint failed: collection_item.name",
        ] {
            let err = ApiError::from_response(400, Some(&json!({ "detail": msg })));
            assert!(err.is_duplicate(), "{msg}");
        }
        let err = ApiError::from_response(400, Some(&json!({ "detail": "Name too long" })));
        assert!(!err.is_duplicate());
        assert!(!ApiError::NotFound.is_duplicate());
    }

    #[test]
    fn test_server_error_from_api() {
        let err = ApiError::from_response(400, Some(&json!({ "detail": "Item already exists" })));
        let surfaced = ServerError::from_api(&err, "Failed to create item");
        assert_eq!(surfaced.message, "Item already exists");
        assert!(surfaced.duplicate);
    }
}
