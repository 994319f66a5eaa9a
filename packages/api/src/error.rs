//! Client-side API errors.

use serde_json::Value;
use thiserror::Error;

/// Errors returned by [`crate::ApiClient`] and the resource modules.
///
/// `Clone` because one debounced GET result is handed to every caller that
/// joined it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network Error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("unauthorized")]
    Unauthorized { body: Value },
    #[error("request failed with status {status}")]
    Status { status: u16, body: Value },
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("{0}")]
    Invalid(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message supplied by the backend in the error body, if any.
    ///
    /// Checked in order: `detail`, `message`, `error`, `non_field_errors[0]`.
    pub fn server_message(&self) -> Option<String> {
        let body = match self {
            ApiError::Status { body, .. } | ApiError::Unauthorized { body } => body,
            _ => return None,
        };
        ["detail", "message", "error"]
            .iter()
            .find_map(|key| body.get(key).and_then(Value::as_str))
            .or_else(|| {
                body.get("non_field_errors")
                    .and_then(|v| v.get(0))
                    .and_then(Value::as_str)
            })
            .map(str::to_string)
    }

    /// Text for a toast: the server's message, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Invalid(msg) => msg.clone(),
            _ => self.server_message().unwrap_or_else(|| fallback.to_string()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(body: Value) -> ApiError {
        ApiError::Status { status: 400, body }
    }

    #[test]
    fn test_server_message_order() {
        assert_eq!(
            status(json!({"message": "m", "detail": "d"})).server_message().as_deref(),
            Some("d")
        );
        assert_eq!(
            status(json!({"error": "bad"})).server_message().as_deref(),
            Some("bad")
        );
        assert_eq!(
            status(json!({"non_field_errors": ["Unable to log in"]}))
                .server_message()
                .as_deref(),
            Some("Unable to log in")
        );
        assert_eq!(status(json!({"email": ["taken"]})).server_message(), None);
    }

    #[test]
    fn test_user_message_fallback() {
        assert_eq!(
            ApiError::Network("dns".into()).user_message("Operation failed"),
            "Operation failed"
        );
        assert_eq!(
            status(json!({"detail": "Not allowed"})).user_message("Operation failed"),
            "Not allowed"
        );
        assert_eq!(ApiError::Unauthorized { body: json!({}) }.status(), Some(401));
    }

    #[test]
    fn test_unauthorized_body_is_readable() {
        let err = ApiError::Unauthorized {
            body: json!({"detail": "Invalid email or password"}),
        };
        assert_eq!(err.user_message("Login failed"), "Invalid email or password");
        assert_eq!(
            ApiError::Unauthorized { body: Value::Null }.user_message("Login failed"),
            "Login failed"
        );
    }
}
