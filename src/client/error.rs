use reqwest::Response;
use serde_json::Value;
use thiserror::Error;

use crate::error::PayrollError;

/// Errors produced by the HR API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A request URL could not be built.
    #[error("failed to build url: {0}")]
    Url(#[from] url::ParseError),
    /// The request never produced a response, or the body was not readable.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("unexpected status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body; may be empty.
        message: String,
    },
    /// The request was rejected locally before being sent.
    #[error(transparent)]
    Validation(#[from] PayrollError),
    /// The access token could not be read or written.
    #[error("token storage error: {0}")]
    TokenStorage(#[from] std::io::Error),
}

impl ClientError {
    /// The text to show the user, or `fallback` when there is nothing better.
    ///
    /// Server messages and local validation messages are shown verbatim.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { message, .. } if !message.is_empty() => message.clone(),
            Self::Validation(err) => err.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// HTTP status of a server rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Extracts the user-facing message from an error body.
///
/// A string `detail` is used as is. A validation array is flattened into
/// `loc.joined: msg` entries separated by `"; "`. Anything else yields an
/// empty message.
pub fn extract_detail_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return String::new();
    };
    match value.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(format_validation_item)
            .collect::<Vec<_>>()
            .join("; "),
        _ => String::new(),
    }
}

fn format_validation_item(item: &Value) -> String {
    let loc = item
        .get("loc")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .map(|part| match part {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(".")
        })
        .unwrap_or_default();
    let msg = item.get("msg").and_then(Value::as_str).unwrap_or_default();
    format!("{loc}: {msg}")
}

pub(super) async fn status_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ClientError::Status {
        status,
        message: extract_detail_message(&body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_string_detail() {
        assert_eq!(
            extract_detail_message(r#"{"detail": "Incorrect username or password"}"#),
            "Incorrect username or password"
        );
    }

    #[test]
    fn test_extract_validation_array() {
        let body = r#"{"detail": [
            {"loc": ["body", "employee_id"], "msg": "field required", "type": "value_error.missing"},
            {"loc": ["body", "details", 0, "amount"], "msg": "value is not a valid float"}
        ]}"#;
        assert_eq!(
            extract_detail_message(body),
            "body.employee_id: field required; body.details.0.amount: value is not a valid float"
        );
    }

    #[test]
    fn test_extract_from_unusable_body() {
        assert_eq!(extract_detail_message("Internal Server Error"), "");
        assert_eq!(extract_detail_message(r#"{"error": "x"}"#), "");
        assert_eq!(extract_detail_message(""), "");
    }

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ClientError::Status {
            status: 404,
            message: "Payslip not found".to_string(),
        };
        assert_eq!(err.user_message("fallback"), "Payslip not found");
        assert_eq!(err.status(), Some(404));

        let err = ClientError::Status {
            status: 502,
            message: String::new(),
        };
        assert_eq!(err.user_message("fallback"), "fallback");
    }

    #[test]
    fn test_user_message_for_local_validation() {
        let err = ClientError::from(PayrollError::InvalidLeave {
            message: "End date cannot be before the start date.".to_string(),
        });
        assert_eq!(
            err.user_message("fallback"),
            "End date cannot be before the start date."
        );
        assert_eq!(err.status(), None);
    }
}
