//! Error types and the backend error payload

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// Raised by the domain calculators and by the client when the backend
/// rejects a request:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create an invalid amount error naming the offending field
    pub fn invalid_amount(field: &str, msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidAmount, msg).with_detail("field", field)
    }
}

/// Result type alias for domain operations
pub type AppResult<T> = Result<T, AppError>;

/// Error payload returned by the backend on a non-2xx response
///
/// The backend is not consistent: validation failures carry `detail`,
/// other handlers use `message`, some include a numeric `code`.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    /// The server-supplied human-readable message, preferring `detail`
    ///
    /// A list-shaped `detail` (field errors) yields its first `msg`.
    pub fn server_message(&self) -> Option<String> {
        let detail = match &self.detail {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Array(items)) => items.iter().find_map(|item| {
                item.get("msg")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            }),
            Some(Value::Object(map)) => map
                .get("message")
                .or_else(|| map.get("msg"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        };

        detail
            .or_else(|| self.message.clone())
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }

    /// Turn the payload into an [`AppError`], falling back to the HTTP status
    pub fn into_app_error(self, status: StatusCode) -> AppError {
        let code = self
            .code
            .and_then(|c| ErrorCode::try_from(c).ok())
            .unwrap_or_else(|| ErrorCode::from_status(status));

        let mut err = match self.server_message() {
            Some(message) => AppError::with_message(code, message),
            None => AppError::new(code),
        };
        if let Some(detail @ (Value::Array(_) | Value::Object(_))) = self.detail {
            err = err.with_detail("detail", detail);
        }
        err.with_detail("status", status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::AppointmentNotFound);
        assert_eq!(err.code, ErrorCode::AppointmentNotFound);
        assert_eq!(err.message, "Appointment not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::with_message(ErrorCode::ValidationFailed, "Missing required fields")
            .with_detail("field", "staff_id")
            .with_detail("reason", "required");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "staff_id");
        assert_eq!(details.get("reason").unwrap(), "required");
    }

    #[test]
    fn test_app_error_convenience_constructors() {
        let err = AppError::invalid_amount("counted_cash", "must be non-negative");
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert_eq!(err.details.unwrap().get("field").unwrap(), "counted_cash");

        let err = AppError::new(ErrorCode::PermissionDenied);
        assert_eq!(err.http_status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::SlotBlocked, "Ana is on vacation");
        assert_eq!(format!("{}", err), "Ana is on vacation");
    }

    #[test]
    fn test_error_body_prefers_detail() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail":"La especialista no trabaja a esa hora","message":"Bad Request"}"#,
        )
        .unwrap();
        assert_eq!(
            body.server_message().as_deref(),
            Some("La especialista no trabaja a esa hora")
        );
    }

    #[test]
    fn test_error_body_field_errors() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail":[{"loc":["body","duracion"],"msg":"field required"}]}"#,
        )
        .unwrap();
        assert_eq!(body.server_message().as_deref(), Some("field required"));

        let err = body.into_app_error(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.details.unwrap().contains_key("detail"));
    }

    #[test]
    fn test_error_body_falls_back_to_message_then_code() {
        let body: ErrorBody = serde_json::from_str(r#"{"message":"  "}"#).unwrap();
        assert!(body.server_message().is_none());

        let err = body.into_app_error(StatusCode::NOT_FOUND);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
    }

    #[test]
    fn test_error_body_known_code_wins_over_status() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"code":5003,"message":"Ya hay una caja abierta"}"#).unwrap();
        let err = body.into_app_error(StatusCode::BAD_REQUEST);
        assert_eq!(err.code, ErrorCode::CajaAlreadyOpen);
        assert_eq!(err.message, "Ya hay una caja abierta");
        assert_eq!(err.details.unwrap().get("status").unwrap(), 400);
    }
}
