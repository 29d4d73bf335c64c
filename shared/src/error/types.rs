//! Error types and API response structures

use super::codes::ErrorCode;
use super::field::FieldErrors;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the error type every handler returns, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Per-field validation errors for form-style clients
/// - Optional structured details (blocking counts, context)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Field-level validation errors
    pub errors: Option<FieldErrors>,
    /// Optional additional details
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            errors: None,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: None,
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

    /// Create a validation error carrying a single field error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldErrors::single(field, message).into()
    }

    /// Create a not authenticated error
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create an invalid token error
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    /// Create a token expired error
    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        let message = errors.to_string();
        Self {
            code: ErrorCode::ValidationFailed,
            message,
            errors: Some(errors),
            details: None,
        }
    }
}

/// Unified API response structure
///
/// Every endpoint answers with the same envelope:
/// - `status_code`: HTTP status mirrored into the body
/// - `code`: Error code (0 for success)
/// - `message`: Human-readable message
/// - `data`: Response payload (`{}` on failure)
/// - `errors`: Field errors (validation failures only)
/// - `details`: Additional error details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// HTTP status code
    pub status_code: u16,
    /// Error code (0 for success, non-zero for errors)
    pub code: u16,
    /// Human-readable message
    pub message: String,
    /// Response data
    pub data: Option<T>,
    /// Field-level validation errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    /// Additional error details (present on failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a 200 success response with data
    pub fn success(data: T) -> Self {
        Self::success_with_status(StatusCode::OK, "Success", data)
    }

    /// Create a 201 success response for a newly created resource
    pub fn created(data: T) -> Self {
        Self::success_with_status(StatusCode::CREATED, "Created successfully", data)
    }

    /// Create a success response with custom message and data
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self::success_with_status(StatusCode::OK, message, data)
    }

    fn success_with_status(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: status.as_u16(),
            code: ErrorCode::Success.code(),
            message: message.into(),
            data: Some(data),
            errors: None,
            details: None,
        }
    }

    /// HTTP status carried by this envelope
    pub fn http_status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl ApiResponse<Value> {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            status_code: err.http_status().as_u16(),
            code: err.code.code(),
            message: err.message.clone(),
            data: Some(Value::Object(Default::default())),
            errors: err.errors.clone(),
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        // Internal detail stays in the log; the client gets the generic message
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
            let generic = AppError::new(self.code);
            return (status, Json(ApiResponse::error(&generic))).into_response();
        }

        (status, Json(ApiResponse::error(&self))).into_response()
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        (self.http_status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.errors.is_none());
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::with_message(
            ErrorCode::DepartmentHasEmployees,
            "Cannot delete department 'Eng' because it has 2 employee(s).",
        )
        .with_detail("employee_count", 2);

        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        let details = err.details.unwrap();
        assert_eq!(details.get("employee_count").unwrap(), 2);
    }

    #[test]
    fn test_app_error_from_field_errors_uses_first_message() {
        let mut errors = FieldErrors::new();
        errors.add("hired_on", "Hired date is required for hired employees.");
        errors.add("phone", "Invalid phone number.");

        let err = AppError::from(errors);
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Hired date is required for hired employees.");
        assert_eq!(err.errors.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_app_error_convenience_constructors() {
        let err = AppError::field("status", "Invalid transition from hired to not_accepted");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.errors.as_ref().unwrap().contains("status"));

        assert_eq!(
            AppError::not_authenticated().http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::permission_denied("Admin only").http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::invalid_request("bad json").http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success(42);
        assert_eq!(response.status_code, 200);
        assert_eq!(response.code, 0);
        assert_eq!(response.message, "Success");
        assert_eq!(response.data, Some(42));
    }

    #[test]
    fn test_api_response_created() {
        let response = ApiResponse::created("x");
        assert_eq!(response.http_status(), StatusCode::CREATED);
    }

    #[test]
    fn test_api_response_error_envelope() {
        let err = AppError::field("hired_on", "Hired date is required for hired employees.");
        let json = serde_json::to_value(ApiResponse::error(&err)).unwrap();

        assert_eq!(json["status_code"], 400);
        assert_eq!(json["code"], 2);
        assert_eq!(json["message"], "Hired date is required for hired employees.");
        assert_eq!(json["data"], serde_json::json!({}));
        assert_eq!(
            json["errors"]["hired_on"],
            "Hired date is required for hired employees."
        );
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_api_response_deserialize() {
        let json = r#"{"status_code":200,"code":0,"message":"Success","data":42}"#;
        let response: ApiResponse<i32> = serde_json::from_str(json).unwrap();
        assert_eq!(response.code, 0);
        assert_eq!(response.data, Some(42));
        assert!(response.errors.is_none());
    }
}
