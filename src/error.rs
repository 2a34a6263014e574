//! # Error Handling
//!
//! This module provides the error taxonomy of the Notes API: repository faults,
//! note service outcomes, and the problem+json response every failure is rendered as.

use axum::{
    extract::rejection::JsonRejection,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

use crate::telemetry;

/// Unified API error response structure
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiError {
    /// HTTP status code for the response
    #[serde(skip_serializing, skip_deserializing)]
    pub status: StatusCode,
    /// Error code for programmatic handling
    pub code: Box<str>,
    /// Human-readable error message
    pub message: Box<str>,
    /// Additional error details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Box<serde_json::Value>>,
    /// Suggested retry delay in seconds (optional)
    pub retry_after: Option<u64>,
    /// Correlation trace ID for debugging (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<Box<str>>,
}

impl ApiError {
    /// Create a new API error with the given status code and message
    pub fn new<S: Into<String>>(status: StatusCode, code: S, message: S) -> Self {
        Self {
            status,
            code: code.into().into_boxed_str(),
            message: message.into().into_boxed_str(),
            details: None,
            retry_after: None,
            trace_id: Self::current_trace_id(),
        }
    }

    /// Add details to the error
    pub fn with_details<V: Into<serde_json::Value>>(mut self, details: V) -> Self {
        self.details = Some(Box::new(details.into()));
        self
    }

    /// Set retry after delay
    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }

    /// Extract current trace ID from the active request (falls back to generated correlation ID)
    fn current_trace_id() -> Option<Box<str>> {
        telemetry::current_trace_id()
            .map(|trace_id| trace_id.into_boxed_str())
            .or_else(|| {
                Some(format!("corr-{}", &uuid::Uuid::new_v4().to_string()[..8]).into_boxed_str())
            })
    }
}

/// Standard error types with predefined status codes
#[derive(Debug, Error)]
pub enum ErrorType {
    #[error("Not Found")]
    NotFound,
    #[error("Service Unavailable")]
    ServiceUnavailable,
}

impl ErrorType {
    /// Get the appropriate HTTP status code for this error type
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorType::NotFound => StatusCode::NOT_FOUND,
            ErrorType::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get the error code string for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorType::NotFound => "NOT_FOUND",
            ErrorType::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }
}

/// Errors surfaced by repositories.
///
/// "No rows matched" is kept apart from storage faults so callers can tell a
/// missing record from a broken store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl RepositoryError {
    /// Wrap a SeaORM error, for use with `map_err`
    pub fn database_error(error: sea_orm::DbErr) -> Self {
        Self::Database(error)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Outcomes of the note service that are not a success.
#[derive(Debug, Error)]
pub enum NoteServiceError {
    /// Caller-supplied input violates a precondition
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    /// No visible note has the given identity
    #[error("note {id} not found")]
    NotFound { id: i32 },
    /// Underlying persistence fault
    #[error("store error: {0}")]
    Store(#[source] sea_orm::DbErr),
}

impl NoteServiceError {
    pub fn validation<S: Into<String>>(field: &'static str, message: S) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Attach the note identity to a repository failure.
    pub fn from_repository(id: i32, error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(_) => Self::NotFound { id },
            RepositoryError::Database(db_err) => Self::Store(db_err),
        }
    }
}

impl From<RepositoryError> for NoteServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            // Id-scoped calls go through `from_repository` instead.
            RepositoryError::NotFound(message) => {
                Self::Store(sea_orm::DbErr::RecordNotFound(message))
            }
            RepositoryError::Database(db_err) => Self::Store(db_err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/problem+json"),
        );

        if let Some(retry_after) = self.retry_after
            && let Ok(header_value) = HeaderValue::from_str(&retry_after.to_string())
        {
            headers.insert("retry-after", header_value);
        }

        (self.status, headers, axum::Json(self)).into_response()
    }
}

// Error mappers for common sources

impl From<ErrorType> for ApiError {
    fn from(error_type: ErrorType) -> Self {
        let error = Self::new(
            error_type.status_code(),
            error_type.error_code(),
            &error_type.to_string(),
        );

        match error_type {
            ErrorType::ServiceUnavailable => error.with_retry_after(STORE_RETRY_AFTER_SECS),
            ErrorType::NotFound => error,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON: {}", err),
            JsonRejection::JsonSyntaxError(err) => format!("JSON syntax error: {}", err),
            JsonRejection::MissingJsonContentType(_) => {
                "Missing 'Content-Type: application/json' header".to_string()
            }
            _ => "Invalid request body".to_string(),
        };

        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", &message)
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(error: sea_orm::DbErr) -> Self {
        match error {
            sea_orm::DbErr::RecordNotFound(record) => Self::new(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                &format!("Record not found: {}", record),
            ),
            sea_orm::DbErr::Conn(connection_err) => {
                tracing::error!("Database connection error: {:?}", connection_err);
                service_unavailable("Database service unavailable")
            }
            sea_orm::DbErr::ConnectionAcquire(acquire_err) => {
                tracing::error!("Database pool exhausted: {:?}", acquire_err);
                service_unavailable("Database service unavailable")
            }
            _ => {
                tracing::error!("Database error: {:?}", error);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "Database error occurred",
                )
            }
        }
    }
}

impl From<NoteServiceError> for ApiError {
    fn from(error: NoteServiceError) -> Self {
        match error {
            NoteServiceError::Validation { field, message } => {
                let details = json!({ "field": field, "message": &message });
                validation_error(&message, details)
            }
            NoteServiceError::NotFound { id } => {
                ApiError::new(StatusCode::NOT_FOUND, "NOTE_NOT_FOUND", "Note not found")
                    .with_details(json!({ "note_id": id }))
            }
            NoteServiceError::Store(db_err) => db_err.into(),
        }
    }
}

/// Seconds a client should wait before retrying after the store became unreachable
pub const STORE_RETRY_AFTER_SECS: u64 = 5;

/// Create a 503 error carrying a `Retry-After` hint
pub fn service_unavailable(message: &str) -> ApiError {
    ApiError::new(
        StatusCode::SERVICE_UNAVAILABLE,
        "SERVICE_UNAVAILABLE",
        message,
    )
    .with_retry_after(STORE_RETRY_AFTER_SECS)
}

/// Create a validation error with field details
pub fn validation_error(message: &str, field_errors: serde_json::Value) -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message).with_details(field_errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn test_api_error_basic() {
        let error = ApiError::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            "Test error message",
        );

        assert_eq!(error.code, Box::from("VALIDATION_FAILED"));
        assert_eq!(error.message, Box::from("Test error message"));
        assert_eq!(error.details, None);
        assert_eq!(error.retry_after, None);
    }

    #[test]
    fn test_retry_after_header() {
        let error = ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "Database service unavailable",
        )
        .with_retry_after(5);

        let response = error.into_response();

        assert_eq!(response.headers().get("retry-after").unwrap(), "5");
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/problem+json"
        );
    }

    #[test]
    fn test_error_type_mapping() {
        let not_found_error: ApiError = ErrorType::NotFound.into();
        assert_eq!(not_found_error.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found_error.code, Box::from("NOT_FOUND"));
        assert_eq!(not_found_error.message, Box::from("Not Found"));
        assert_eq!(not_found_error.retry_after, None);

        let unavailable: ApiError = ErrorType::ServiceUnavailable.into();
        assert_eq!(unavailable.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(unavailable.retry_after, Some(STORE_RETRY_AFTER_SECS));
    }

    #[test]
    fn test_trace_id_generation() {
        let error = ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER_ERROR",
            "Test error",
        );

        let trace_id = error.trace_id.expect("trace id present");
        assert!(trace_id.starts_with("corr-"));
        assert_eq!(trace_id.len(), 13); // "corr-" + 8 chars
    }

    #[test]
    fn test_database_error_mapping() {
        let api_error: ApiError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.message, Box::from("Database error occurred"));

        let api_error: ApiError = sea_orm::DbErr::RecordNotFound("notes".to_string()).into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert!(api_error.message.contains("notes"));
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let api_error: ApiError = NoteServiceError::validation("name", "name is required").into();

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.code, Box::from("VALIDATION_FAILED"));
        assert_eq!(api_error.message, Box::from("name is required"));
        let details = api_error.details.expect("field details");
        assert_eq!(details["field"], "name");
    }

    #[test]
    fn test_not_found_maps_to_404_with_id() {
        let api_error: ApiError = NoteServiceError::NotFound { id: 42 }.into();

        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.code, Box::from("NOTE_NOT_FOUND"));
        assert_eq!(api_error.details, Some(Box::new(json!({ "note_id": 42 }))));
    }

    #[test]
    fn test_store_error_maps_to_5xx() {
        let api_error: ApiError =
            NoteServiceError::Store(sea_orm::DbErr::Custom("constraint".to_string())).into();
        assert!(api_error.status.is_server_error());

        let api_error: ApiError = NoteServiceError::Store(sea_orm::DbErr::Conn(
            sea_orm::RuntimeErr::Internal("refused".to_string()),
        ))
        .into();
        assert_eq!(api_error.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(api_error.retry_after, Some(STORE_RETRY_AFTER_SECS));

        let response = api_error.into_response();
        assert_eq!(response.headers().get("retry-after").unwrap(), "5");
    }

    #[test]
    fn test_repository_not_found_keeps_note_id() {
        let error = NoteServiceError::from_repository(
            7,
            RepositoryError::NotFound("no visible note".to_string()),
        );
        assert!(matches!(error, NoteServiceError::NotFound { id: 7 }));

        let error = NoteServiceError::from_repository(
            7,
            RepositoryError::Database(sea_orm::DbErr::Custom("io".to_string())),
        );
        assert!(matches!(error, NoteServiceError::Store(_)));
    }
}
