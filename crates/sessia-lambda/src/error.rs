use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<sessia_storage::error::StorageError> for ApiError {
    fn from(e: sessia_storage::error::StorageError) -> Self {
        match e {
            sessia_storage::error::StorageError::NotFound { key } => {
                ApiError::NotFound(format!("object not found: {key}"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<sessia_reports::error::ReportsError> for ApiError {
    fn from(e: sessia_reports::error::ReportsError) -> Self {
        use sessia_reports::error::ReportsError;
        match e {
            ReportsError::ClientNotFound { client_id } => {
                ApiError::NotFound(format!("client not found: {client_id}"))
            }
            // The empty-window message is part of the aggregator contract;
            // surface it verbatim.
            empty @ ReportsError::EmptyWindow { .. } => ApiError::NotFound(empty.to_string()),
            ReportsError::Storage(e) => e.into(),
        }
    }
}

impl From<sessia_bedrock::error::AgentError> for ApiError {
    fn from(e: sessia_bedrock::error::AgentError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<sessia_audit::error::AuditError> for ApiError {
    fn from(e: sessia_audit::error::AuditError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<sessia_core::error::CoreError> for ApiError {
    fn from(e: sessia_core::error::CoreError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
