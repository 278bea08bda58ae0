//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Machine-readable error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorCode {
    InvalidRequest,
    NotFound,
    UsernameNotAvailable,
    InternalError,
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "INVALID_REQUEST"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::UsernameNotAvailable => write!(f, "USERNAME_NOT_AVAILABLE"),
            Self::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Error body returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, code: ApiErrorCode, message: Option<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: code,
                message,
                param: None,
            },
        }
    }

    /// Add parameter info
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.response.param = Some(param.into());
        self
    }

    /// Bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiErrorCode::InvalidRequest,
            Some(message.into()),
        )
    }

    /// Not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            ApiErrorCode::NotFound,
            Some(message.into()),
        )
    }

    /// Username rejected or taken; deliberately carries no detail
    pub fn not_available() -> Self {
        Self::new(StatusCode::CONFLICT, ApiErrorCode::UsernameNotAvailable, None)
    }

    /// Internal server error; the cause is logged, never returned
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorCode::InternalError,
            None,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::InvalidId { message } => Self::bad_request(message).with_param("user_id"),
            DomainError::Conflict { .. } => Self::not_available(),
            DomainError::Configuration { .. } | DomainError::Storage { .. } => {
                tracing::error!(error = %err, "Request failed");
                Self::internal()
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.response.message {
            Some(message) => write!(f, "{}: {}", self.response.error, message),
            None => write!(f, "{}", self.response.error),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("Invalid user ID");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error, ApiErrorCode::InvalidRequest);
        assert_eq!(err.response.message.as_deref(), Some("Invalid user ID"));
    }

    #[test]
    fn test_storage_error_is_opaque() {
        let api_err: ApiError = DomainError::storage("password authentication failed").into();

        assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
        let json = serde_json::to_string(&api_err.response).unwrap();
        assert_eq!(json, r#"{"error":"INTERNAL_ERROR"}"#);
    }

    #[test]
    fn test_configuration_error_is_opaque() {
        let api_err: ApiError = DomainError::configuration("bad confusable entry 'xy'").into();

        assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(api_err.response.message.is_none());
    }

    #[test]
    fn test_conflict_is_not_available() {
        let api_err: ApiError = DomainError::conflict("Fingerprint 'paypal' already exists").into();

        assert_eq!(api_err.status, StatusCode::CONFLICT);
        let json = serde_json::to_string(&api_err.response).unwrap();
        assert_eq!(json, r#"{"error":"USERNAME_NOT_AVAILABLE"}"#);
    }

    #[test]
    fn test_invalid_id_names_param() {
        let api_err: ApiError = DomainError::invalid_id("User ID cannot be empty").into();

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_err.response.param.as_deref(), Some("user_id"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ApiError::internal().to_string(), "INTERNAL_ERROR");
        assert_eq!(
            ApiError::not_found("missing").to_string(),
            "NOT_FOUND: missing"
        );
    }
}
