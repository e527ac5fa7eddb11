//! Error responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Body of every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: message.into(),
            },
        }
    }

    /// Bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
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
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::Configuration { message } | DomainError::Internal { message } => {
                Self::internal(message)
            }
            DomainError::Provider { provider, message } => {
                tracing::error!(provider = %provider, error = %message, "Upstream call failed");
                Self::internal(message)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.response.error)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("Invalid body");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error, "Invalid body");
    }

    #[test]
    fn test_missing_credential_is_server_error() {
        let api_err: ApiError = DomainError::configuration("Missing SERPAPI_KEY").into();

        assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_err.response.error, "Missing SERPAPI_KEY");
    }

    #[test]
    fn test_provider_error_is_server_error() {
        let api_err: ApiError = DomainError::provider("openai", "HTTP 429: slow down").into();

        assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_err.response.error, "HTTP 429: slow down");
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::internal("Missing OPENAI_API_KEY");
        let json = serde_json::to_string(&err.response).unwrap();

        assert_eq!(json, r#"{"error":"Missing OPENAI_API_KEY"}"#);
    }
}
