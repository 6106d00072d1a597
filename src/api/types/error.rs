//! JSON error envelope
//!
//! Errors render as `{"error": {"message", "type", "param"?, "code"?}}`; the
//! `type` is derived from the status so handlers only pick a status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    NotFoundError,
    ServerError,
    ServiceUnavailableError,
}

impl From<StatusCode> for ApiErrorType {
    fn from(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFoundError,
            StatusCode::SERVICE_UNAVAILABLE => Self::ServiceUnavailableError,
            s if s.is_client_error() => Self::InvalidRequestError,
            _ => Self::ServerError,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    /// Offending request field, e.g. `session_id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

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
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type: status.into(),
                    param: None,
                    code: None,
                },
            },
        }
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.response.error.param = Some(param.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

/// Validation maps to 400, provider trouble to 503, configuration to 500
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { message } => Self::new(StatusCode::BAD_REQUEST, message),
            DomainError::NotFound { message } => Self::new(StatusCode::NOT_FOUND, message),
            DomainError::Provider { provider, message } => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                format!("{}: {}", provider, message),
            ),
            err @ DomainError::Timeout { .. } => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, err.to_string()).with_code("timeout")
            }
            DomainError::Configuration { message } | DomainError::Internal { message } => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}
