//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps reconciler failures to HTTP status codes and JSON bodies carrying
//! a machine-readable code. Internal error details never reach the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use registrar_core::{RegistrarError, ValidationIssue};
use registrar_process::UnknownProcess;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// For validation errors, the list of `{path, message}` violations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown process (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Inputs failed schema validation (422).
    #[error("{} validation error(s)", .0.len())]
    Validation(Vec<ValidationIssue>),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Resolved resource has no usable identifier (422).
    #[error("malformed resource document: {0}")]
    MalformedDocument(String),

    /// Source could not be fetched (502).
    #[error("{0}")]
    Fetch(String),

    /// Catalogue lookup or write failed (502).
    #[error("{0}")]
    Catalogue(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::MalformedDocument(_) => (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_DOCUMENT"),
            Self::Fetch(_) => (StatusCode::BAD_GATEWAY, "FETCH_FAILED"),
            Self::Catalogue(_) => (StatusCode::BAD_GATEWAY, "CATALOGUE_ERROR"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Fetch(_) | Self::Catalogue(_) => {
                tracing::warn!(error = %self, "upstream failure")
            }
            _ => {}
        }

        let details = match &self {
            Self::Validation(issues) => serde_json::to_value(issues).ok(),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RegistrarError> for AppError {
    fn from(err: RegistrarError) -> Self {
        match err {
            RegistrarError::Validation(issues) => Self::Validation(issues),
            RegistrarError::MalformedDocument { reason } => Self::MalformedDocument(reason),
            e @ RegistrarError::Fetch(_) => Self::Fetch(e.to_string()),
            e @ RegistrarError::Catalogue(_) => Self::Catalogue(e.to_string()),
            e @ RegistrarError::Encode(_) => Self::Internal(e.to_string()),
        }
    }
}

impl From<UnknownProcess> for AppError {
    fn from(err: UnknownProcess) -> Self {
        Self::NotFound(err.to_string())
    }
}
