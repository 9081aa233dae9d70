//! Response types for the reconciliation engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a response from a status and body.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// No principal, or one the engine cannot read.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            ApiError::new("UNAUTHENTICATED", message),
        )
    }

    /// The principal's role does not allow the operation.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, ApiError::new("FORBIDDEN", message))
    }

    /// Maps a failure of the earnings or payroll computations.
    ///
    /// Validation errors keep their 400; everything else becomes a 500
    /// `CALCULATION_ERROR` carrying the underlying message.
    pub fn calculation(error: EngineError) -> Self {
        if error.is_validation() {
            return error.into();
        }
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::with_details("CALCULATION_ERROR", "Calculation failed", error.to_string()),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            err @ EngineError::InvalidMonthKey { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(err.to_string()),
            },
            EngineError::InvalidField { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid field '{}': {}", field, message),
                    "The request contains invalid information",
                ),
            },
            err @ EngineError::RecordNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", err.to_string()),
            },
            EngineError::Storage { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORAGE_ERROR", "Ledger unavailable", message),
            },
        }
    }
}

/// Body returned by write endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// Always true; failures use [`ApiError`] instead.
    pub ok: bool,
    /// The record written.
    pub id: u64,
    /// Expense records whose reference was cleared, for lookup deletions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detached: Option<usize>,
}

impl Acknowledgement {
    /// Acknowledges a write to record `id`.
    pub fn new(id: u64) -> Self {
        Self {
            ok: true,
            id,
            detached: None,
        }
    }

    /// Acknowledges a lookup deletion that detached `detached` expenses.
    pub fn with_detached(id: u64, detached: usize) -> Self {
        Self {
            detached: Some(detached),
            ..Self::new(id)
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" while the process serves requests.
    pub status: String,
    /// Crate version.
    pub version: String,
}
