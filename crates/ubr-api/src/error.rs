//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps workflow failures to HTTP status codes and a JSON body of the form
//! `{ "error": { "code", "message", "details" } }`.
//!
//! Two client-correctable families share status 400 but stay distinguishable
//! through the machine code and message: field-shape failures (aggregated
//! into one response, with the per-field map in `details`) and workflow
//! state failures (code not found / expired / mismatched, unverified
//! submission, underage applicant — one distinguishing error per call).
//! Nothing here retries anything; retry is always the caller's decision.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ubr_core::FieldErrors;
use ubr_postal::LookupError;
use ubr_state::CheckError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. "VALIDATION_ERROR", "CODE_EXPIRED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Per-field error map, present only for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Join aggregated field messages for the top-level message line.
fn join_messages(errors: &FieldErrors) -> String {
    errors.values().cloned().collect::<Vec<_>>().join(", ")
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// One or more fields failed their shape rules (400). Carries the full
    /// per-field map so the client can annotate every failing input at once.
    #[error("validation failed: {}", join_messages(.0))]
    Validation(FieldErrors),

    /// The request body could not be parsed, or a single value failed a
    /// shape check outside the schema path (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No challenge is outstanding for the identity number (400).
    #[error("verification code not found, request a new code")]
    CodeNotFound,

    /// The challenge outlived its validity window (400).
    #[error("verification code has expired, request a new code")]
    CodeExpired,

    /// The submitted code does not match the issued one (400).
    #[error("incorrect verification code, try again")]
    CodeMismatch,

    /// Submission attempted without a verified challenge (400).
    #[error("identity verification required before submission")]
    NotVerified,

    /// The applicant has not completed 18 years (400).
    #[error("applicant must be at least 18 years old")]
    Underage,

    /// Missing or wrong admin token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Unknown route, or no directory data for the code (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Postal directory unreachable after fallback exhausted (503). The
    /// transport reason is logged server-side, never returned to clients.
    #[error("postal code lookup service temporarily unavailable")]
    Upstream {
        /// What actually went wrong, for the server log.
        reason: String,
    },
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::CodeNotFound => (StatusCode::BAD_REQUEST, "CODE_NOT_FOUND"),
            Self::CodeExpired => (StatusCode::BAD_REQUEST, "CODE_EXPIRED"),
            Self::CodeMismatch => (StatusCode::BAD_REQUEST, "CODE_MISMATCH"),
            Self::NotVerified => (StatusCode::BAD_REQUEST, "IDENTITY_NOT_VERIFIED"),
            Self::Underage => (StatusCode::BAD_REQUEST, "UNDERAGE"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Upstream { .. } => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Log server-side failures for operator visibility.
        if let Self::Upstream { reason } = &self {
            tracing::warn!(reason = %reason, "postal directory lookup failed");
        }

        let details = match &self {
            Self::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert newtype construction failures to API errors.
impl From<ubr_core::ValidationError> for AppError {
    fn from(err: ubr_core::ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

/// Convert ledger check failures to their distinguishing API errors.
impl From<CheckError> for AppError {
    fn from(err: CheckError) -> Self {
        match err {
            CheckError::NotFound => Self::CodeNotFound,
            CheckError::Expired => Self::CodeExpired,
            CheckError::Mismatch => Self::CodeMismatch,
        }
    }
}

/// Convert postal lookup failures to API errors.
impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound => {
                Self::NotFound("no directory entry for this postal code".to_string())
            }
            LookupError::ServiceUnavailable { reason } => Self::Upstream { reason },
            LookupError::Timeout => Self::Upstream {
                reason: "request timed out".to_string(),
            },
        }
    }
}
