//! # Verification Routes
//!
//! Phase 1 of the registration workflow: prove control of an identity
//! number. Issuance always succeeds and resets any prior challenge;
//! verification maps the ledger's distinguishing failures straight through
//! to the client. The tax id check is pure format acceptance behind an
//! artificial latency that models the authority round-trip.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use ubr_core::{schema, FieldErrors, FieldRecord, IdentityNumber, OneTimeCode, TaxId};
use ubr_state::CHALLENGE_TTL_SECS;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, into_result, Validate};
use crate::state::AppState;

/// Build the verification router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/verification/code", post(issue_code))
        .route("/v1/verification/verify", post(verify_code))
        .route("/v1/tax-id/validate", post(validate_tax_id))
}

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Request to issue a one-time code for an identity number.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCodeRequest {
    /// Identity number (12 digits).
    pub identity_number: String,
}

/// Issuance acknowledgement.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCodeResponse {
    pub message: String,
    pub code_sent: bool,
    /// Validity window of the issued code, in seconds.
    pub expires_in: i64,
}

/// Request to verify a previously issued code.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    /// Identity number (12 digits).
    pub identity_number: String,
    /// The code received out of band (6 digits).
    pub code: String,
}

/// Verification acknowledgement.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeResponse {
    pub verified: bool,
    pub identity_verified: bool,
    pub message: String,
}

/// Request to check a tax id's format.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxIdCheckRequest {
    /// Tax id (5 letters, 4 digits, 1 letter, uppercase).
    pub tax_id: String,
}

/// Tax id acceptance.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxIdCheckResponse {
    pub valid: bool,
    pub tax_id: TaxId,
    pub status: String,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl Validate for IssueCodeRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut record = FieldRecord::new();
        record.insert("identityNumber".into(), self.identity_number.clone());
        into_result(schema::validate_named(schema::SEND_CODE, &record))
    }
}

impl Validate for VerifyCodeRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut record = FieldRecord::new();
        record.insert("identityNumber".into(), self.identity_number.clone());
        record.insert("code".into(), self.code.clone());
        into_result(schema::validate_named(schema::VERIFY_CODE, &record))
    }
}

impl Validate for TaxIdCheckRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut record = FieldRecord::new();
        record.insert("taxId".into(), self.tax_id.clone());
        into_result(schema::validate_named(schema::VALIDATE_TAX_ID, &record))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/verification/code — issue a one-time code.
///
/// No pre-state requirement: re-issuing overwrites any outstanding challenge
/// for the identity number and resets its progress. Delivery over SMS is out
/// of scope; the debug log stands in for the delivery channel.
async fn issue_code(
    State(state): State<AppState>,
    body: Result<Json<IssueCodeRequest>, JsonRejection>,
) -> Result<Json<IssueCodeResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let id = IdentityNumber::new(req.identity_number.trim())?;

    let code = state.ledger.issue(&id);
    tracing::debug!(
        identity_number = id.as_str(),
        code = code.as_str(),
        "verification code issued"
    );

    Ok(Json(IssueCodeResponse {
        message: "verification code sent to the registered mobile number".to_string(),
        code_sent: true,
        expires_in: CHALLENGE_TTL_SECS,
    }))
}

/// POST /v1/verification/verify — check a submitted code.
///
/// Delegates to the ledger; its three failure cases (not found, expired,
/// mismatch) surface as distinguishing 400 responses. A mismatch leaves the
/// challenge retryable — resending is simply issuing again.
async fn verify_code(
    State(state): State<AppState>,
    body: Result<Json<VerifyCodeRequest>, JsonRejection>,
) -> Result<Json<VerifyCodeResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let id = IdentityNumber::new(req.identity_number.trim())?;
    let code = OneTimeCode::new(req.code.trim())?;

    state.ledger.check(&id, &code)?;

    Ok(Json(VerifyCodeResponse {
        verified: true,
        identity_verified: true,
        message: "verification code accepted".to_string(),
    }))
}

/// POST /v1/tax-id/validate — accept a well-formed tax id.
///
/// Format acceptance only; no external authority is consulted. The
/// configured delay models the authority's real validation latency so
/// clients exercise their pending states.
async fn validate_tax_id(
    State(state): State<AppState>,
    body: Result<Json<TaxIdCheckRequest>, JsonRejection>,
) -> Result<Json<TaxIdCheckResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let tax_id = TaxId::new(req.tax_id.trim())?;

    tokio::time::sleep(state.config.tax_check_delay).await;

    Ok(Json(TaxIdCheckResponse {
        valid: true,
        tax_id,
        status: "VALID".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_builds_successfully() {
        let _router = router();
    }

    #[test]
    fn issue_request_deserializes() {
        let req: IssueCodeRequest =
            serde_json::from_str(r#"{"identityNumber": "123456789012"}"#).unwrap();
        assert_eq!(req.identity_number, "123456789012");
    }

    #[test]
    fn verify_request_deserializes() {
        let req: VerifyCodeRequest =
            serde_json::from_str(r#"{"identityNumber": "123456789012", "code": "123456"}"#)
                .unwrap();
        assert_eq!(req.code, "123456");
    }

    #[test]
    fn issue_request_validation_rejects_short_numbers() {
        let req = IssueCodeRequest {
            identity_number: "123".into(),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(
            errors.get("identityNumber").map(String::as_str),
            Some("Identity number must be 12 digits")
        );
    }

    #[test]
    fn verify_request_validation_aggregates() {
        let req = VerifyCodeRequest {
            identity_number: "123".into(),
            code: "xyz".into(),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn tax_id_request_validation_accepts_canonical_form() {
        let req = TaxIdCheckRequest {
            tax_id: "ABCDE1234F".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn tax_id_response_serializes_with_wire_names() {
        let resp = TaxIdCheckResponse {
            valid: true,
            tax_id: TaxId::new("ABCDE1234F").unwrap(),
            status: "VALID".into(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["taxId"], "ABCDE1234F");
        assert_eq!(json["status"], "VALID");
    }
}
