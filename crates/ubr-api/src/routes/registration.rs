//! # Registration Routes
//!
//! Phase 2 of the workflow: the gated submission and the administrative
//! listing. Submission acceptance runs, in order: full-schema field
//! validation (aggregated), the verification gate against the ledger, the
//! age gate, then record construction, append, and challenge consumption.
//! The gates are re-checked here on every call — never cached — because
//! challenges expire independently of request timing.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ubr_core::{
    schema, temporal, EmailAddress, FieldErrors, FieldRecord, IdentityNumber, MobileNumber,
    PostalCode, RegistrationId, TaxId,
};
use ubr_state::{RegistrationRecord, RegistrationStatus};

use crate::auth;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, into_result, Validate};
use crate::state::AppState;

/// Minimum completed age of an applicant, in years.
const MINIMUM_AGE_YEARS: i32 = 18;

/// Build the registration router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/v1/registrations",
        post(submit_registration).get(list_registrations),
    )
}

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Full submission payload. Fields stay raw strings here so the schema can
/// report every shape problem in one pass; newtypes are constructed after.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRegistrationRequest {
    pub identity_number: String,
    pub code: String,
    pub tax_id: String,
    pub applicant_name: String,
    pub gender: String,
    /// `YYYY-MM-DD`.
    pub date_of_birth: String,
    pub mobile_number: String,
    pub email_address: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
}

/// Acceptance payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRegistrationResponse {
    pub registration_id: RegistrationId,
    pub submitted_at: DateTime<Utc>,
    pub status: RegistrationStatus,
    pub estimated_processing_time: String,
    pub message: String,
}

/// Administrative listing payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRegistrationsResponse {
    pub registrations: Vec<RegistrationRecord>,
    pub total: usize,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl Validate for SubmitRegistrationRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut record = FieldRecord::new();
        record.insert("identityNumber".into(), self.identity_number.clone());
        record.insert("code".into(), self.code.clone());
        record.insert("taxId".into(), self.tax_id.clone());
        record.insert("applicantName".into(), self.applicant_name.clone());
        record.insert("gender".into(), self.gender.clone());
        record.insert("dateOfBirth".into(), self.date_of_birth.clone());
        record.insert("mobileNumber".into(), self.mobile_number.clone());
        record.insert("emailAddress".into(), self.email_address.clone());
        record.insert("address".into(), self.address.clone());
        record.insert("postalCode".into(), self.postal_code.clone());
        record.insert("city".into(), self.city.clone());
        record.insert("state".into(), self.state.clone());
        into_result(schema::validate_named(schema::SUBMIT_REGISTRATION, &record))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/registrations — accept a submission.
///
/// Acceptance pipeline:
/// 1. Field validation against the full submission schema (aggregated).
/// 2. Verification gate: the ledger must hold a verified, unexpired
///    challenge for the identity number.
/// 3. Age gate: at least 18 completed years from dateOfBirth.
/// 4. Record construction, append, and challenge consumption — the
///    completed verification cannot be reused for a second submission.
async fn submit_registration(
    State(state): State<AppState>,
    body: Result<Json<SubmitRegistrationRequest>, JsonRejection>,
) -> Result<Json<SubmitRegistrationResponse>, AppError> {
    let req = extract_validated_json(body)?;

    let identity_number = IdentityNumber::new(req.identity_number.trim())?;
    let tax_id = TaxId::new(req.tax_id.trim())?;
    let mobile_number = MobileNumber::new(req.mobile_number.trim())?;
    let email_address = EmailAddress::new(req.email_address.trim())?;
    let postal_code = PostalCode::new(req.postal_code.trim())?;

    // The schema only requires dateOfBirth to be present; the calendar check
    // happens here and reports as a field error, not a workflow error.
    let date_of_birth = temporal::parse_date_of_birth(&req.date_of_birth).map_err(|_| {
        let mut errors = FieldErrors::new();
        errors.insert(
            "dateOfBirth".to_string(),
            "Date of birth must be a valid YYYY-MM-DD date".to_string(),
        );
        AppError::Validation(errors)
    })?;

    if !state.ledger.is_verified(&identity_number) {
        return Err(AppError::NotVerified);
    }

    let now = Utc::now();
    if temporal::age_in_years(date_of_birth, now.date_naive()) < MINIMUM_AGE_YEARS {
        return Err(AppError::Underage);
    }

    let record = RegistrationRecord {
        id: RegistrationId::generate(),
        identity_number: identity_number.clone(),
        tax_id,
        applicant_name: req.applicant_name.trim().to_string(),
        gender: req.gender.trim().to_string(),
        date_of_birth: date_of_birth.to_string(),
        mobile_number,
        email_address,
        address: req.address.trim().to_string(),
        postal_code,
        city: req.city.trim().to_string(),
        state: req.state.trim().to_string(),
        submitted_at: now,
        status: RegistrationStatus::Pending,
    };

    let response = SubmitRegistrationResponse {
        registration_id: record.id.clone(),
        submitted_at: record.submitted_at,
        status: record.status,
        estimated_processing_time: "7-10 business days".to_string(),
        message: "Registration submitted successfully".to_string(),
    };

    state.registrations.append(record);
    state.ledger.consume(&identity_number);
    tracing::info!(
        registration_id = response.registration_id.as_str(),
        "registration accepted"
    );

    Ok(Json(response))
}

/// GET /v1/registrations — administrative listing.
///
/// Returns every stored record in insertion order plus the total. Gated by
/// the configured admin token; see [`crate::auth`].
async fn list_registrations(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListRegistrationsResponse>, AppError> {
    auth::require_admin(&state.config, &headers)?;

    let registrations = state.registrations.list_all();
    let total = registrations.len();
    Ok(Json(ListRegistrationsResponse {
        registrations,
        total,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> SubmitRegistrationRequest {
        SubmitRegistrationRequest {
            identity_number: "123456789012".into(),
            code: "123456".into(),
            tax_id: "ABCDE1234F".into(),
            applicant_name: "Asha Prakash".into(),
            gender: "female".into(),
            date_of_birth: "1990-04-12".into(),
            mobile_number: "9876543210".into(),
            email_address: "asha@example.com".into(),
            address: "14 Lakeview Road, Sector 8".into(),
            postal_code: "110001".into(),
            city: "New Delhi".into(),
            state: "Delhi".into(),
        }
    }

    #[test]
    fn router_builds_successfully() {
        let _router = router();
    }

    #[test]
    fn valid_request_passes_validation() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn tax_id_shape_failure_references_format() {
        let mut req = valid_request();
        req.tax_id = "INVALID123".into();
        let errors = req.validate().unwrap_err();
        assert!(errors.get("taxId").unwrap().contains("format"));
    }

    #[test]
    fn validation_reports_all_failing_fields_at_once() {
        let mut req = valid_request();
        req.mobile_number = "1234567890".into();
        req.email_address = "not-an-email".into();
        req.address = "short".into();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn submission_request_deserializes_from_wire_names() {
        let req: SubmitRegistrationRequest = serde_json::from_str(
            r#"{
                "identityNumber": "123456789012",
                "code": "123456",
                "taxId": "ABCDE1234F",
                "applicantName": "Asha Prakash",
                "gender": "female",
                "dateOfBirth": "1990-04-12",
                "mobileNumber": "9876543210",
                "emailAddress": "asha@example.com",
                "address": "14 Lakeview Road, Sector 8",
                "postalCode": "110001",
                "city": "New Delhi",
                "state": "Delhi"
            }"#,
        )
        .unwrap();
        assert_eq!(req.identity_number, "123456789012");
        assert_eq!(req.tax_id, "ABCDE1234F");
    }
}
