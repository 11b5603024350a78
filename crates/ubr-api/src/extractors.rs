//! # Validated JSON Extraction
//!
//! Request bodies are decoded into plain-string DTOs, then run through the
//! declarative field validator so every shape problem is reported at once.
//! Domain newtypes are constructed only after the schema has passed.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use ubr_core::FieldErrors;

use crate::error::AppError;

/// Request DTOs that validate against one of the named field schemas.
pub trait Validate {
    /// Evaluate the schema; `Err` carries the aggregated per-field map.
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Turn a validator's error map into the trait's result shape.
pub fn into_result(errors: FieldErrors) -> Result<(), FieldErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Unwrap a JSON body extraction and run validation.
///
/// A body that failed to parse at all becomes [`AppError::BadRequest`];
/// a parsed body with failing fields becomes [`AppError::Validation`].
pub fn extract_validated_json<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError>
where
    T: Validate,
{
    let Json(value) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}
