//! # Validation Errors
//!
//! Construction-time validation failures for the domain newtypes in
//! [`crate::identity`]. Each variant carries the offending raw value so the
//! message can echo it back to the caller.

use thiserror::Error;

/// Errors produced when a domain newtype rejects its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Identity number is not exactly 12 digits.
    #[error("invalid identity number (must be exactly 12 digits): {0}")]
    InvalidIdentityNumber(String),

    /// One-time code is not exactly 6 digits.
    #[error("invalid verification code (must be exactly 6 digits): {0}")]
    InvalidOneTimeCode(String),

    /// Tax id does not match the 5-letters / 4-digits / 1-letter uppercase form.
    #[error("invalid tax id (must be 5 letters, 4 digits, 1 letter, uppercase): {0}")]
    InvalidTaxId(String),

    /// Mobile number is not 10 digits starting with 6-9.
    #[error("invalid mobile number (must be 10 digits starting with 6-9): {0}")]
    InvalidMobileNumber(String),

    /// Postal code is not exactly 6 digits.
    #[error("invalid postal code (must be exactly 6 digits): {0}")]
    InvalidPostalCode(String),

    /// Email address does not match the accepted shape.
    #[error("invalid email address: {0}")]
    InvalidEmailAddress(String),

    /// Registration id is not `UBR-` followed by 9 uppercase base36 characters.
    #[error("invalid registration id: {0}")]
    InvalidRegistrationId(String),

    /// Date is not a valid calendar date in `YYYY-MM-DD` form.
    #[error("invalid date (must be a valid YYYY-MM-DD date): {0}")]
    InvalidDate(String),
}
