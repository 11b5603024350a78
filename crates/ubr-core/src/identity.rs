//! # Identity Newtypes
//!
//! Domain-primitive newtypes for the registration workflow. Each identifier
//! is a distinct type — you cannot pass an [`IdentityNumber`] where a
//! [`TaxId`] is expected.
//!
//! ## Validation
//!
//! String-based identifiers validate format at construction time. The
//! generated [`RegistrationId`] is always valid by construction.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's `new()` constructor so that invalid values are
/// rejected at deserialization time — not silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Applicant-supplied identifiers (validated at construction)
// ---------------------------------------------------------------------------

/// National identity number of an applicant.
///
/// The primary key for the verification challenge. Exactly 12 digits;
/// leading zeros are significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IdentityNumber(String);

impl_validating_deserialize!(IdentityNumber);

impl IdentityNumber {
    /// Create an identity number from a string, validating the 12-digit form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIdentityNumber`] if the string is
    /// not exactly 12 digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.len() != 12 || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidIdentityNumber(s));
        }
        Ok(Self(s))
    }

    /// Access the identity number string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdentityNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-time verification code proving control of an identity number.
///
/// Exactly 6 digits. Short-lived: the ledger bounds its validity window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OneTimeCode(String);

impl_validating_deserialize!(OneTimeCode);

impl OneTimeCode {
    /// Create a one-time code from a string, validating the 6-digit form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidOneTimeCode`] if the string is not
    /// exactly 6 digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.len() != 6 || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidOneTimeCode(s));
        }
        Ok(Self(s))
    }

    /// Access the code string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OneTimeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tax identifier of an applicant.
///
/// Format: 5 uppercase letters, 4 digits, 1 uppercase letter (e.g.
/// `ABCDE1234F`). Lowercase input is rejected rather than folded — the
/// issuing authority's canonical form is uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TaxId(String);

impl_validating_deserialize!(TaxId);

impl TaxId {
    /// Create a tax id from a string, validating the AAAAA9999A form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTaxId`] if the format is invalid.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes[..5].iter().all(|b| b.is_ascii_uppercase())
            && bytes[5..9].iter().all(|b| b.is_ascii_digit())
            && bytes[9].is_ascii_uppercase();
        if !well_formed {
            return Err(ValidationError::InvalidTaxId(s));
        }
        Ok(Self(s))
    }

    /// Access the tax id string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mobile number of an applicant.
///
/// Exactly 10 digits with a leading digit of 6-9 (the national mobile
/// numbering plan; landline ranges are rejected).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MobileNumber(String);

impl_validating_deserialize!(MobileNumber);

impl MobileNumber {
    /// Create a mobile number from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidMobileNumber`] if the string is not
    /// 10 digits starting with 6-9.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let well_formed = s.len() == 10
            && s.chars().all(|c| c.is_ascii_digit())
            && matches!(s.as_bytes()[0], b'6'..=b'9');
        if !well_formed {
            return Err(ValidationError::InvalidMobileNumber(s));
        }
        Ok(Self(s))
    }

    /// Access the mobile number string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Postal code. Exactly 6 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PostalCode(String);

impl_validating_deserialize!(PostalCode);

impl PostalCode {
    /// Create a postal code from a string, validating the 6-digit form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPostalCode`] if the string is not
    /// exactly 6 digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.len() != 6 || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidPostalCode(s));
        }
        Ok(Self(s))
    }

    /// Access the postal code string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PostalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address of an applicant.
///
/// Accepted shape: `local@domain.tld` — non-empty local part of ASCII
/// alphanumerics and `._%+-`, a domain of alphanumerics, dots and dashes,
/// and a final label of at least two alphabetic characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EmailAddress(String);

impl_validating_deserialize!(EmailAddress);

impl EmailAddress {
    /// Create an email address from a string, validating the shape.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmailAddress`] if the shape check
    /// fails.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !Self::is_valid_shape(&s) {
            return Err(ValidationError::InvalidEmailAddress(s));
        }
        Ok(Self(s))
    }

    /// Shape check shared with the field validator.
    pub fn is_valid_shape(s: &str) -> bool {
        let Some((local, domain)) = s.split_once('@') else {
            return false;
        };
        if local.is_empty()
            || !local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
        {
            return false;
        }
        let Some((host, label)) = domain.rsplit_once('.') else {
            return false;
        };
        if host.is_empty()
            || !host
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }
        label.len() >= 2 && label.chars().all(|c| c.is_ascii_alphabetic())
    }

    /// Access the email address string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Generated identifiers (valid by construction)
// ---------------------------------------------------------------------------

/// Prefix carried by every generated registration id.
pub const REGISTRATION_ID_PREFIX: &str = "UBR";

const REGISTRATION_ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Identifier assigned to an accepted registration.
///
/// Format: `UBR-` followed by 9 random uppercase base36 characters
/// (e.g. `UBR-1Z4Q8K0PT`). Human-distinguishable from the applicant-supplied
/// numeric identifiers. Uniqueness rests on the 36^9 keyspace; collisions
/// are an accepted risk, not a guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RegistrationId(String);

impl_validating_deserialize!(RegistrationId);

impl RegistrationId {
    /// Generate a fresh random registration id.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..REGISTRATION_ID_SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        Self(format!("{REGISTRATION_ID_PREFIX}-{suffix}"))
    }

    /// Create a registration id from an existing string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRegistrationId`] if the string is
    /// not the prefix followed by 9 uppercase base36 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let well_formed = s
            .strip_prefix(REGISTRATION_ID_PREFIX)
            .and_then(|rest| rest.strip_prefix('-'))
            .map(|suffix| {
                suffix.len() == REGISTRATION_ID_SUFFIX_LEN
                    && suffix
                        .chars()
                        .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
            })
            .unwrap_or(false);
        if !well_formed {
            return Err(ValidationError::InvalidRegistrationId(s));
        }
        Ok(Self(s))
    }

    /// Access the registration id string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
