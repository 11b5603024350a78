//! # Declarative Field Validation
//!
//! Per-field rule evaluation for the four request shapes of the registration
//! workflow. Each schema is a table of [`FieldRule`]s; evaluation produces a
//! field-name → error-message map covering every failing field, so a caller
//! sees all shape problems in one response rather than one at a time.
//!
//! Rules are evaluated in a fixed order per field, short-circuiting on the
//! first failure: required → (skip when optional and empty) → email shape →
//! pattern → minimum length → maximum length. Values are trimmed before any
//! check.
//!
//! Patterns are a closed [`Pattern`] enum with explicit character checks
//! rather than regex strings, matching how the domain newtypes in
//! [`crate::identity`] validate.
//!
//! An unrecognized schema name yields an empty error map: validation simply
//! does not apply. This is a deliberate permissive default for callers wired
//! to a schema that does not exist yet, not a failure mode.

use std::collections::BTreeMap;

use crate::identity::{EmailAddress, MobileNumber, TaxId};

/// Raw field-name → value record, as decoded from a request body.
pub type FieldRecord = BTreeMap<String, String>;

/// Field-name → error-message map. Empty means valid.
pub type FieldErrors = BTreeMap<String, String>;

/// Schema name for one-time-code issuance requests.
pub const SEND_CODE: &str = "send-code";
/// Schema name for one-time-code verification requests.
pub const VERIFY_CODE: &str = "verify-code";
/// Schema name for tax id format checks.
pub const VALIDATE_TAX_ID: &str = "validate-tax-id";
/// Schema name for full registration submissions.
pub const SUBMIT_REGISTRATION: &str = "submit-registration";

/// Shape pattern a trimmed field value must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Exactly `n` ASCII digits.
    Digits(usize),
    /// 5 uppercase letters, 4 digits, 1 uppercase letter.
    TaxId,
    /// 10 digits with a leading 6-9.
    MobileNumber,
}

impl Pattern {
    /// Whether the value matches this pattern.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Digits(n) => {
                value.len() == *n && value.chars().all(|c| c.is_ascii_digit())
            }
            Self::TaxId => TaxId::new(value).is_ok(),
            Self::MobileNumber => MobileNumber::new(value).is_ok(),
        }
    }
}

/// One field's rule set. A single caller-facing message covers every rule in
/// the set: the field either conforms to its documented shape or it does not.
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Wire name of the field (camelCase, as it appears in request bodies).
    pub name: &'static str,
    /// Reject empty / whitespace-only values.
    pub required: bool,
    /// Validate against the shared email shape.
    pub email: bool,
    /// Shape pattern, if any.
    pub pattern: Option<Pattern>,
    /// Minimum trimmed length, if any.
    pub min_length: Option<usize>,
    /// Maximum trimmed length, if any.
    pub max_length: Option<usize>,
    /// Caller-facing message for any failure of this field.
    pub message: &'static str,
}

impl FieldRule {
    const fn new(name: &'static str, message: &'static str) -> Self {
        Self {
            name,
            required: true,
            email: false,
            pattern: None,
            min_length: None,
            max_length: None,
            message,
        }
    }

    const fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    const fn email(mut self) -> Self {
        self.email = true;
        self
    }

    const fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }
}

const IDENTITY_NUMBER_RULE: FieldRule =
    FieldRule::new("identityNumber", "Identity number must be 12 digits")
        .pattern(Pattern::Digits(12));

const CODE_RULE: FieldRule =
    FieldRule::new("code", "Code must be 6 digits").pattern(Pattern::Digits(6));

const TAX_ID_RULE: FieldRule = FieldRule::new(
    "taxId",
    "Tax id must be in format: 5 letters, 4 digits, 1 letter",
)
.pattern(Pattern::TaxId);

const SEND_CODE_RULES: &[FieldRule] = &[IDENTITY_NUMBER_RULE];

const VERIFY_CODE_RULES: &[FieldRule] = &[IDENTITY_NUMBER_RULE, CODE_RULE];

const VALIDATE_TAX_ID_RULES: &[FieldRule] = &[TAX_ID_RULE];

const SUBMIT_REGISTRATION_RULES: &[FieldRule] = &[
    IDENTITY_NUMBER_RULE,
    CODE_RULE,
    TAX_ID_RULE,
    FieldRule::new("applicantName", "Name must be between 2 and 100 characters")
        .length(2, 100),
    FieldRule::new("gender", "Gender is required"),
    FieldRule::new("dateOfBirth", "Date of birth is required"),
    FieldRule::new(
        "mobileNumber",
        "Mobile number must be 10 digits starting with 6-9",
    )
    .pattern(Pattern::MobileNumber),
    FieldRule::new("emailAddress", "Valid email address is required").email(),
    FieldRule::new("address", "Address must be between 10 and 500 characters")
        .length(10, 500),
    FieldRule::new("postalCode", "Postal code must be 6 digits")
        .pattern(Pattern::Digits(6)),
    FieldRule::new("city", "City is required"),
    FieldRule::new("state", "State is required"),
];

/// Resolve a schema name to its rule table.
fn schema_rules(name: &str) -> Option<&'static [FieldRule]> {
    match name {
        SEND_CODE => Some(SEND_CODE_RULES),
        VERIFY_CODE => Some(VERIFY_CODE_RULES),
        VALIDATE_TAX_ID => Some(VALIDATE_TAX_ID_RULES),
        SUBMIT_REGISTRATION => Some(SUBMIT_REGISTRATION_RULES),
        _ => None,
    }
}

/// Validate a record against a named schema.
///
/// Returns one entry per failing field. An unrecognized schema name returns
/// an empty map (validation does not apply — see the module docs). Fields
/// present in the record but absent from the schema are ignored.
pub fn validate_named(schema: &str, record: &FieldRecord) -> FieldErrors {
    let Some(rules) = schema_rules(schema) else {
        return FieldErrors::new();
    };

    let mut errors = FieldErrors::new();
    for rule in rules {
        let raw = record.get(rule.name).map(String::as_str).unwrap_or("");
        if let Some(message) = check_field(raw, rule) {
            errors.insert(rule.name.to_string(), message);
        }
    }
    errors
}

/// Evaluate one field's rules in order, returning the first failure.
fn check_field(raw: &str, rule: &FieldRule) -> Option<String> {
    let value = raw.trim();

    if value.is_empty() {
        if rule.required {
            return Some(rule.message.to_string());
        }
        // Optional and empty: remaining checks do not apply.
        return None;
    }

    if rule.email && !EmailAddress::is_valid_shape(value) {
        return Some(rule.message.to_string());
    }

    if let Some(pattern) = &rule.pattern {
        if !pattern.matches(value) {
            return Some(rule.message.to_string());
        }
    }

    if let Some(min) = rule.min_length {
        if value.chars().count() < min {
            return Some(rule.message.to_string());
        }
    }

    if let Some(max) = rule.max_length {
        if value.chars().count() > max {
            return Some(rule.message.to_string());
        }
    }

    None
}
