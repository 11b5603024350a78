//! # Registration Store
//!
//! Append-only collection of accepted submissions. Records are immutable
//! once stored; no update or delete operations exist. Listing returns
//! insertion order.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use ubr_core::{
    EmailAddress, IdentityNumber, MobileNumber, PostalCode, RegistrationId, TaxId,
};

/// Processing status of a stored registration.
///
/// Every record enters as `Pending`; later states are assigned by downstream
/// processing outside this service, which never mutates records here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    Pending,
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
        }
    }
}

/// One accepted submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    /// Generated identifier (`UBR-XXXXXXXXX`).
    pub id: RegistrationId,
    pub identity_number: IdentityNumber,
    pub tax_id: TaxId,
    pub applicant_name: String,
    pub gender: String,
    /// Date of birth in `YYYY-MM-DD` form, as validated at submission.
    pub date_of_birth: String,
    pub mobile_number: MobileNumber,
    pub email_address: EmailAddress,
    pub address: String,
    pub postal_code: PostalCode,
    pub city: String,
    pub state: String,
    /// Acceptance instant.
    pub submitted_at: DateTime<Utc>,
    pub status: RegistrationStatus,
}

/// Append-only in-memory store of registration records.
///
/// Shared via `Arc`. Appends take the write lock briefly; listing clones
/// under the read lock so callers never observe a partially appended state.
#[derive(Default)]
pub struct RegistrationStore {
    records: RwLock<Vec<RegistrationRecord>>,
}

impl RegistrationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. No uniqueness check is made beyond the generated
    /// id's collision probability — an accepted risk, not a guarantee.
    pub fn append(&self, record: RegistrationRecord) {
        self.records.write().push(record);
    }

    /// All records in insertion order.
    pub fn list_all(&self) -> Vec<RegistrationRecord> {
        self.records.read().clone()
    }

    /// Number of stored records.
    pub fn count(&self) -> usize {
        self.records.read().len()
    }
}
