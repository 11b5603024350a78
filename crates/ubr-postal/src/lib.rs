//! # ubr-postal — Postal Directory Lookup
//!
//! External collaborator of the registration workflow: resolves a 6-digit
//! postal code to city / state / country / post-office name. The upstream
//! directory gets a bounded wait (default 5 seconds); transport failures are
//! answered from a small static fallback table so the address step keeps
//! working through an outage.

pub mod client;
pub mod fallback;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ubr_core::PostalCode;

pub use client::{PostalDirectoryConfig, PostalLookupClient};

/// Resolved directory entry for one postal code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalRecord {
    pub postal_code: PostalCode,
    pub city: String,
    pub state: String,
    pub country: String,
    pub post_office: String,
}

/// Failures of a postal directory lookup.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// The directory has no entry for the code.
    #[error("no directory entry for this postal code")]
    NotFound,

    /// The upstream directory is unreachable or answered unusably, and the
    /// fallback table had no entry either.
    #[error("postal directory unavailable: {reason}")]
    ServiceUnavailable {
        /// Human-readable description of the transport failure.
        reason: String,
    },

    /// The bounded upstream wait elapsed.
    #[error("postal directory request timed out")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_wire_field_names() {
        let record = PostalRecord {
            postal_code: PostalCode::new("110001").unwrap(),
            city: "New Delhi".into(),
            state: "Delhi".into(),
            country: "India".into(),
            post_office: "Connaught Place".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["postalCode"], "110001");
        assert_eq!(json["postOffice"], "Connaught Place");
        assert_eq!(json["city"], "New Delhi");
    }

    #[test]
    fn lookup_error_messages_distinguish_cases() {
        assert!(LookupError::NotFound.to_string().contains("no directory entry"));
        let unavailable = LookupError::ServiceUnavailable {
            reason: "connection refused".into(),
        };
        assert!(unavailable.to_string().contains("connection refused"));
        assert!(LookupError::Timeout.to_string().contains("timed out"));
    }
}
