//! # Verification Ledger
//!
//! Keyed store of in-flight one-time-code challenges, one per identity
//! number. The ledger is the sole gate between "identity number is known"
//! and "identity number is trusted for this session": downstream steps must
//! re-ask [`VerificationLedger::is_verified`] rather than cache the answer,
//! because challenges expire independently of request timing.
//!
//! ## Lifecycle per identity number
//!
//! ```text
//! (none) ──issue──▶ issued ──check, match──▶ verified ──consume──▶ (none)
//!              ▲        │                        │
//!              │        └──check, mismatch──────▶│ (challenge retained)
//!              └──issue (overwrites, resets)◀────┘
//! ```
//!
//! Expiry is lazy: a challenge older than [`CHALLENGE_TTL_SECS`] is treated
//! as absent wherever it is read, and a `check` that observes one removes
//! it. No background sweeper runs; memory is bounded by one challenge per
//! identity number.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use thiserror::Error;
use ubr_core::{IdentityNumber, OneTimeCode};

use crate::generator::CodeGenerator;

/// Validity window of a challenge, in seconds (10 minutes).
pub const CHALLENGE_TTL_SECS: i64 = 600;

/// Stored state of one outstanding or completed code-verification attempt.
#[derive(Debug, Clone)]
pub struct Challenge {
    /// The code the applicant must echo back.
    pub code: OneTimeCode,
    /// Issuance instant; the TTL counts from here.
    pub issued_at: DateTime<Utc>,
    /// Whether a matching code has been presented within the window.
    pub verified: bool,
}

impl Challenge {
    fn expired(&self, now: DateTime<Utc>) -> bool {
        now - self.issued_at > Duration::seconds(CHALLENGE_TTL_SECS)
    }
}

/// Distinguishing failures of a code check. Each case carries its own
/// message so callers can branch on meaning, not just on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckError {
    /// No challenge is outstanding for the identity number.
    #[error("no verification code outstanding for this identity number")]
    NotFound,

    /// The challenge outlived its validity window and has been removed.
    #[error("verification code has expired")]
    Expired,

    /// The submitted code differs from the issued one. The challenge stays
    /// in place; the caller may retry.
    #[error("verification code mismatch")]
    Mismatch,
}

/// Keyed challenge store. Shared via `Arc`; per-key operations on different
/// identity numbers never block each other. Concurrent writes to the same
/// key resolve last-writer-wins, which the short code lifetime makes
/// acceptable.
pub struct VerificationLedger {
    challenges: DashMap<IdentityNumber, Challenge>,
    generator: Box<dyn CodeGenerator>,
}

impl VerificationLedger {
    /// Create a ledger around the given code-generation strategy.
    pub fn new(generator: Box<dyn CodeGenerator>) -> Self {
        Self {
            challenges: DashMap::new(),
            generator,
        }
    }

    /// Name of the configured code-generation strategy.
    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    /// Number of stored challenges (live and not-yet-collected stale ones).
    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    /// Whether the ledger holds no challenges at all.
    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    /// Issue a fresh challenge for the identity number, overwriting any
    /// prior one. Overwriting resets verification progress: a new code
    /// invalidates whatever state the old challenge had reached.
    pub fn issue(&self, id: &IdentityNumber) -> OneTimeCode {
        self.issue_at(id, Utc::now())
    }

    /// [`Self::issue`] at an explicit instant.
    pub fn issue_at(&self, id: &IdentityNumber, now: DateTime<Utc>) -> OneTimeCode {
        let code = self.generator.generate();
        self.challenges.insert(
            id.clone(),
            Challenge {
                code: code.clone(),
                issued_at: now,
                verified: false,
            },
        );
        code
    }

    /// Check a submitted code against the outstanding challenge.
    ///
    /// On a match the challenge is marked verified; re-checking an
    /// already-verified, unexpired challenge succeeds again. A stale
    /// challenge is removed as a side effect and reported as
    /// [`CheckError::Expired`]; the next check for the same key reports
    /// [`CheckError::NotFound`].
    pub fn check(&self, id: &IdentityNumber, submitted: &OneTimeCode) -> Result<(), CheckError> {
        self.check_at(id, submitted, Utc::now())
    }

    /// [`Self::check`] at an explicit instant.
    pub fn check_at(
        &self,
        id: &IdentityNumber,
        submitted: &OneTimeCode,
        now: DateTime<Utc>,
    ) -> Result<(), CheckError> {
        let Some(mut entry) = self.challenges.get_mut(id) else {
            return Err(CheckError::NotFound);
        };

        if entry.expired(now) {
            // Release the shard lock before removing the stale entry.
            drop(entry);
            self.challenges.remove(id);
            return Err(CheckError::Expired);
        }

        if entry.code != *submitted {
            return Err(CheckError::Mismatch);
        }

        entry.verified = true;
        Ok(())
    }

    /// Whether a non-expired, verified challenge exists for the identity
    /// number. Expired entries count as absent; they are left in place for
    /// the next `check` to collect.
    pub fn is_verified(&self, id: &IdentityNumber) -> bool {
        self.is_verified_at(id, Utc::now())
    }

    /// [`Self::is_verified`] at an explicit instant.
    pub fn is_verified_at(&self, id: &IdentityNumber, now: DateTime<Utc>) -> bool {
        self.challenges
            .get(id)
            .map(|entry| entry.verified && !entry.expired(now))
            .unwrap_or(false)
    }

    /// Remove the challenge for the identity number. Called on successful
    /// submission so the completed verification cannot be reused.
    pub fn consume(&self, id: &IdentityNumber) {
        self.challenges.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{FixedCodeGenerator, RandomCodeGenerator};

    fn fixed_ledger(code: &str) -> VerificationLedger {
        VerificationLedger::new(Box::new(FixedCodeGenerator::new(
            OneTimeCode::new(code).unwrap(),
        )))
    }

    fn identity(s: &str) -> IdentityNumber {
        IdentityNumber::new(s).unwrap()
    }

    #[test]
    fn issue_then_correct_check_verifies() {
        let ledger = fixed_ledger("123456");
        let id = identity("123456789012");

        let code = ledger.issue(&id);
        assert!(!ledger.is_verified(&id));

        ledger.check(&id, &code).unwrap();
        assert!(ledger.is_verified(&id));
    }

    #[test]
    fn check_without_issue_is_not_found() {
        let ledger = fixed_ledger("123456");
        let id = identity("123456789012");
        let result = ledger.check(&id, &OneTimeCode::new("123456").unwrap());
        assert_eq!(result, Err(CheckError::NotFound));
    }

    #[test]
    fn mismatch_leaves_challenge_retryable() {
        let ledger = fixed_ledger("123456");
        let id = identity("123456789012");
        let code = ledger.issue(&id);

        let wrong = OneTimeCode::new("000000").unwrap();
        assert_eq!(ledger.check(&id, &wrong), Err(CheckError::Mismatch));
        assert!(!ledger.is_verified(&id));

        // The correct code still works afterwards.
        ledger.check(&id, &code).unwrap();
        assert!(ledger.is_verified(&id));
    }

    #[test]
    fn reverification_is_idempotent() {
        let ledger = fixed_ledger("123456");
        let id = identity("123456789012");
        let code = ledger.issue(&id);

        ledger.check(&id, &code).unwrap();
        ledger.check(&id, &code).unwrap();
        assert!(ledger.is_verified(&id));
    }

    #[test]
    fn expired_check_removes_the_challenge() {
        let ledger = fixed_ledger("123456");
        let id = identity("123456789012");
        let issued = Utc::now();
        let code = ledger.issue_at(&id, issued);

        let late = issued + Duration::seconds(CHALLENGE_TTL_SECS + 1);
        assert_eq!(ledger.check_at(&id, &code, late), Err(CheckError::Expired));

        // The stale entry is gone; the same code now reports NotFound.
        assert_eq!(ledger.check_at(&id, &code, late), Err(CheckError::NotFound));
    }

    #[test]
    fn check_exactly_at_ttl_boundary_still_passes() {
        let ledger = fixed_ledger("123456");
        let id = identity("123456789012");
        let issued = Utc::now();
        let code = ledger.issue_at(&id, issued);

        let boundary = issued + Duration::seconds(CHALLENGE_TTL_SECS);
        assert!(ledger.check_at(&id, &code, boundary).is_ok());
    }

    #[test]
    fn verified_challenge_expires_too() {
        let ledger = fixed_ledger("123456");
        let id = identity("123456789012");
        let issued = Utc::now();
        let code = ledger.issue_at(&id, issued);
        ledger.check_at(&id, &code, issued).unwrap();
        assert!(ledger.is_verified_at(&id, issued));

        let late = issued + Duration::seconds(CHALLENGE_TTL_SECS + 1);
        assert!(!ledger.is_verified_at(&id, late));
    }

    #[test]
    fn reissue_overwrites_and_resets_progress() {
        let ledger = fixed_ledger("123456");
        let id = identity("123456789012");

        let code = ledger.issue(&id);
        ledger.check(&id, &code).unwrap();
        assert!(ledger.is_verified(&id));

        // A fresh code invalidates the verified state of the old challenge.
        ledger.issue(&id);
        assert!(!ledger.is_verified(&id));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn consume_removes_the_challenge() {
        let ledger = fixed_ledger("123456");
        let id = identity("123456789012");
        let code = ledger.issue(&id);
        ledger.check(&id, &code).unwrap();

        ledger.consume(&id);
        assert!(!ledger.is_verified(&id));
        assert_eq!(ledger.check(&id, &code), Err(CheckError::NotFound));
        assert!(ledger.is_empty());
    }

    #[test]
    fn identity_numbers_are_independent() {
        let ledger = fixed_ledger("123456");
        let a = identity("111111111111");
        let b = identity("222222222222");

        let code_a = ledger.issue(&a);
        ledger.issue(&b);
        ledger.check(&a, &code_a).unwrap();

        assert!(ledger.is_verified(&a));
        assert!(!ledger.is_verified(&b));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn random_ledger_issues_checkable_codes() {
        let ledger = VerificationLedger::new(Box::new(RandomCodeGenerator));
        let id = identity("123456789012");
        let code = ledger.issue(&id);
        ledger.check(&id, &code).unwrap();
        assert!(ledger.is_verified(&id));
    }
}
