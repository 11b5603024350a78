//! # API Route Modules
//!
//! Route modules for the registration workflow API surface:
//!
//! - `verification` — one-time-code issuance and verification, and the tax
//!   id format check.
//! - `registration` — gated submission and the administrative listing.
//! - `lookup` — postal directory resolution with fallback.

pub mod lookup;
pub mod registration;
pub mod verification;
