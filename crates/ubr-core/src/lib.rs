//! # ubr-core — Domain Primitives for the UBR Registration Workflow
//!
//! Leaf crate of the UBR Stack. Holds everything the stateful services and
//! the API layer agree on but that carries no state of its own:
//!
//! - [`identity`] — validated newtypes for every applicant-supplied
//!   identifier and the generated registration id.
//! - [`schema`] — the declarative field validator: four named request
//!   schemas, aggregated per-field error maps, pure evaluation.
//! - [`temporal`] — date-of-birth parsing and whole-year age computation.
//! - [`error`] — construction-time validation errors.

pub mod error;
pub mod identity;
pub mod schema;
pub mod temporal;

// Re-export primary types.
pub use error::ValidationError;
pub use identity::{
    EmailAddress, IdentityNumber, MobileNumber, OneTimeCode, PostalCode, RegistrationId, TaxId,
    REGISTRATION_ID_PREFIX,
};
pub use schema::{FieldErrors, FieldRecord};
