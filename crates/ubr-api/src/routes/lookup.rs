//! # Postal Lookup Route
//!
//! Resolves a postal code to city / state / country / post-office name via
//! the directory client. Format rejection happens here, before any upstream
//! call is attempted.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use ubr_core::PostalCode;
use ubr_postal::PostalRecord;

use crate::error::AppError;
use crate::state::AppState;

/// Build the lookup router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/postal-codes/:code", get(lookup_postal_code))
}

/// GET /v1/postal-codes/{code} — resolve a postal code.
///
/// A malformed code is a 400 without touching the upstream. Directory
/// failures follow the client's fallback semantics: transport trouble
/// answers from the static table when possible, otherwise 503; an upstream
/// "no data" reply is a 404.
async fn lookup_postal_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<PostalRecord>, AppError> {
    let code = PostalCode::new(code.trim())?;
    let record = state.postal.lookup(&code).await?;
    Ok(Json(record))
}
