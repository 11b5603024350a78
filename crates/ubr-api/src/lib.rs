//! # ubr-api — Axum API Service for the UBR Registration Workflow
//!
//! Request handling for the two-phase registration: one-time-code issuance
//! and verification, tax id format checks, the gated submission, the
//! administrative listing, and postal directory lookup.
//!
//! ## API Surface
//!
//! | Route                        | Module                    | Operation            |
//! |------------------------------|---------------------------|----------------------|
//! | `POST /v1/verification/code`   | [`routes::verification`] | issue one-time code  |
//! | `POST /v1/verification/verify` | [`routes::verification`] | verify code          |
//! | `POST /v1/tax-id/validate`     | [`routes::verification`] | tax id format check  |
//! | `POST /v1/registrations`       | [`routes::registration`] | submit registration  |
//! | `GET /v1/registrations`        | [`routes::registration`] | admin listing        |
//! | `GET /v1/postal-codes/{code}`  | [`routes::lookup`]       | postal lookup        |
//!
//! Health probes (`/health`, `/health/readiness`) sit outside the admin
//! gate and carry no state. Unknown routes answer with the same structured
//! JSON error body as every other failure.

pub mod auth;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::verification::router())
        .merge(routes::registration::router())
        .merge(routes::lookup::router());

    Router::new()
        .route("/health", get(liveness))
        .route("/health/readiness", get(readiness))
        .merge(api)
        .fallback(unknown_route)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — verifies the shared stores are accessible.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let _ = state.ledger.len();
    let _ = state.registrations.count();
    (StatusCode::OK, "ready")
}

/// Fallback for unknown routes: a structured 404 body.
async fn unknown_route() -> AppError {
    AppError::NotFound("route not found".to_string())
}
