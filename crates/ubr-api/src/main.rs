//! UBR registration API server binary.
//!
//! State is in-memory with no persistence — challenges and accepted
//! registrations are lost on restart.

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use ubr_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let port = config.port;

    if config.admin_token.is_none() {
        tracing::warn!("UBR_ADMIN_TOKEN not set; the registration listing is unauthenticated");
    }

    let state = AppState::with_config(config);
    tracing::info!(
        generator = state.ledger.generator_name(),
        "verification ledger initialized"
    );

    let app = ubr_api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("ubr-api listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
