//! # Application State
//!
//! Shared state for the Axum application: the verification ledger, the
//! registration store, the postal directory client, and configuration.
//! Constructed once per process; handlers receive it by reference through
//! `axum::extract::State`.

use std::sync::Arc;
use std::time::Duration;

use ubr_core::OneTimeCode;
use ubr_postal::{PostalDirectoryConfig, PostalLookupClient};
use ubr_state::{
    CodeGenerator, FixedCodeGenerator, RandomCodeGenerator, RegistrationStore, VerificationLedger,
};

/// Process configuration, resolved once at startup.
///
/// Environment variables govern only the transport collaborators and the
/// demo-code override; none of the workflow semantics are env-driven.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listening port (`UBR_PORT`, default 8080).
    pub port: u16,
    /// Admin bearer token gating the registration listing
    /// (`UBR_ADMIN_TOKEN`; unset leaves the listing open).
    pub admin_token: Option<String>,
    /// Fixed verification code for demo/scripted environments
    /// (`UBR_DEMO_CODE`). Unset means random codes — the production path.
    pub demo_code: Option<OneTimeCode>,
    /// Artificial latency of the tax id check, modeling the authority
    /// round-trip. Zeroed in tests.
    pub tax_check_delay: Duration,
    /// Postal directory client configuration (`UBR_POSTAL_BASE_URL`).
    pub postal: PostalDirectoryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            admin_token: None,
            demo_code: None,
            tax_check_delay: Duration::from_millis(1200),
            postal: PostalDirectoryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(port) = std::env::var("UBR_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.port = port;
        }

        if let Ok(token) = std::env::var("UBR_ADMIN_TOKEN") {
            if !token.is_empty() {
                config.admin_token = Some(token);
            }
        }

        if let Ok(raw) = std::env::var("UBR_DEMO_CODE") {
            match OneTimeCode::new(raw) {
                Ok(code) => config.demo_code = Some(code),
                Err(e) => tracing::warn!("ignoring UBR_DEMO_CODE: {e}"),
            }
        }

        if let Ok(url) = std::env::var("UBR_POSTAL_BASE_URL") {
            if !url.is_empty() {
                config.postal.base_url = url;
            }
        }

        config
    }
}

/// Shared application state passed to all route handlers.
///
/// Cheaply cloneable via `Arc` — all clones share the same stores.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<VerificationLedger>,
    pub registrations: Arc<RegistrationStore>,
    pub postal: Arc<PostalLookupClient>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create state with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create state from explicit configuration.
    ///
    /// The code-generation strategy is selected here and nowhere else:
    /// a configured demo code opts into [`FixedCodeGenerator`], and the
    /// choice is logged so a misconfigured production deployment is visible.
    pub fn with_config(config: AppConfig) -> Self {
        let generator: Box<dyn CodeGenerator> = match &config.demo_code {
            Some(code) => {
                tracing::warn!(
                    "fixed demo verification code enabled; every challenge will accept the configured code"
                );
                Box::new(FixedCodeGenerator::new(code.clone()))
            }
            None => Box::new(RandomCodeGenerator),
        };

        let postal = PostalLookupClient::new(config.postal.clone())
            .expect("postal directory client construction");

        Self {
            ledger: Arc::new(VerificationLedger::new(generator)),
            registrations: Arc::new(RegistrationStore::new()),
            postal: Arc::new(postal),
            config: Arc::new(config),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_random_codes() {
        let state = AppState::new();
        assert_eq!(state.ledger.generator_name(), "RandomCodeGenerator");
    }

    #[test]
    fn demo_code_selects_the_fixed_generator() {
        let config = AppConfig {
            demo_code: Some(OneTimeCode::new("123456").unwrap()),
            ..AppConfig::default()
        };
        let state = AppState::with_config(config);
        assert_eq!(state.ledger.generator_name(), "FixedCodeGenerator");
    }

    #[test]
    fn clones_share_the_same_stores() {
        let state = AppState::new();
        let clone = state.clone();
        let id = ubr_core::IdentityNumber::new("123456789012").unwrap();
        let code = state.ledger.issue(&id);
        assert!(clone.ledger.check(&id, &code).is_ok());
    }
}
