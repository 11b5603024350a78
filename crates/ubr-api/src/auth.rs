//! # Admin Token Check
//!
//! Bearer-token gate for the administrative registration listing. The token
//! comparison is constant-time. When no token is configured the gate is
//! open — a deliberate local-development posture, logged at startup by the
//! binary so it never goes unnoticed.

use axum::http::{header, HeaderMap};
use subtle::ConstantTimeEq;

use crate::error::AppError;
use crate::state::AppConfig;

/// Require a matching `Authorization: Bearer <token>` header when an admin
/// token is configured.
pub fn require_admin(config: &AppConfig, headers: &HeaderMap) -> Result<(), AppError> {
    let Some(expected) = &config.admin_token else {
        return Ok(());
    };

    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match provided {
        Some(token) if bool::from(token.as_bytes().ct_eq(expected.as_bytes())) => Ok(()),
        Some(_) => Err(AppError::Unauthorized("invalid admin token".to_string())),
        None => Err(AppError::Unauthorized("admin token required".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config_with_token(token: &str) -> AppConfig {
        AppConfig {
            admin_token: Some(token.to_string()),
            ..AppConfig::default()
        }
    }

    fn headers_with_bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn open_when_no_token_configured() {
        let config = AppConfig::default();
        assert!(require_admin(&config, &HeaderMap::new()).is_ok());
    }

    #[test]
    fn accepts_the_configured_token() {
        let config = config_with_token("sekrit");
        assert!(require_admin(&config, &headers_with_bearer("sekrit")).is_ok());
    }

    #[test]
    fn rejects_a_wrong_token() {
        let config = config_with_token("sekrit");
        let result = require_admin(&config, &headers_with_bearer("wrong"));
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn rejects_a_missing_header() {
        let config = config_with_token("sekrit");
        let result = require_admin(&config, &HeaderMap::new());
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn rejects_a_non_bearer_scheme() {
        let config = config_with_token("sekrit");
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic c2Vrcml0"),
        );
        assert!(require_admin(&config, &headers).is_err());
    }
}
