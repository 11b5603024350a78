//! # Postal Directory HTTP Client
//!
//! Wraps a `reqwest::Client` against the public postal directory
//! (`GET {base}/pincode/{code}`) with a bounded per-request wait. Transport
//! failures fall back to the static table in [`crate::fallback`]; an
//! upstream "no data" answer does not, since the directory authoritatively
//! said the code is unknown.

use std::time::Duration;

use serde::Deserialize;
use ubr_core::PostalCode;

use crate::{fallback, LookupError, PostalRecord};

/// Configuration for the postal directory client.
#[derive(Debug, Clone)]
pub struct PostalDirectoryConfig {
    /// Base URL of the directory API.
    pub base_url: String,
    /// Per-request bound on the upstream wait.
    pub timeout: Duration,
}

impl PostalDirectoryConfig {
    /// Default per-request wait bound (5 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create a configuration with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

impl Default for PostalDirectoryConfig {
    fn default() -> Self {
        Self::new("https://api.postalpincode.in")
    }
}

// Upstream wire shape: an array with one reply per queried code, each
// carrying a status string and, on success, a list of post offices.

#[derive(Debug, Deserialize)]
struct DirectoryReply {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "PostOffice", default)]
    post_offices: Option<Vec<DirectoryPostOffice>>,
}

#[derive(Debug, Deserialize)]
struct DirectoryPostOffice {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Country")]
    country: String,
}

/// Postal directory lookup client.
///
/// `Send + Sync`; designed to be shared via `Arc` across async tasks.
pub struct PostalLookupClient {
    client: reqwest::Client,
    base_url: String,
}

impl PostalLookupClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::ServiceUnavailable`] if the underlying HTTP
    /// client cannot be constructed.
    pub fn new(config: PostalDirectoryConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LookupError::ServiceUnavailable {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Resolve a postal code to its directory record.
    ///
    /// Transport failures (timeout, connection error, 5xx, undecodable
    /// body) are answered from the static fallback table when the code is
    /// in it; otherwise the transport error is returned as-is. An upstream
    /// "no data" reply is [`LookupError::NotFound`] without fallback.
    pub async fn lookup(&self, code: &PostalCode) -> Result<PostalRecord, LookupError> {
        match self.fetch(code).await {
            Ok(record) => Ok(record),
            Err(LookupError::NotFound) => Err(LookupError::NotFound),
            Err(transport) => match fallback::lookup(code) {
                Some(record) => {
                    tracing::warn!(
                        postal_code = code.as_str(),
                        error = %transport,
                        "postal directory unreachable, answering from fallback table"
                    );
                    Ok(record)
                }
                None => Err(transport),
            },
        }
    }

    async fn fetch(&self, code: &PostalCode) -> Result<PostalRecord, LookupError> {
        let url = format!("{}/pincode/{}", self.base_url, code.as_str());

        let resp = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout
            } else {
                LookupError::ServiceUnavailable {
                    reason: format!("request failed: {e}"),
                }
            }
        })?;

        if !resp.status().is_success() {
            return Err(LookupError::ServiceUnavailable {
                reason: format!("HTTP {}", resp.status()),
            });
        }

        let replies: Vec<DirectoryReply> =
            resp.json()
                .await
                .map_err(|e| LookupError::ServiceUnavailable {
                    reason: format!("response deserialization failed: {e}"),
                })?;

        Self::first_match(code, replies).ok_or(LookupError::NotFound)
    }

    /// Extract the first post office of a successful reply.
    fn first_match(code: &PostalCode, replies: Vec<DirectoryReply>) -> Option<PostalRecord> {
        let reply = replies.into_iter().next()?;
        if reply.status != "Success" {
            return None;
        }
        let office = reply.post_offices?.into_iter().next()?;
        Some(PostalRecord {
            postal_code: code.clone(),
            city: office.district,
            state: office.state,
            country: office.country,
            post_office: office.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> PostalCode {
        PostalCode::new(s).unwrap()
    }

    fn unreachable_client() -> PostalLookupClient {
        // Guaranteed-closed port: connection refused immediately.
        PostalLookupClient::new(PostalDirectoryConfig {
            base_url: "http://127.0.0.1:1".into(),
            timeout: Duration::from_millis(200),
        })
        .unwrap()
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = PostalLookupClient::new(PostalDirectoryConfig::new(
            "http://directory.example/".to_string(),
        ))
        .unwrap();
        assert_eq!(client.base_url, "http://directory.example");
    }

    #[test]
    fn upstream_reply_parses() {
        let body = r#"[{
            "Message": "Number of pincode(s) found:1",
            "Status": "Success",
            "PostOffice": [{
                "Name": "Connaught Place",
                "District": "New Delhi",
                "State": "Delhi",
                "Country": "India",
                "BranchType": "Sub Post Office"
            }]
        }]"#;
        let replies: Vec<DirectoryReply> = serde_json::from_str(body).unwrap();
        let record = PostalLookupClient::first_match(&code("110001"), replies).unwrap();
        assert_eq!(record.city, "New Delhi");
        assert_eq!(record.state, "Delhi");
        assert_eq!(record.post_office, "Connaught Place");
    }

    #[test]
    fn upstream_error_reply_is_no_match() {
        let body = r#"[{"Message": "No records found", "Status": "Error", "PostOffice": null}]"#;
        let replies: Vec<DirectoryReply> = serde_json::from_str(body).unwrap();
        assert!(PostalLookupClient::first_match(&code("999999"), replies).is_none());
    }

    #[tokio::test]
    async fn transport_failure_falls_back_for_known_codes() {
        let client = unreachable_client();
        let record = client.lookup(&code("400001")).await.unwrap();
        assert_eq!(record.city, "Mumbai");
        assert_eq!(record.state, "Maharashtra");
    }

    #[tokio::test]
    async fn transport_failure_surfaces_for_unknown_codes() {
        let client = unreachable_client();
        let result = client.lookup(&code("999999")).await;
        assert!(matches!(
            result,
            Err(LookupError::ServiceUnavailable { .. }) | Err(LookupError::Timeout)
        ));
    }
}
