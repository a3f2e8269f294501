//! HTTP transport for collation round trips

use super::error::{CollateXError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use std::time::Duration;

/// Raw response of a single round trip, before status handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One POST round trip to the collation service
///
/// Implementations return the response for any HTTP status; only failures to
/// send the request or read the body are errors at this level.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, url: &str, accept: &str, body: Vec<u8>) -> Result<RawResponse>;
}

/// `reqwest`-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl HttpTransport {
    /// Create a transport resolving relative service URLs against `base_url`
    pub fn new(base_url: Option<&str>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url
            .map(|url| {
                Url::parse(url)
                    .map_err(|e| CollateXError::Config(format!("Invalid base URL '{}': {}", url, e)))
            })
            .transpose()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CollateXError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(HttpTransport { client, base_url })
    }

    /// Resolve a service URL, which may be relative (the default is `collate`)
    pub fn resolve(&self, url: &str) -> Result<Url> {
        if let Ok(absolute) = Url::parse(url) {
            return Ok(absolute);
        }

        let base = self.base_url.as_ref().ok_or_else(|| {
            CollateXError::Config(format!(
                "Service URL '{}' is relative but no base URL is configured",
                url
            ))
        })?;

        base.join(url)
            .map_err(|e| CollateXError::Config(format!("Invalid service URL '{}': {}", url, e)))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: &str, accept: &str, body: Vec<u8>) -> Result<RawResponse> {
        let url = self.resolve(url)?;

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, accept)
            .body(body)
            .send()
            .await
            .map_err(|e| CollateXError::Connection(format!("Failed to reach '{}': {}", url, e)))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response.text().await.map_err(|e| {
            CollateXError::Connection(format!("Failed to read response from '{}': {}", url, e))
        })?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_against_base() {
        let transport = HttpTransport::new(Some("http://localhost:7369/"), None).unwrap();
        let url = transport.resolve("collate").unwrap();
        assert_eq!(url.as_str(), "http://localhost:7369/collate");
    }

    #[test]
    fn test_resolve_absolute_ignores_base() {
        let transport = HttpTransport::new(Some("http://localhost:7369/"), None).unwrap();
        let url = transport.resolve("https://collatex.net/demo/collate").unwrap();
        assert_eq!(url.as_str(), "https://collatex.net/demo/collate");
    }

    #[test]
    fn test_resolve_relative_without_base() {
        let transport = HttpTransport::new(None, None).unwrap();
        assert!(matches!(
            transport.resolve("collate"),
            Err(CollateXError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpTransport::new(Some("not a url"), None),
            Err(CollateXError::Config(_))
        ));
    }

    #[test]
    fn test_raw_response_success_range() {
        let mut response = RawResponse {
            status: 200,
            status_text: "OK".into(),
            content_type: None,
            body: String::new(),
        };
        assert!(response.is_success());
        response.status = 500;
        assert!(!response.is_success());
    }
}
