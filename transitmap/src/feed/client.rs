//! Feed client trait and HTTP implementation.
//!
//! The [`FeedClient`] trait abstracts over where the SIRI document comes
//! from so the fetcher and scheduler can be driven by an in-memory client
//! in tests. [`HttpFeedClient`] performs a plain GET against the configured
//! endpoint via `reqwest`.

use std::future::Future;
use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;

use super::config::{FeedConfig, FeedFormat, USER_AGENT};
use super::error::FetchError;
use super::payload::FeedPayload;

/// Trait for retrieving one decoded feed document.
pub trait FeedClient: Send + Sync {
    /// Fetch and decode the current feed document.
    fn fetch_payload(&self) -> impl Future<Output = Result<FeedPayload, FetchError>> + Send;
}

impl<T: FeedClient> FeedClient for Arc<T> {
    fn fetch_payload(&self) -> impl Future<Output = Result<FeedPayload, FetchError>> + Send {
        (**self).fetch_payload()
    }
}

/// Feed client using direct HTTP requests.
///
/// Holds a reusable `reqwest::Client` so connections are pooled across
/// refresh cycles.
pub struct HttpFeedClient {
    /// Reusable HTTP client with connection pooling.
    http: reqwest::Client,

    /// Feed endpoint.
    url: String,

    /// Body encoding.
    format: FeedFormat,
}

impl HttpFeedClient {
    /// Create a client for the given feed configuration.
    pub fn new(config: FeedConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            url: config.url,
            format: config.format,
        })
    }

    /// Feed endpoint this client polls.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FeedClient for HttpFeedClient {
    async fn fetch_payload(&self) -> Result<FeedPayload, FetchError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        tracing::trace!(
            url = %self.url,
            bytes = bytes.len(),
            content_type = content_type.as_deref().unwrap_or("-"),
            "Feed body received"
        );

        FeedPayload::decode(&bytes, self.format, content_type.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_http_client_creation() {
        let config = FeedConfig::new("http://127.0.0.1:9/vm.json")
            .with_format(FeedFormat::Json)
            .with_timeout(Duration::from_millis(250));

        let client = HttpFeedClient::new(config).unwrap();
        assert_eq!(client.url(), "http://127.0.0.1:9/vm.json");
        assert_eq!(client.format, FeedFormat::Json);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) is not expected to have a listener.
        let config = FeedConfig::new("http://127.0.0.1:9/vm.json")
            .with_timeout(Duration::from_millis(500));
        let client = HttpFeedClient::new(config).unwrap();

        let err = client.fetch_payload().await.unwrap_err();
        assert!(err.is_transport(), "unexpected error: {err}");
    }
}
