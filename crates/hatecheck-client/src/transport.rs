//! HTTP transport seam.
//!
//! The client only needs "send this, give me status and body back". Keeping
//! that behind [`Transport`] lets tests script replies and count attempts
//! without a network.

use async_trait::async_trait;
use hatecheck::{Error, Result as CommonResult};
use reqwest::Client;
use serde_json::Value;
use std::error::Error as StdError;

use crate::config::ClientConfig;
use crate::error::ServiceError;

/// Status and raw body of an HTTP reply, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Lossy UTF-8 view of the body, cut to `max_chars` for logging.
    pub fn body_preview(&self, max_chars: usize) -> String {
        let text = String::from_utf8_lossy(&self.body);
        let mut preview: String = text.chars().take(max_chars).collect();
        if text.chars().count() > max_chars {
            preview.push_str("...");
        }
        preview
    }
}

/// One attempt per call. Implementations must not retry and must report
/// transport failures as `Timeout`, `NoConnection` or `NetworkError`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse, ServiceError>;

    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, ServiceError>;
}

/// reqwest-backed transport with a single whole-request timeout.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> CommonResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn read(response: reqwest::Response) -> Result<RawResponse, ServiceError> {
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| classify_error(&e))?;
        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, ServiceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(&e))?;
        Self::read(response).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, ServiceError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| classify_error(&e))?;
        Self::read(response).await
    }
}

/// Timeout first (a connect timeout is still a timeout), then connection
/// failures, then everything else.
fn classify_error(err: &reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout
    } else if err.is_connect() {
        ServiceError::NoConnection(error_chain(err))
    } else {
        ServiceError::NetworkError(error_chain(err))
    }
}

/// `outer: inner: root` so the useful cause (e.g. "Connection refused")
/// is not lost behind reqwest's generic top-level message.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_preview_truncates() {
        let response = RawResponse {
            status: 500,
            body: b"Internal Server Error: model file missing".to_vec(),
        };
        assert_eq!(response.body_preview(14), "Internal Serve...");
        assert_eq!(
            response.body_preview(200),
            "Internal Server Error: model file missing"
        );
    }

    #[derive(Debug, thiserror::Error)]
    #[error("error sending request")]
    struct SendFailed(#[source] std::io::Error);

    #[test]
    fn test_error_chain_includes_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");
        let outer = SendFailed(inner);
        assert_eq!(error_chain(&outer), "error sending request: Connection refused");
    }
}
