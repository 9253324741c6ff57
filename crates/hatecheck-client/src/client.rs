//! Classification client.
//!
//! Validates input locally, sends it to the remote classifier and turns
//! whatever comes back (or doesn't) into an [`AnalysisResult`] or a
//! [`ClientError`]. One attempt per call, no retries.

use hatecheck::tracing::prefix;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::{ClientConfig, HEALTH_PATH, PREDICT_PATH};
use crate::error::{ClientError, Result};
use crate::transport::{HttpTransport, RawResponse, Transport};
use crate::types::{AnalysisMeta, AnalysisRequest, AnalysisResult, HealthStatus};
use crate::wire;

/// Characters of user text that may appear in logs.
const LOG_TEXT_PREVIEW: usize = 50;

/// Characters of an error body that may appear in logs.
const LOG_BODY_PREVIEW: usize = 200;

pub struct ClassificationClient {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl ClassificationClient {
    /// Client backed by the reqwest transport.
    pub fn new(config: ClientConfig) -> hatecheck::Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Client backed by an arbitrary transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Ask the service whether it is up and its model is loaded.
    ///
    /// Advisory: a failure here says nothing about later calls.
    pub async fn check_health(&self) -> Result<HealthStatus> {
        let url = self.config.endpoint(HEALTH_PATH);
        debug!("{} Testing API connection at {}", prefix::HEALTH, url);

        let response = self
            .transport
            .get(&url)
            .await
            .map_err(|e| failed(&url, None, e.into()))?;

        if let Some(err) = wire::classify_status(response.status) {
            return Err(failed(&url, Some(&response), err.into()));
        }

        let health = wire::parse_health(&response.body)
            .map_err(|e| failed(&url, Some(&response), e.into()))?;

        if health.model_ready {
            info!("{} API connected and model ready", prefix::HEALTH);
        } else {
            warn!(
                "{} API connected but model not ready (status: {})",
                prefix::HEALTH,
                health.status
            );
        }

        Ok(health)
    }

    /// Validate `raw_text` and classify it.
    ///
    /// Invalid input fails with [`ClientError::Validation`] without touching
    /// the network.
    pub async fn analyze(&self, raw_text: &str) -> Result<AnalysisResult> {
        let request = AnalysisRequest::new(raw_text).map_err(|e| {
            debug!("Rejected input: {}", e);
            ClientError::from(e)
        })?;
        self.send(&request).await
    }

    /// Classify an already validated request.
    pub async fn send(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let url = self.config.endpoint(PREDICT_PATH);
        debug!(
            "{} Making prediction request for text: {}",
            prefix::NET,
            preview(request.text(), LOG_TEXT_PREVIEW)
        );

        let body = json!({ "text": request.text() });
        let response = self
            .transport
            .post_json(&url, &body)
            .await
            .map_err(|e| failed(&url, None, e.into()))?;

        if let Some(err) = wire::classify_status(response.status) {
            return Err(failed(&url, Some(&response), err.into()));
        }

        let result = wire::parse_predict(response.status, &response.body)
            .map_err(|e| failed(&url, Some(&response), e))?;

        if let Some(meta) = &result.analysis {
            log_analysis(meta);
        }
        info!(
            "{} Analysis successful: {} ({:.3})",
            prefix::VERDICT,
            result.prediction,
            result.confidence
        );

        Ok(result)
    }
}

/// Log everything known about a failed call and hand the error back.
fn failed(url: &str, response: Option<&RawResponse>, err: ClientError) -> ClientError {
    error!("{} Request failed: {}", prefix::NET, err.user_message());
    error!("  Error: {}", err);
    error!("  API URL: {}", url);
    if let Some(response) = response {
        error!("  Status Code: {}", response.status);
        if !response.body.is_empty() {
            error!("  Response Data: {}", response.body_preview(LOG_BODY_PREVIEW));
        }
    }
    err
}

fn log_analysis(meta: &AnalysisMeta) {
    if meta.is_empty() {
        return;
    }
    debug!("Detailed analysis:");
    for (label, value) in meta.entries() {
        debug!("  {}: {}", label, value);
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 50), "short");
        let long = "y".repeat(80);
        assert_eq!(preview(&long, 50), format!("{}...", "y".repeat(50)));
    }
}
