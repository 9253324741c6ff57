//! Client configuration

use hatecheck::{Error, Result};
use reqwest::Url;
use std::time::Duration;

/// Base URL used when nothing else is configured (host loopback as seen
/// from an Android emulator).
pub const DEFAULT_BASE_URL: &str = "http://10.0.2.2:5000";

/// Single fixed timeout for every call. There are no retries.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Overrides the base URL.
pub const ENV_API_URL: &str = "HATECHECK_API_URL";

/// Overrides the timeout, in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "HATECHECK_TIMEOUT_MS";

pub const HEALTH_PATH: &str = "health";
pub const PREDICT_PATH: &str = "predict";

/// Where the classification service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Absolute http(s) URL without a trailing slash
    pub base_url: String,
    /// Applied to the whole request, connect included
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Default configuration pointed at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::default().with_base_url(base_url)
    }

    /// Default configuration overlaid with `HATECHECK_API_URL` and
    /// `HATECHECK_TIMEOUT_MS` when they are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(url)?;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_MS).filter(|v| !v.trim().is_empty()) {
            let millis: u64 = raw.trim().parse().map_err(|e| {
                Error::Config(format!("{} must be a whole number of milliseconds: {}", ENV_TIMEOUT_MS, e))
            })?;
            config = config.with_timeout(Duration::from_millis(millis))?;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self> {
        self.base_url = normalize_base_url(base_url.as_ref())?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// Full URL of an endpoint below the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed)
        .map_err(|e| Error::Config(format!("invalid base URL '{}': {}", trimmed, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "base URL '{}' must use http or https",
            trimmed
        )));
    }
    if url.host_str().is_none() {
        return Err(Error::Config(format!("base URL '{}' has no host", trimmed)));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
