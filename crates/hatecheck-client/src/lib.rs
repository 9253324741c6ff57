//! hatecheck Classification Client
//!
//! Submits short text samples to a remote hate-speech classification
//! service and maps every reply or failure to a typed result.
//!
//! ## Module Structure
//!
//! - `config` - Base URL and timeout, with env overrides
//! - `validate` - Local input checks, run before any network call
//! - `types` - Request, result, health and verdict types
//! - `wire` - JSON contract and status classification
//! - `transport` - HTTP seam and its reqwest implementation
//! - `client` - The classification client
//! - `session` - One-call-at-a-time controller for interactive hosts
//! - `report` - Terminal rendering
//! - `error` - Error taxonomy and user-facing messages
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hatecheck_client::{ClassificationClient, ClientConfig};
//!
//! let client = ClassificationClient::new(ClientConfig::from_env()?)?;
//! let result = client.analyze("I hate Mondays").await?;
//! println!("{} {}", result.prediction, result.summary_line());
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod report;
pub mod session;
pub mod transport;
pub mod types;
pub mod validate;
pub mod wire;

pub use client::ClassificationClient;
pub use config::ClientConfig;
pub use error::{ClientError, ParseError, Result, ServiceError, ValidationError};
pub use session::{AnalysisSession, CallState, Outcome, RequestId, SubmitError};
pub use transport::{HttpTransport, RawResponse, Transport};
pub use types::{AnalysisMeta, AnalysisRequest, AnalysisResult, HealthStatus, Verdict};
