//! Error taxonomy for the classification client.
//!
//! Three families, kept apart so callers can tell them apart without
//! string matching:
//!
//! - [`ValidationError`] - raised locally, before any network call
//! - [`ServiceError`] - transport failures and non-success HTTP/application replies
//! - [`ParseError`] - a reply arrived but its body could not be interpreted
//!
//! Every variant maps to a distinct user-facing message through
//! [`ClientError::user_message`].

use thiserror::Error;

/// Input rejected before it reaches the network.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("input is empty")]
    EmptyInput,

    #[error("input is too short: {len} characters (minimum 3)")]
    TooShort { len: usize },

    #[error("input is too long: {len} characters (maximum 500)")]
    TooLong { len: usize },
}

/// Failure reported by the transport or by the remote service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// No response within the configured timeout. Never retried.
    #[error("request timed out")]
    Timeout,

    /// Host unreachable, DNS failure or connection refused.
    #[error("no connection: {0}")]
    NoConnection(String),

    /// Any other transport-level fault.
    #[error("network error: {0}")]
    NetworkError(String),

    #[error("bad request (status {0})")]
    BadRequest(u16),

    #[error("server error (status {0})")]
    ServerError(u16),

    /// Unclassified status code, or a `success: false` reply carrying the
    /// service's own error message.
    #[error("{}", describe_unknown(.code, .message))]
    Unknown { code: u16, message: Option<String> },
}

fn describe_unknown(code: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => format!("service reported failure (status {}): {}", code, message),
        None => format!("unexpected response (status {})", code),
    }
}

/// A reply whose body does not match the wire contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("malformed JSON: {0}")]
    Malformed(String),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` out of range [0, 1]: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Any failure a client call can end in.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("failed to parse response: {0}")]
    Parse(#[from] ParseError),

    /// The request task ended without producing a result.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

const TROUBLESHOOTING_HINT: &str =
    "Make sure the classification API server is running and reachable at the configured URL";

impl ClientError {
    /// Message suitable for showing to the person who typed the text.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(ValidationError::EmptyInput) => {
                "Please enter some text to analyze".to_string()
            }
            ClientError::Validation(ValidationError::TooShort { .. }) => {
                "Text must be at least 3 characters long".to_string()
            }
            ClientError::Validation(ValidationError::TooLong { .. }) => {
                "Text is too long (maximum 500 characters)".to_string()
            }
            ClientError::Service(ServiceError::Timeout) => {
                "Request timeout - server took too long".to_string()
            }
            ClientError::Service(ServiceError::NoConnection(_)) => {
                "No connection - check if API server is running".to_string()
            }
            ClientError::Service(ServiceError::NetworkError(_)) => {
                "Network error - check your connection".to_string()
            }
            ClientError::Service(ServiceError::BadRequest(_)) => {
                "Invalid request - check your text".to_string()
            }
            ClientError::Service(ServiceError::ServerError(_)) => {
                "Server error - model may not be loaded".to_string()
            }
            ClientError::Service(ServiceError::Unknown {
                message: Some(message),
                ..
            }) => format!("Analysis failed: {}", message),
            ClientError::Service(ServiceError::Unknown {
                code,
                message: None,
            }) => format!("Server error (Code: {})", code),
            ClientError::Parse(_) => "Error parsing server response".to_string(),
            ClientError::Internal(_) => "Unexpected internal error - please try again".to_string(),
        }
    }

    /// Troubleshooting hint for failures that point at the service being
    /// down or misconfigured. Application-level rejections get none.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ClientError::Service(ServiceError::Unknown {
                message: Some(_), ..
            }) => None,
            ClientError::Service(_) => Some(TROUBLESHOOTING_HINT),
            _ => None,
        }
    }

    /// True when the call never left the process.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}
