//! Common error types for hatecheck components.

use thiserror::Error;

/// Common error type for hatecheck operations outside a single request.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias using hatecheck Error.
pub type Result<T> = std::result::Result<T, Error>;
