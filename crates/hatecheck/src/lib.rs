//! # hatecheck Shared Rust Library
//!
//! Shared infrastructure for the hatecheck components:
//! - **error**: Common error types
//! - **tracing**: Logging setup with hatecheck segment prefixes
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hatecheck::error::Error;
//! use hatecheck::tracing::prefix;
//! ```

pub mod error;
pub mod tracing;

pub use error::{Error, Result};
