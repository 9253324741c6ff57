//! Logging utilities with hatecheck segment prefixes.
//!
//! Provides consistent logging setup across hatecheck components.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing with a default filter.
///
/// Sets up tracing-subscriber with:
/// - Environment filter (`RUST_LOG` wins over `default_filter` when set)
/// - Compact format on stderr, leaving stdout for results
///
/// Calling this twice is a no-op rather than a panic.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// hatecheck segment prefixes for logging.
pub mod prefix {
    /// Graceful startup prefix
    pub const OPEN: &str = "✿";
    /// Graceful shutdown prefix
    pub const CLOSE: &str = "❀";
    /// Outbound network call prefix
    pub const NET: &str = "⇄";
    /// Health check prefix
    pub const HEALTH: &str = "♥";
    /// Classification verdict prefix
    pub const VERDICT: &str = "⚖";
}
