//! Configuration management for `jobtrack-core`.

/// Database connection and schema initialization
pub mod database;

/// Application settings from `jobtrack.toml` and environment variables
pub mod settings;

use tracing_subscriber::EnvFilter;

/// Initializes a `tracing` subscriber for embedding applications.
///
/// Respects `RUST_LOG` and falls back to `info`. Call once, as early as
/// possible; calling it twice panics in `tracing-subscriber`, so embedders
/// that install their own subscriber should skip this.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
