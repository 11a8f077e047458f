//! Tracing subscriber initialization
//!
//! Structured logging with env-filter support. Production gets JSON output,
//! development gets human-readable output with targets.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Errors raised while installing the tracing subscriber
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Invalid filter directive: {0}")]
    InvalidFilter(String),

    #[error("Failed to set global subscriber: {0}")]
    SetGlobal(String),
}

/// Tracing output configuration
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Default filter directive used when `RUST_LOG` is not set
    pub default_filter: String,
    /// Emit JSON-formatted log lines
    pub json: bool,
    /// Include span targets in output
    pub with_target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            json: false,
            with_target: true,
        }
    }
}

impl TracingConfig {
    /// Human-readable output for local development
    #[must_use]
    pub fn development() -> Self {
        Self {
            default_filter: "debug,sqlx=warn,hyper=info".to_string(),
            json: false,
            with_target: true,
        }
    }

    /// JSON output for production log aggregation
    #[must_use]
    pub fn production() -> Self {
        Self {
            default_filter: "info,sqlx=warn".to_string(),
            json: true,
            with_target: false,
        }
    }
}

/// Initialize tracing with the default configuration
///
/// # Panics
/// Panics if a subscriber is already installed.
pub fn init_tracing() {
    init_tracing_with_config(&TracingConfig::default());
}

/// Initialize tracing with an explicit configuration
///
/// # Panics
/// Panics if a subscriber is already installed.
pub fn init_tracing_with_config(config: &TracingConfig) {
    try_init_tracing_with_config(config).expect("failed to initialize tracing");
}

/// Fallible variant of [`init_tracing`], used by tests where a subscriber
/// may already be installed
///
/// # Errors
/// Returns an error if the filter is invalid or a subscriber is already set.
pub fn try_init_tracing() -> Result<(), TracingError> {
    try_init_tracing_with_config(&TracingConfig::default())
}

/// Fallible variant of [`init_tracing_with_config`]
///
/// # Errors
/// Returns an error if the filter is invalid or a subscriber is already set.
pub fn try_init_tracing_with_config(config: &TracingConfig) -> Result<(), TracingError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_filter))
        .map_err(|e| TracingError::InvalidFilter(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        registry
            .with(fmt::layer().json().with_target(config.with_target))
            .try_init()
            .map_err(|e| TracingError::SetGlobal(e.to_string()))
    } else {
        registry
            .with(fmt::layer().with_target(config.with_target))
            .try_init()
            .map_err(|e| TracingError::SetGlobal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TracingConfig::default();
        assert_eq!(config.default_filter, "info");
        assert!(!config.json);
    }

    #[test]
    fn test_environment_presets() {
        assert!(!TracingConfig::development().json);
        assert!(TracingConfig::production().json);
    }

    #[test]
    fn test_try_init_is_idempotent_safe() {
        // First call may succeed or fail depending on test ordering;
        // the second must fail instead of panicking.
        let _ = try_init_tracing();
        assert!(try_init_tracing().is_err());
    }
}
