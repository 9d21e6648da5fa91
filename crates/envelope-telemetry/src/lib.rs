//! # Envelope Telemetry
//!
//! Structured logging for the signed envelope tools.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use envelope_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::from_env())?;
//!     // ...
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ENVELOPE_SERVICE_NAME` | `signed-envelope` | Service name |
//! | `ENVELOPE_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `ENVELOPE_JSON_LOGS` | `false` | JSON output (`true` inside containers) |
//! | `ENVELOPE_CONSOLE_OUTPUT` | `true` | Emit logs at all |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};
pub use logging::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber was already installed.
    #[error("Failed to install log subscriber: {0}")]
    AlreadyInitialized(String),

    /// Configuration could not be applied.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging. Hold the guard for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    logging::init_logging(&config)?;

    tracing::debug!(
        service = %config.service_name,
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active.
#[derive(Debug)]
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    /// Service name the guard was created for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::debug!(service = %self.service_name, "Shutting down telemetry");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let config = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::default()
        };

        // Another test in this binary may have won the race; either way the
        // second call must fail.
        let _first = init_telemetry(config.clone());
        let second = init_telemetry(config);
        assert!(matches!(second, Err(TelemetryError::AlreadyInitialized(_))));
    }

    #[test]
    fn test_invalid_level_is_config_error() {
        let config = TelemetryConfig::default().with_log_level("signed_envelope=loud");
        assert!(matches!(
            init_telemetry(config),
            Err(TelemetryError::Config(_))
        ));
    }
}
