//! Logging initialization
//!
//! Structured logging through `tracing`. The filter is taken from the
//! `BIZCORE_LOG` environment variable when present, otherwise from the
//! level passed by the caller.

use tracing::Level;
use tracing_subscriber::EnvFilter;

use bizcore_domain::error::{Error, Result};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Base log level when `BIZCORE_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of the human-readable format
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Parse a log level string
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(Error::Config {
            message: format!("invalid log level: {other}"),
        }),
    }
}

/// Initialize the global tracing subscriber
///
/// Safe to call more than once; subsequent calls are ignored.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter = EnvFilter::try_from_env("BIZCORE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    // A second init (common under the test harness) is not an error.
    let _ = result;
    Ok(())
}
