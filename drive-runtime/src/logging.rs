//! # Logging Bootstrap
//!
//! Configures the `tracing-subscriber` infrastructure for hosts that do not
//! bring their own subscriber. Supports pretty output for development and
//! JSON for log shipping, with module-level filtering via `RUST_LOG`-style
//! directives.
//!
//! ## Usage
//!
//! ```ignore
//! use drive_runtime::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Json)
//!     .with_env_filter("info,drive_sync=debug");
//!
//! init_logging(config).expect("Failed to initialize logging");
//! tracing::info!("Drive core started");
//! ```

use crate::error::{Result, RuntimeError};
use tracing::Level;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Output format for log events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line output
    Pretty,
    /// Newline-delimited JSON
    Json,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    format: LogFormat,
    level: Level,
    env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            level: Level::INFO,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Default level when no filter directives are given
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Explicit filter directives, e.g. `"info,drive_sync=debug"`
    ///
    /// Takes precedence over [`with_level`](Self::with_level) and the
    /// `RUST_LOG` environment variable.
    pub fn with_env_filter(mut self, directives: impl Into<String>) -> Self {
        self.env_filter = Some(directives.into());
        self
    }
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Returns [`RuntimeError::LoggingInit`] if the filter directives are
/// malformed or a global subscriber is already installed (calling this
/// twice is an error, not a panic).
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = match &config.env_filter {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| RuntimeError::LoggingInit(format!("bad filter directives: {}", e)))?,
        None => EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(config.level).into())
            .from_env_lossy(),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| RuntimeError::LoggingInit(e.to_string()))
}
