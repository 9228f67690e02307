//! # Runtime Glue
//!
//! Configuration and logging bootstrap for hosts embedding the Drive core.
//!
//! ## Overview
//!
//! - `config`: `DriveConfig` builder with fail-fast validation of the
//!   backend base URL and timeouts
//! - `logging`: `tracing-subscriber` setup with pretty or JSON output and
//!   `RUST_LOG`-style filtering

pub mod config;
pub mod error;
pub mod logging;

pub use config::{DriveConfig, DriveConfigBuilder};
pub use error::{Result, RuntimeError};
pub use logging::{init_logging, LogFormat, LoggingConfig};
