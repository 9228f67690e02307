//! # Drive Core Configuration
//!
//! Builder-based configuration with fail-fast validation: a host that
//! passes a malformed base URL learns about it at build time, not on the
//! first request.
//!
//! ## Usage
//!
//! ```
//! use drive_runtime::config::DriveConfig;
//!
//! let config = DriveConfig::builder()
//!     .base_url("https://api.cerebrum.example")
//!     .build()
//!     .expect("Failed to build config");
//!
//! assert_eq!(config.base_url(), "https://api.cerebrum.example/");
//! ```

use crate::error::{Result, RuntimeError};
use std::time::Duration;
use url::Url;

/// Configuration for the Drive integration core
#[derive(Debug, Clone)]
pub struct DriveConfig {
    /// Backend base URL
    base_url: Url,

    /// Overall timeout per HTTP request
    pub request_timeout: Duration,

    /// TCP connect timeout
    pub connect_timeout: Duration,

    /// User agent sent with every request
    pub user_agent: String,
}

impl DriveConfig {
    /// Start building a configuration
    pub fn builder() -> DriveConfigBuilder {
        DriveConfigBuilder::default()
    }

    /// The validated backend base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }
}

/// Builder for [`DriveConfig`]
#[derive(Debug, Clone)]
pub struct DriveConfigBuilder {
    base_url: Option<String>,
    request_timeout: Duration,
    connect_timeout: Duration,
    user_agent: String,
}

impl Default for DriveConfigBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("cerebrum-drive/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl DriveConfigBuilder {
    /// Set the backend base URL (required)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Override the connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Override the user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate and build the configuration
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::InvalidConfig`] when the base URL is missing,
    /// unparseable, not http(s), or a timeout is zero.
    pub fn build(self) -> Result<DriveConfig> {
        let raw = self.base_url.ok_or_else(|| {
            RuntimeError::InvalidConfig(
                "base_url is required; set it with DriveConfig::builder().base_url(...)"
                    .to_string(),
            )
        })?;

        let base_url = Url::parse(&raw)
            .map_err(|e| RuntimeError::InvalidConfig(format!("base_url '{}': {}", raw, e)))?;

        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(RuntimeError::InvalidConfig(format!(
                "base_url must be http or https, got '{}'",
                base_url.scheme()
            )));
        }

        if self.request_timeout.is_zero() || self.connect_timeout.is_zero() {
            return Err(RuntimeError::InvalidConfig(
                "timeouts must be non-zero".to_string(),
            ));
        }

        Ok(DriveConfig {
            base_url,
            request_timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
            user_agent: self.user_agent,
        })
    }
}
