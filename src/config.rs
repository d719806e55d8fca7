//! Feed configuration
//!
//! Everything the paginator and its HTTP source need is carried in an
//! explicit [`FeedConfig`], loaded from YAML or JSON and overridable from the
//! command line.

use crate::error::{Error, Result};
use crate::filter::FilterContext;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default number of pictures per page (gallery element)
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Fraction of the scroll height that triggers the next page
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 0.75;

// ============================================================================
// Feed Config
// ============================================================================

/// Complete feed configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Base URL of the pictures API (e.g. "http://localhost:3000")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the collection endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Pictures requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Scroll ratio at which the next page is requested
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Session cookie value, sent as `Cookie: session=<value>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,

    /// Filter applied to the first epoch
    #[serde(default)]
    pub filter: FilterContext,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_endpoint() -> String {
    "/pictures".to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_scroll_threshold() -> f64 {
    DEFAULT_SCROLL_THRESHOLD
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("pepe-feed/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
            page_size: default_page_size(),
            scroll_threshold: default_scroll_threshold(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            session_cookie: None,
            filter: FilterContext::default(),
        }
    }
}

impl FeedConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` files are read as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::invalid_value("base_url", "must not be empty"));
        }
        url::Url::parse(&self.base_url)?;

        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than 0"));
        }

        if !(self.scroll_threshold > 0.0 && self.scroll_threshold <= 1.0) {
            return Err(Error::invalid_value(
                "scroll_threshold",
                format!("must be in (0, 1], got {}", self.scroll_threshold),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be greater than 0"));
        }

        Ok(())
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
