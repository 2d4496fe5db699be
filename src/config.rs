//! Client configuration
//!
//! A [`Config`] is resolved once when a client is constructed and held
//! immutably for that client's lifetime. It can be built in code or loaded
//! from YAML:
//!
//! ```yaml
//! url: http://localhost:8989
//! api_key: 0123456789abcdef
//! timeout_secs: 10
//! valid_ssl: false
//! ```

use crate::error::{Error, Result};
use crate::http::RateLimiterConfig;
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Connection settings for one *arr instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the application, e.g. `http://localhost:8989`
    pub url: String,

    /// API key sent as `X-Api-Key`
    pub api_key: String,

    /// Optional HTTP basic auth user
    #[serde(default)]
    pub http_user: Option<String>,

    /// Optional HTTP basic auth password
    #[serde(default)]
    pub http_pass: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Verify TLS certificates. Set to false for self-signed setups.
    #[serde(default = "default_valid_ssl")]
    pub valid_ssl: bool,

    /// Maximum number of response body bytes echoed into debug logs (0 = all)
    #[serde(default)]
    pub max_body: usize,

    /// Retries for retryable transport failures (0 = single attempt)
    #[serde(default)]
    pub max_retries: u32,

    /// Backoff strategy between retries
    #[serde(default)]
    pub backoff_type: BackoffType,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Optional client-side rate limit
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_valid_ssl() -> bool {
    true
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    format!("starr/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Create a config with defaults for everything but the URL and key
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            http_user: None,
            http_pass: None,
            timeout_secs: default_timeout_secs(),
            valid_ssl: default_valid_ssl(),
            max_body: 0,
            max_retries: 0,
            backoff_type: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            rate_limit: None,
            user_agent: default_user_agent(),
        }
    }

    /// Create a new config builder
    pub fn builder(url: impl Into<String>, api_key: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder {
            config: Self::new(url, api_key),
        }
    }

    /// Parse a config from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Check that the config can produce a working client
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::config("url is required"));
        }
        let parsed = url::Url::parse(&self.url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "unsupported url scheme '{}'",
                parsed.scheme()
            )));
        }
        if self.api_key.is_empty() {
            return Err(Error::config("api_key is required"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Initial retry backoff
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    /// Maximum retry backoff
    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }
}

/// Builder for [`Config`]
#[derive(Debug)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set HTTP basic auth credentials
    #[must_use]
    pub fn basic_auth(mut self, user: impl Into<String>, pass: impl Into<String>) -> Self {
        self.config.http_user = Some(user.into());
        self.config.http_pass = Some(pass.into());
        self
    }

    /// Set the request timeout (whole seconds, minimum one)
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Accept invalid TLS certificates
    #[must_use]
    pub fn insecure(mut self) -> Self {
        self.config.valid_ssl = false;
        self
    }

    /// Limit how much of each response body is logged
    #[must_use]
    pub fn max_body(mut self, bytes: usize) -> Self {
        self.config.max_body = bytes;
        self
    }

    /// Set max retries
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    #[must_use]
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff_ms = initial.as_millis() as u64;
        self.config.max_backoff_ms = max.as_millis() as u64;
        self
    }

    /// Set rate limiter
    #[must_use]
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = Config::new("http://localhost:8989", "key");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.valid_ssl);
        assert_eq!(config.max_retries, 0);
        assert!(config.rate_limit.is_none());
        assert!(config.user_agent.starts_with("starr/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = Config::builder("https://sonarr.local", "key")
            .basic_auth("user", "pass")
            .timeout(Duration::from_secs(5))
            .insecure()
            .max_body(256)
            .max_retries(2)
            .backoff(
                BackoffType::Linear,
                Duration::from_millis(50),
                Duration::from_secs(1),
            )
            .rate_limit(RateLimiterConfig::new(5, 5))
            .user_agent("test-agent/1.0")
            .build();

        assert_eq!(config.http_user.as_deref(), Some("user"));
        assert_eq!(config.http_pass.as_deref(), Some("pass"));
        assert_eq!(config.timeout_secs, 5);
        assert!(!config.valid_ssl);
        assert_eq!(config.max_body, 256);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.backoff_type, BackoffType::Linear);
        assert_eq!(config.initial_backoff(), Duration::from_millis(50));
        assert_eq!(config.max_backoff(), Duration::from_secs(1));
        assert_eq!(config.rate_limit.unwrap().requests_per_second, 5);
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[test]
    fn test_config_from_yaml() {
        let config = Config::from_yaml_str(
            r"
url: http://localhost:8686
api_key: abc
timeout_secs: 10
valid_ssl: false
rate_limit:
  requests_per_second: 2
  burst_size: 4
",
        )
        .unwrap();

        assert_eq!(config.url, "http://localhost:8686");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(!config.valid_ssl);
        assert_eq!(config.rate_limit.unwrap().burst_size, 4);
        assert_eq!(config.initial_backoff_ms, 100);
    }

    #[test]
    fn test_config_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "url: http://localhost:8787\napi_key: abc").unwrap();

        let config = Config::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.url, "http://localhost:8787");
    }

    #[test]
    fn test_config_validation() {
        assert!(matches!(
            Config::new("", "key").validate(),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            Config::new("not a url", "key").validate(),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            Config::new("ftp://host", "key").validate(),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            Config::new("http://host", "").validate(),
            Err(Error::Config { .. })
        ));
        assert!(Config::from_yaml_str("url: http://host\napi_key: ''").is_err());
    }
}
