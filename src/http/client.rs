//! HTTP transport for the *arr APIs
//!
//! Provides the single request primitive every resource builds on:
//! - API path resolution (`{url}/api/{path}`) and the `X-Api-Key` header
//! - Optional basic auth, TLS verification switch, no redirects
//! - Caller cancellation raced against every attempt
//! - Optional rate limiting and bounded retries with backoff

use super::rate_limit::RateLimiter;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{BackoffType, JsonValue, QueryMap};
use bytes::Bytes;
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Header carrying the application API key
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: QueryMap,
    /// Request body (JSON)
    pub body: Option<JsonValue>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Replace all query parameters
    #[must_use]
    pub fn params(mut self, query: QueryMap) -> Self {
        self.query = query;
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }
}

/// Transport shared by every application client
///
/// Cheap to clone: the underlying connection pool and rate limiter are
/// reference counted.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: Arc<Config>,
    rate_limiter: Option<RateLimiter>,
}

impl ApiClient {
    /// Build a transport from a validated config
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.valid_ssl)
            .redirect(Policy::none())
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config: Arc::new(config),
            rate_limiter,
        })
    }

    /// The config this client was built from
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Resolve a non-API path (e.g. a backup file) against the base URL
    pub fn site_url(&self, path: &str) -> String {
        let base = self.config.url.trim_end_matches('/');
        format!("{base}/{}", path.trim_start_matches('/'))
    }

    /// Resolve an API path against the base URL
    ///
    /// `v3/queue` becomes `{url}/api/v3/queue`; paths already rooted at
    /// `api/` are not prefixed twice.
    pub fn api_url(&self, path: &str) -> String {
        let base = self.config.url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path == "api" || path.starts_with("api/") {
            format!("{base}/{path}")
        } else {
            format!("{base}/api/{path}")
        }
    }

    /// Perform one logical request and return the raw response body
    ///
    /// Non-2xx statuses become [`Error::HttpStatus`]. If `cancel` fires
    /// before or during any attempt the call returns [`Error::Cancelled`].
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        config: &RequestConfig,
        cancel: &CancellationToken,
    ) -> Result<Bytes> {
        self.execute(method, self.api_url(path), config, cancel)
            .await
    }

    /// Download a file served outside the API, such as a backup archive
    pub async fn download(&self, path: &str, cancel: &CancellationToken) -> Result<Bytes> {
        self.execute(Method::GET, self.site_url(path), &RequestConfig::new(), cancel)
            .await
    }

    async fn execute(
        &self,
        method: Method,
        url: String,
        config: &RequestConfig,
        cancel: &CancellationToken,
    ) -> Result<Bytes> {
        let max_retries = self.config.max_retries;
        let mut attempt = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            if let Some(ref limiter) = self.rate_limiter {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => return Err(Error::Cancelled),
                    () = limiter.wait() => {}
                }
            }

            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(Error::Cancelled),
                result = self.send_once(&method, &url, config) => result,
            };

            match result {
                Err(err) if err.is_retryable() && attempt < max_retries => {
                    let delay = self.calculate_backoff(attempt);
                    warn!(
                        "{} {} failed ({}), attempt {}/{}, retrying in {:?}",
                        method,
                        url,
                        err,
                        attempt + 1,
                        max_retries + 1,
                        delay
                    );
                    tokio::select! {
                        biased;
                        () = cancel.cancelled() => return Err(Error::Cancelled),
                        () = tokio::time::sleep(delay) => {}
                    }
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    async fn send_once(&self, method: &Method, url: &str, config: &RequestConfig) -> Result<Bytes> {
        let mut req = self
            .client
            .request(method.clone(), url)
            .header(API_KEY_HEADER, &self.config.api_key);

        if let Some(ref user) = self.config.http_user {
            req = req.basic_auth(user, self.config.http_pass.as_ref());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        if let Some(ref body) = config.body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        debug!(
            "{} {} -> {} ({} bytes): {}",
            method,
            url,
            status.as_u16(),
            body.len(),
            truncate_body(&body, self.config.max_body)
        );

        if !status.is_success() {
            return Err(Error::http_status(
                status.as_u16(),
                String::from_utf8_lossy(&body),
            ));
        }

        Ok(body)
    }

    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_ms: self.config.timeout().as_millis() as u64,
            }
        } else {
            Error::Http(err)
        }
    }

    /// Make a request and decode the JSON response
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        config: &RequestConfig,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let body = self.request(method, path, config, cancel).await?;
        serde_json::from_slice(&body).map_err(Error::decode)
    }

    /// GET a path and decode the JSON response
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: QueryMap,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let config = RequestConfig::new().params(query);
        self.request_json(Method::GET, path, &config, cancel).await
    }

    /// GET an API path and return the raw body
    pub async fn get_body(&self, path: &str, cancel: &CancellationToken) -> Result<Bytes> {
        self.request(Method::GET, path, &RequestConfig::new(), cancel)
            .await
    }

    /// POST a JSON body and decode the JSON response
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let config = RequestConfig::new().json(serde_json::to_value(body)?);
        self.request_json(Method::POST, path, &config, cancel).await
    }

    /// PUT a JSON body, returning the raw response
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<Bytes> {
        let config = RequestConfig::new().json(serde_json::to_value(body)?);
        self.request(Method::PUT, path, &config, cancel).await
    }

    /// DELETE a path, returning the raw response
    pub async fn delete(
        &self,
        path: &str,
        query: QueryMap,
        cancel: &CancellationToken,
    ) -> Result<Bytes> {
        let config = RequestConfig::new().params(query);
        self.request(Method::DELETE, path, &config, cancel).await
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let initial = self.config.initial_backoff();
        let delay = match self.config.backoff_type {
            BackoffType::Constant => initial,
            BackoffType::Linear => initial * (attempt + 1),
            BackoffType::Exponential => initial * 2u32.saturating_pow(attempt),
        };

        std::cmp::min(delay, self.config.max_backoff())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("url", &self.config.url)
            .field("timeout", &self.config.timeout())
            .field("valid_ssl", &self.config.valid_ssl)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Render a body for logging, cut to `max` bytes when `max` is nonzero
fn truncate_body(body: &[u8], max: usize) -> Cow<'_, str> {
    if max == 0 || body.len() <= max {
        String::from_utf8_lossy(body)
    } else {
        String::from_utf8_lossy(&body[..max])
    }
}
