//! Configuration types for the Haven API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for API communication with Haven.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HavenConfig`]: The main configuration struct holding all SDK settings
//! - [`HavenConfigBuilder`]: A builder for constructing [`HavenConfig`] instances
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`BaseUrl`]: A validated API base URL
//! - [`WebhookSecret`]: A validated webhook signing secret with masked debug output
//!
//! # Example
//!
//! ```rust
//! use haven_api::{HavenConfig, ApiKey};
//!
//! let config = HavenConfig::builder()
//!     .api_key(ApiKey::new("hvn_0123456789abcdef").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl, WebhookSecret, MIN_API_KEY_LENGTH};

use std::time::Duration;

use crate::error::ConfigError;

/// The production Haven API endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.haven.dev/v1";

/// Configuration for the Haven API SDK.
///
/// This struct holds all configuration needed for SDK operations, including
/// the API credential, endpoint, timeout, and retry/caching policy. It is
/// immutable once built; concurrent calls share it without copying.
///
/// # Thread Safety
///
/// `HavenConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use haven_api::{HavenConfig, ApiKey};
/// use std::time::Duration;
///
/// let config = HavenConfig::builder()
///     .api_key(ApiKey::new("hvn_0123456789abcdef").unwrap())
///     .timeout(Duration::from_secs(10))
///     .max_retries(5)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.max_retries(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct HavenConfig {
    api_key: ApiKey,
    base_url: BaseUrl,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
    cache_ttl: Duration,
    webhook_secret: Option<WebhookSecret>,
    user_agent_prefix: Option<String>,
}

impl HavenConfig {
    /// Creates a new builder for constructing a `HavenConfig`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use haven_api::{HavenConfig, ApiKey};
    ///
    /// let config = HavenConfig::builder()
    ///     .api_key(ApiKey::new("hvn_0123456789abcdef").unwrap())
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> HavenConfigBuilder {
        HavenConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the per-attempt request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the maximum number of attempts per logical request,
    /// including the first.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the initial backoff delay between retry attempts.
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Returns the GET response cache TTL. Zero disables caching.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    /// Returns the webhook signing secret, if configured.
    #[must_use]
    pub const fn webhook_secret(&self) -> Option<&WebhookSecret> {
        self.webhook_secret.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify HavenConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HavenConfig>();
};

/// Builder for constructing [`HavenConfig`] instances.
///
/// This builder provides a fluent API for configuring the SDK. The only
/// required field is `api_key`. All other fields have sensible defaults.
///
/// # Defaults
///
/// - `base_url`: [`DEFAULT_BASE_URL`]
/// - `timeout`: 30 seconds per attempt
/// - `max_retries`: 3 attempts total
/// - `retry_delay`: 500 milliseconds initial backoff
/// - `cache_ttl`: zero (GET caching disabled)
/// - `webhook_secret`: `None`
/// - `user_agent_prefix`: `None`
///
/// # Example
///
/// ```rust
/// use haven_api::{HavenConfig, ApiKey, BaseUrl};
/// use std::time::Duration;
///
/// let config = HavenConfig::builder()
///     .api_key(ApiKey::new("hvn_0123456789abcdef").unwrap())
///     .base_url(BaseUrl::new("https://api.staging.haven.dev/v1").unwrap())
///     .cache_ttl(Duration::from_secs(60))
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct HavenConfigBuilder {
    api_key: Option<ApiKey>,
    base_url: Option<BaseUrl>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    retry_delay: Option<Duration>,
    cache_ttl: Option<Duration>,
    webhook_secret: Option<WebhookSecret>,
    user_agent_prefix: Option<String>,
}

impl HavenConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the per-attempt request timeout.
    ///
    /// Exceeding the timeout yields a retryable timeout error. There is no
    /// separate wall-clock deadline across retries; total time is bounded
    /// by `max_retries * (timeout + backoff delay)`.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the maximum number of attempts per logical request.
    ///
    /// This counts the first attempt: with `max_retries(3)` the transport
    /// is invoked at most 3 times before the last error is surfaced.
    #[must_use]
    pub const fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Sets the initial backoff delay between retry attempts.
    ///
    /// The delay before attempt `n` (0-based) is `retry_delay * 2^(n-1)`,
    /// so successive waits double.
    #[must_use]
    pub const fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = Some(retry_delay);
        self
    }

    /// Sets the GET response cache TTL.
    ///
    /// A zero duration (the default) disables caching entirely. Only GET
    /// requests are cache-eligible.
    #[must_use]
    pub const fn cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = Some(cache_ttl);
        self
    }

    /// Sets the webhook signing secret used to verify incoming webhook
    /// deliveries.
    #[must_use]
    pub fn webhook_secret(mut self, secret: WebhookSecret) -> Self {
        self.webhook_secret = Some(secret);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`HavenConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` is not
    /// set, or [`ConfigError::InvalidBaseUrl`] if the default base URL
    /// constant fails to parse (which would indicate a packaging defect).
    pub fn build(self) -> Result<HavenConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let base_url = match self.base_url {
            Some(url) => url,
            None => BaseUrl::new(DEFAULT_BASE_URL)?,
        };

        Ok(HavenConfig {
            api_key,
            base_url,
            timeout: self.timeout.unwrap_or(Duration::from_secs(30)),
            max_retries: self.max_retries.unwrap_or(3),
            retry_delay: self.retry_delay.unwrap_or(Duration::from_millis(500)),
            cache_ttl: self.cache_ttl.unwrap_or(Duration::ZERO),
            webhook_secret: self.webhook_secret,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
