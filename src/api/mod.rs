//! Typed endpoint surface for the Haven API.
//!
//! This module provides [`HavenClient`], the entry point for all Haven
//! operations, and the endpoint groups implemented on it:
//!
//! - [`analysis`]: text analysis (bullying, grooming, unsafe content, emotion)
//! - [`media`]: audio and image analysis via multipart upload
//! - [`reports`]: incident report management
//! - [`subscriptions`]: webhook subscription management
//! - [`usage`]: usage and billing queries
//! - [`gdpr`]: GDPR data export and deletion operations
//!
//! Endpoint modules own their request/response schemas; all of them go
//! through the shared [`HttpClient`](crate::clients::HttpClient) pipeline,
//! which handles retries, caching, cancellation, and metadata tracking.
//!
//! # Example
//!
//! ```rust,ignore
//! use haven_api::{HavenClient, HavenConfig, ApiKey, TextInput};
//!
//! let config = HavenConfig::builder()
//!     .api_key(ApiKey::new("hvn_0123456789abcdef")?)
//!     .build()?;
//! let client = HavenClient::new(config)?;
//!
//! let analysis = client
//!     .analyze_bullying(&TextInput::new("you are pathetic"))
//!     .await?;
//! println!("severity: {:?}", analysis.severity);
//! ```

pub mod analysis;
pub mod gdpr;
pub mod media;
pub mod reports;
pub mod subscriptions;
pub mod usage;

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::clients::{
    ApiError, HttpClient, HttpMethod, HttpRequest, HttpRequestBuilder, MultipartForm,
    RateLimitInfo, RequestBody, UsageInfo,
};
use crate::config::HavenConfig;
use crate::error::ConfigError;

/// The Haven API client.
///
/// `HavenClient` owns an immutable [`HavenConfig`] and the shared request
/// pipeline. It is cheap to clone; clones share the same response cache and
/// metadata tracker, so quota figures observed by one handle are visible to
/// all.
///
/// # Concurrency
///
/// Any number of tasks may call endpoint methods on the same client (or
/// clones of it) simultaneously. Each call runs its own retry loop;
/// shared state is limited to the cache and the metadata tracker, both of
/// which synchronize internally.
///
/// # Cancellation
///
/// [`HavenClient::with_cancellation`] returns a handle whose calls honor a
/// [`CancellationToken`]:
///
/// ```rust,ignore
/// use tokio_util::sync::CancellationToken;
///
/// let token = CancellationToken::new();
/// let cancellable = client.with_cancellation(token.clone());
///
/// tokio::spawn(async move {
///     tokio::time::sleep(std::time::Duration::from_secs(2)).await;
///     token.cancel();
/// });
///
/// // Fails with ApiError::Cancelled if the token fires between attempts.
/// let result = cancellable.analyze_emotion(&input).await;
/// ```
#[derive(Clone, Debug)]
pub struct HavenClient {
    config: HavenConfig,
    http: HttpClient,
    cancel: Option<CancellationToken>,
}

// Verify HavenClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HavenClient>();
};

impl HavenClient {
    /// Creates a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientInit`] if the underlying HTTP
    /// stack cannot be initialized.
    pub fn new(config: HavenConfig) -> Result<Self, ConfigError> {
        let http = HttpClient::new(&config)?;
        Ok(Self {
            config,
            http,
            cancel: None,
        })
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &HavenConfig {
        &self.config
    }

    /// Returns the underlying request pipeline, for callers that need to
    /// issue raw requests against endpoints this SDK does not model.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Returns a handle whose calls honor the given cancellation token.
    ///
    /// The handle shares this client's cache and metadata tracker. The
    /// token is checked between retry attempts and during backoff sleeps;
    /// an attempt already on the wire is not aborted.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            config: self.config.clone(),
            http: self.http.clone(),
            cancel: Some(token),
        }
    }

    /// Returns the request id of the most recently completed attempt.
    #[must_use]
    pub fn last_request_id(&self) -> Option<String> {
        self.http.metadata().last_request_id()
    }

    /// Returns the measured latency of the most recently completed attempt.
    #[must_use]
    pub fn last_latency(&self) -> Option<Duration> {
        self.http.metadata().last_latency()
    }

    /// Returns the most recently observed rate-limit window.
    #[must_use]
    pub fn rate_limit_info(&self) -> Option<RateLimitInfo> {
        self.http.metadata().rate_limit_info()
    }

    /// Returns the most recently observed monthly usage figures, as
    /// reported by response headers.
    ///
    /// For an explicit query against the billing endpoint, see
    /// [`HavenClient::get_usage`].
    #[must_use]
    pub fn usage(&self) -> Option<UsageInfo> {
        self.http.metadata().usage()
    }

    fn finalize(&self, builder: HttpRequestBuilder) -> Result<HttpRequest, ApiError> {
        let builder = match &self.cancel {
            Some(token) => builder.cancel_token(token.clone()),
            None => builder,
        };
        Ok(builder.build()?)
    }

    async fn send_request<T: DeserializeOwned>(
        &self,
        builder: HttpRequestBuilder,
    ) -> Result<T, ApiError> {
        let request = self.finalize(builder)?;
        self.http.send(request).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<T, ApiError> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, path);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        self.send_request(builder).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let value = serde_json::to_value(body).map_err(|error| ApiError::Validation {
            message: format!("Failed to encode request body: {error}"),
            details: None,
        })?;
        let builder = HttpRequest::builder(HttpMethod::Post, path).body(RequestBody::Json(value));
        self.send_request(builder).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: MultipartForm,
    ) -> Result<T, ApiError> {
        let boundary = form.boundary().to_string();
        let bytes = form.finish();
        let builder = HttpRequest::builder(HttpMethod::Post, path)
            .body(RequestBody::Multipart { bytes, boundary });
        self.send_request(builder).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.finalize(HttpRequest::builder(HttpMethod::Delete, path))?;
        self.http.execute(request).await.map(|_| ())
    }
}
