//! HTTP client for Haven API communication.
//!
//! This module provides the [`HttpClient`] type: the retrying, cancellable,
//! cache-aware request pipeline every typed endpoint goes through. One
//! logical call runs up to `max_retries` attempts against the wire, with
//! exponential backoff between attempts, a cache probe for eligible GETs,
//! and a metadata update after every attempt that produced a response.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::clients::cache::{cache_key, ResponseCache};
use crate::clients::errors::{classify_status, classify_transport, ApiError, ApiErrorBody};
use crate::clients::http_request::{HttpMethod, HttpRequest, RequestBody};
use crate::clients::http_response::{parse_response_headers, HttpResponse};
use crate::clients::metadata::MetadataTracker;
use crate::config::{BaseUrl, HavenConfig};
use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Haven API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Bearer authorization and default headers
/// - Retry with exponential backoff for transient failures
/// - Best-effort cancellation between attempts
/// - GET response caching when a TTL is configured
/// - Response metadata tracking from Haven headers
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and cheap to clone; clones share one
/// metadata tracker and one response cache.
///
/// # Example
///
/// ```rust,ignore
/// use haven_api::clients::{HttpClient, HttpRequest, HttpMethod};
///
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "usage")
///     .build()
///     .unwrap();
///
/// let bytes = client.execute(request).await?;
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// The API base URL requests are joined onto.
    base_url: BaseUrl,
    /// Default headers included in all requests.
    default_headers: HashMap<String, String>,
    /// Maximum attempts per logical request, including the first.
    max_retries: u32,
    /// Initial backoff delay; doubles after each failed attempt.
    retry_delay: Duration,
    /// Shared GET response cache.
    cache: Arc<ResponseCache>,
    /// Shared response metadata tracker.
    metadata: Arc<MetadataTracker>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientInit`] if the underlying TLS/HTTP
    /// stack cannot be initialized.
    pub fn new(config: &HavenConfig) -> Result<Self, ConfigError> {
        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Haven API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", config.api_key().as_ref()),
        );

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()
            .map_err(|error| ConfigError::HttpClientInit {
                reason: error.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
            max_retries: config.max_retries(),
            retry_delay: config.retry_delay(),
            cache: Arc::new(ResponseCache::new(config.cache_ttl())),
            metadata: Arc::new(MetadataTracker::new()),
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the shared metadata tracker.
    #[must_use]
    pub fn metadata(&self) -> &MetadataTracker {
        &self.metadata
    }

    /// Executes a request and returns the raw response bytes.
    ///
    /// This is the full pipeline: cache probe (GET with TTL configured),
    /// then up to `max_retries` attempts with exponential backoff. Errors
    /// of kind validation, authentication, not-found, and plan-restriction
    /// abort immediately; everything else is retried until attempts run
    /// out, at which point the last observed error is returned.
    ///
    /// # Cancellation
    ///
    /// When the request carries a [`CancellationToken`], it is checked at
    /// the top of every iteration and interrupts backoff sleeps. An attempt
    /// that is already on the wire is not aborted, so a call cancelled
    /// mid-attempt may still complete successfully. This best-effort
    /// guarantee is deliberate.
    ///
    /// # Errors
    ///
    /// Returns exactly one classified [`ApiError`] describing the failure.
    pub async fn execute(&self, request: HttpRequest) -> Result<Vec<u8>, ApiError> {
        request.verify()?;

        let cache_key = (request.method == HttpMethod::Get && self.cache.is_enabled())
            .then(|| cache_key(&request.path, request.query.as_ref()));

        if let Some(key) = &cache_key {
            if let Some(bytes) = self.cache.get(key) {
                tracing::debug!("cache hit for {key}, skipping request");
                return Ok(bytes);
            }
        }

        // Encode the body once; retries reuse the same bytes.
        let payload = match &request.body {
            Some(RequestBody::Json(value)) => {
                let bytes = serde_json::to_vec(value).map_err(|error| ApiError::Validation {
                    message: format!("Failed to encode request body: {error}"),
                    details: None,
                })?;
                Some((bytes, "application/json".to_string()))
            }
            Some(body @ RequestBody::Multipart { bytes, .. }) => {
                Some((bytes.clone(), body.content_type()))
            }
            None => None,
        };

        let mut last_error: Option<ApiError> = None;

        for attempt in 0..self.max_retries {
            if let Some(token) = &request.cancel {
                if token.is_cancelled() {
                    return Err(ApiError::Cancelled);
                }
            }

            let outcome = self
                .attempt(
                    request.method,
                    &request.path,
                    request.query.as_ref(),
                    payload
                        .as_ref()
                        .map(|(bytes, content_type)| (bytes.as_slice(), content_type.as_str())),
                )
                .await;

            match outcome {
                Ok(bytes) => {
                    if let Some(key) = &cache_key {
                        self.cache.put(key, &bytes);
                    }
                    return Ok(bytes);
                }
                Err(error) if !error.is_retryable() => return Err(error),
                Err(error) => {
                    tracing::warn!(
                        "attempt {}/{} for {} failed: {error}",
                        attempt + 1,
                        self.max_retries,
                        request.path
                    );
                    last_error = Some(error);

                    if attempt + 1 < self.max_retries {
                        let delay = self
                            .retry_delay
                            .saturating_mul(2_u32.saturating_pow(attempt));
                        tracing::debug!("retrying {} in {delay:?}", request.path);
                        if Self::backoff(delay, request.cancel.as_ref()).await {
                            return Err(ApiError::Cancelled);
                        }
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ApiError::Unknown {
            message: "Request failed without an observable error".to_string(),
        }))
    }

    /// Executes a pre-built multipart POST and returns the raw response
    /// bytes.
    ///
    /// `bytes` must be a complete `multipart/form-data` payload using
    /// `boundary`, as produced by
    /// [`MultipartForm`](crate::clients::MultipartForm). The request runs
    /// through the same retry pipeline as [`execute`](Self::execute);
    /// multipart requests are never cached.
    ///
    /// # Errors
    ///
    /// Returns exactly one classified [`ApiError`] describing the failure.
    pub async fn execute_multipart(
        &self,
        path: &str,
        bytes: Vec<u8>,
        boundary: String,
    ) -> Result<Vec<u8>, ApiError> {
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .body(RequestBody::Multipart { bytes, boundary })
            .build()?;
        self.execute(request).await
    }

    /// Executes a request and decodes the response body into `T`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] of the failed request, or
    /// [`ApiError::Unknown`] if the 2xx body does not decode as `T`.
    pub async fn send<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let bytes = self.execute(request).await?;
        serde_json::from_slice(&bytes).map_err(|error| ApiError::Unknown {
            message: format!("Failed to decode response body: {error}"),
        })
    }

    /// Performs exactly one network attempt.
    ///
    /// A response of any status updates the metadata tracker with its
    /// headers and the measured wall-clock latency. 2xx responses yield the
    /// raw body; anything else is classified into an [`ApiError`].
    async fn attempt(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<&HashMap<String, String>>,
        body: Option<(&[u8], &str)>,
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.base_url.join(path).map_err(|error| ApiError::Unknown {
            message: format!("Invalid request path '{path}': {error}"),
        })?;

        let mut builder = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (name, value) in &self.default_headers {
            builder = builder.header(name, value);
        }
        if let Some(query) = query {
            builder = builder.query(query);
        }
        if let Some((bytes, content_type)) = body {
            builder = builder.header("Content-Type", content_type).body(bytes.to_vec());
        }

        let started = Instant::now();
        let result = builder.send().await;
        let latency = started.elapsed();

        let response = result.map_err(|error| classify_transport(&error))?;
        let code = response.status().as_u16();
        let headers = parse_response_headers(response.headers());
        let body_bytes = response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .unwrap_or_default();

        self.metadata.update(&headers, latency);

        let response = HttpResponse::new(code, headers, body_bytes);
        if response.is_ok() {
            return Ok(response.into_body());
        }

        let parsed = ApiErrorBody::parse(&response.body);
        Err(classify_status(response.code, parsed))
    }

    /// Sleeps for the backoff delay, racing the cancellation token.
    /// Returns `true` if the sleep was interrupted by cancellation.
    async fn backoff(delay: Duration, cancel: Option<&CancellationToken>) -> bool {
        match cancel {
            Some(token) => {
                tokio::select! {
                    () = token.cancelled() => true,
                    () = tokio::time::sleep(delay) => false,
                }
            }
            None => {
                tokio::time::sleep(delay).await;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiKey;

    fn create_test_config() -> HavenConfig {
        HavenConfig::builder()
            .api_key(ApiKey::new("hvn_0123456789abcdef").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_construction_with_config() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        assert_eq!(client.base_url().as_ref(), "https://api.haven.dev/v1/");
    }

    #[test]
    fn test_authorization_header_is_bearer_token() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&"Bearer hvn_0123456789abcdef".to_string())
        );
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Haven API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = HavenConfig::builder()
            .api_key(ApiKey::new("hvn_0123456789abcdef").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains("Haven API Library"));
    }

    #[test]
    fn test_clones_share_metadata_and_cache() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        let clone = client.clone();

        assert!(Arc::ptr_eq(&client.metadata, &clone.metadata));
        assert!(Arc::ptr_eq(&client.cache, &clone.cache));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }

    #[tokio::test]
    async fn test_invalid_request_surfaces_validation_error() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        // Hand-built descriptor that skips builder validation
        let request = HttpRequest {
            method: HttpMethod::Post,
            path: "reports".to_string(),
            body: None,
            query: None,
            cancel: None,
        };

        let result = client.execute(request).await;
        assert!(matches!(result, Err(ApiError::Validation { .. })));
    }
}
