//! # Haven API Rust SDK
//!
//! A Rust SDK for the Haven content safety API, providing typed access to
//! text, audio, and image analysis, incident reporting, webhook management,
//! usage queries, and GDPR data operations.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`HavenConfig`] and [`HavenConfigBuilder`]
//! - Validated newtypes for credentials and endpoint values
//! - A retrying, cancellable request pipeline with exponential backoff
//! - A closed, exhaustively-matchable request error taxonomy ([`ApiError`])
//! - Optional time-bounded caching of GET responses
//! - Rate-limit and monthly-usage tracking from response headers
//! - Multipart upload support for audio and image analysis
//! - Webhook signature verification via [`webhooks`]
//!
//! ## Quick Start
//!
//! ```rust
//! use haven_api::{HavenConfig, ApiKey};
//!
//! // Create configuration using the builder pattern
//! let config = HavenConfig::builder()
//!     .api_key(ApiKey::new("hvn_0123456789abcdef").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Analyzing Text
//!
//! ```rust,ignore
//! use haven_api::{HavenClient, HavenConfig, ApiKey, TextInput};
//!
//! let config = HavenConfig::builder()
//!     .api_key(ApiKey::new("hvn_0123456789abcdef")?)
//!     .build()?;
//! let client = HavenClient::new(config)?;
//!
//! let input = TextInput::new("nobody likes you, just leave")
//!     .child_age(13);
//!
//! let analysis = client.analyze_bullying(&input).await?;
//! if analysis.detected {
//!     println!("bullying detected at severity {:?}", analysis.severity);
//! }
//! ```
//!
//! ## Uploading Media
//!
//! ```rust,ignore
//! use haven_api::AudioAnalysisRequest;
//!
//! let audio = std::fs::read("clip.mp3")?;
//! let result = client
//!     .analyze_audio(AudioAnalysisRequest::new("clip.mp3", audio).child_age(12))
//!     .await?;
//! println!("transcript: {:?}", result.transcript);
//! ```
//!
//! ## Retries, Caching, and Cancellation
//!
//! Transient failures (429, 5xx, timeouts, connection errors) are retried
//! with exponential backoff up to the configured attempt count. GET
//! responses are cached when a TTL is configured. Calls can be cancelled
//! between attempts with a [`tokio_util::sync::CancellationToken`]:
//!
//! ```rust,ignore
//! use tokio_util::sync::CancellationToken;
//! use std::time::Duration;
//!
//! let config = HavenConfig::builder()
//!     .api_key(ApiKey::new("hvn_0123456789abcdef")?)
//!     .max_retries(5)
//!     .retry_delay(Duration::from_millis(250))
//!     .cache_ttl(Duration::from_secs(60))
//!     .build()?;
//! let client = HavenClient::new(config)?;
//!
//! let token = CancellationToken::new();
//! let cancellable = client.with_cancellation(token.clone());
//! // token.cancel() aborts between attempts and during backoff sleeps
//! ```
//!
//! ## Verifying Webhooks
//!
//! ```rust,ignore
//! use haven_api::webhooks::{WebhookRequest, verify_webhook};
//!
//! let request = WebhookRequest::new(body, signature, event, delivery_id, timestamp);
//! let context = verify_webhook(client.config(), &request)?;
//! println!("verified delivery of {}", context.event_raw());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`; clones share cache and metadata
//! - **Async-first**: Designed for use with the Tokio async runtime
//! - **Closed error taxonomy**: every failure is exactly one [`ApiError`] kind

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use api::analysis::{
    BullyingAnalysis, ContentAnalysis, EmotionAnalysis, FlaggedSpan, GroomingAnalysis, RiskLevel,
    Severity, TextInput,
};
pub use api::gdpr::{DataJob, DataJobKind, DataJobStatus};
pub use api::media::{AudioAnalysis, AudioAnalysisRequest, ImageAnalysis, ImageAnalysisRequest};
pub use api::reports::{
    NewReport, Report, ReportCategory, ReportListParams, ReportPage, ReportStatus,
};
pub use api::subscriptions::{NewSubscription, Subscription};
pub use api::usage::UsageReport;
pub use api::HavenClient;
pub use config::{
    ApiKey, BaseUrl, HavenConfig, HavenConfigBuilder, WebhookSecret, DEFAULT_BASE_URL,
};
pub use error::ConfigError;

// Re-export request pipeline types
pub use clients::{
    ApiError, ApiErrorBody, HttpClient, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidRequestError, MultipartForm, RateLimitInfo, RequestBody, UsageInfo,
};

// Re-export webhook verification types for convenience
pub use webhooks::{
    verify_webhook, WebhookContext, WebhookError, WebhookEvent, WebhookRequest,
};
