//! Incoming webhook handling for the Haven API SDK.
//!
//! Haven delivers subscribed events (see
//! [`crate::api::subscriptions`]) as HTTP POSTs signed with
//! HMAC-SHA256 using the account's webhook secret. This module verifies
//! those deliveries and exposes the parsed event metadata.
//!
//! # Overview
//!
//! - [`WebhookRequest`]: the raw body and headers of an incoming delivery
//! - [`verify_webhook`]: high-level verification using [`HavenConfig`](crate::HavenConfig)
//! - [`verify_hmac`]: low-level verification for custom integrations
//! - [`WebhookContext`]: verified delivery metadata
//! - [`WebhookEvent`]: known event kinds, with raw-string fallback
//!
//! # Example
//!
//! ```rust
//! use haven_api::webhooks::{WebhookRequest, verify_webhook, WebhookEvent};
//! use haven_api::webhooks::signature::compute_signature_base64;
//! use haven_api::{HavenConfig, ApiKey, WebhookSecret};
//!
//! let config = HavenConfig::builder()
//!     .api_key(ApiKey::new("hvn_0123456789abcdef").unwrap())
//!     .webhook_secret(WebhookSecret::new("whsec_test").unwrap())
//!     .build()
//!     .unwrap();
//!
//! // Compute a valid signature for demonstration
//! let body = br#"{"report_id":"rep_1"}"#;
//! let signature = compute_signature_base64(body, "whsec_test");
//!
//! let request = WebhookRequest::new(
//!     body.to_vec(),
//!     signature,
//!     Some("report.created".to_string()),
//!     Some("dlv_123".to_string()),
//!     None,
//! );
//!
//! let context = verify_webhook(&config, &request).expect("verification failed");
//! assert_eq!(context.event(), Some(WebhookEvent::ReportCreated));
//! ```
//!
//! # Security
//!
//! All signature comparisons are constant-time to prevent timing attacks.
//! Always verify before acting on a delivery; an unverified body may have
//! been forged by anyone who knows your callback URL.

mod events;
pub mod signature;
mod verification;

pub use events::WebhookEvent;
pub use verification::{
    verify_hmac, verify_webhook, WebhookContext, WebhookRequest, HEADER_DELIVERY_ID,
    HEADER_EVENT, HEADER_SIGNATURE, HEADER_TIMESTAMP,
};

use thiserror::Error;

/// Errors that can occur while handling incoming webhooks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WebhookError {
    /// No webhook secret was configured on the client.
    #[error("No webhook secret is configured. Set one with HavenConfigBuilder::webhook_secret.")]
    SecretNotConfigured,

    /// The delivery's signature did not match the request body.
    #[error("Webhook signature verification failed.")]
    InvalidSignature,
}
