//! Webhook signature verification.
//!
//! Provides [`verify_webhook`] for config-driven verification and
//! [`verify_hmac`] for custom integrations that manage secrets themselves.
//! The body is kept as raw bytes throughout so the exact delivered payload
//! feeds the HMAC computation.

use crate::config::HavenConfig;
use crate::webhooks::events::{parse_event, WebhookEvent};
use crate::webhooks::signature::{compute_signature_base64, constant_time_compare};
use crate::webhooks::WebhookError;

/// HTTP header name for the HMAC-SHA256 signature.
///
/// The value is a base64-encoded HMAC-SHA256 signature of the raw request
/// body, computed with the account's webhook secret.
pub const HEADER_SIGNATURE: &str = "X-Haven-Signature";

/// HTTP header name for the event name (e.g. `report.created`).
pub const HEADER_EVENT: &str = "X-Haven-Event";

/// HTTP header name for the unique delivery identifier.
///
/// Deliveries may be retried; this id is stable across retries and can be
/// used for idempotency.
pub const HEADER_DELIVERY_ID: &str = "X-Haven-Delivery-Id";

/// HTTP header name for the delivery timestamp (RFC 3339).
pub const HEADER_TIMESTAMP: &str = "X-Haven-Timestamp";

/// An incoming webhook delivery from Haven.
///
/// Holds the raw request body and the headers needed for verification.
/// The body is raw bytes to preserve the exact payload for HMAC
/// computation; parse it as JSON only after verification succeeds.
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    /// Raw request body as bytes.
    body: Vec<u8>,
    /// Signature from the `X-Haven-Signature` header.
    signature_header: String,
    /// Event name from the `X-Haven-Event` header.
    event: Option<String>,
    /// Delivery id from the `X-Haven-Delivery-Id` header.
    delivery_id: Option<String>,
    /// Timestamp from the `X-Haven-Timestamp` header.
    timestamp: Option<String>,
}

impl WebhookRequest {
    /// Creates a new webhook request from the delivery's body and headers.
    #[must_use]
    pub fn new(
        body: Vec<u8>,
        signature_header: String,
        event: Option<String>,
        delivery_id: Option<String>,
        timestamp: Option<String>,
    ) -> Self {
        Self {
            body,
            signature_header,
            event,
            delivery_id,
            timestamp,
        }
    }

    /// Returns the raw request body as a byte slice.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the signature header value.
    #[must_use]
    pub fn signature_header(&self) -> &str {
        &self.signature_header
    }

    /// Returns the event name header value, if present.
    #[must_use]
    pub fn event(&self) -> Option<&str> {
        self.event.as_deref()
    }

    /// Returns the delivery id header value, if present.
    #[must_use]
    pub fn delivery_id(&self) -> Option<&str> {
        self.delivery_id.as_deref()
    }

    /// Returns the timestamp header value, if present.
    #[must_use]
    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }
}

/// Verified webhook metadata, returned after a successful signature check.
///
/// Provides both the parsed event enum (for known event names) and the raw
/// event string (always available).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookContext {
    event: Option<WebhookEvent>,
    event_raw: String,
    delivery_id: Option<String>,
    timestamp: Option<String>,
}

impl WebhookContext {
    fn new(
        event: Option<WebhookEvent>,
        event_raw: String,
        delivery_id: Option<String>,
        timestamp: Option<String>,
    ) -> Self {
        Self {
            event,
            event_raw,
            delivery_id,
            timestamp,
        }
    }

    /// Returns the parsed event kind, if the event name is a known value.
    #[must_use]
    pub const fn event(&self) -> Option<WebhookEvent> {
        self.event
    }

    /// Returns the raw event name as received in the header.
    ///
    /// Always available, even for event names this SDK does not know.
    #[must_use]
    pub fn event_raw(&self) -> &str {
        &self.event_raw
    }

    /// Returns the delivery id, if present in the delivery headers.
    #[must_use]
    pub fn delivery_id(&self) -> Option<&str> {
        self.delivery_id.as_deref()
    }

    /// Returns the delivery timestamp, if present in the delivery headers.
    #[must_use]
    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }
}

/// Verifies the HMAC signature of a webhook body against a secret.
///
/// This is the low-level primitive; prefer [`verify_webhook`], which reads
/// the secret from [`HavenConfig`].
///
/// # Example
///
/// ```rust
/// use haven_api::webhooks::verify_hmac;
/// use haven_api::webhooks::signature::compute_signature_base64;
///
/// let body = b"delivery payload";
/// let secret = "whsec_test";
/// let signature = compute_signature_base64(body, secret);
///
/// assert!(verify_hmac(body, &signature, secret));
/// assert!(!verify_hmac(body, "invalid", secret));
/// ```
#[must_use]
pub fn verify_hmac(raw_body: &[u8], signature_header: &str, secret: &str) -> bool {
    let computed = compute_signature_base64(raw_body, secret);
    constant_time_compare(&computed, signature_header)
}

/// Verifies a webhook delivery and returns the verified context.
///
/// # Errors
///
/// Returns [`WebhookError::SecretNotConfigured`] if the config carries no
/// webhook secret, or [`WebhookError::InvalidSignature`] if the signature
/// does not match the body.
pub fn verify_webhook(
    config: &HavenConfig,
    request: &WebhookRequest,
) -> Result<WebhookContext, WebhookError> {
    let secret = config
        .webhook_secret()
        .ok_or(WebhookError::SecretNotConfigured)?;

    if !verify_hmac(request.body(), request.signature_header(), secret.as_ref()) {
        return Err(WebhookError::InvalidSignature);
    }

    let event_raw = request.event().unwrap_or("").to_string();
    let event = if event_raw.is_empty() {
        None
    } else {
        parse_event(&event_raw)
    };

    Ok(WebhookContext::new(
        event,
        event_raw,
        request.delivery_id().map(String::from),
        request.timestamp().map(String::from),
    ))
}
