//! HMAC-SHA256 signature primitives for webhook verification.
//!
//! Haven signs each webhook delivery by computing HMAC-SHA256 over the raw
//! request body with the account's webhook secret and base64-encoding the
//! result into the `X-Haven-Signature` header.
//!
//! # Security
//!
//! All comparisons use constant-time equality to prevent timing attacks.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes an HMAC-SHA256 signature over raw bytes, base64-encoded.
///
/// This matches the signature format Haven places in the
/// `X-Haven-Signature` header.
///
/// # Note
///
/// This function uses `expect()` internally but this will never panic
/// because HMAC-SHA256 accepts keys of any length.
///
/// # Example
///
/// ```rust
/// use haven_api::webhooks::signature::compute_signature_base64;
///
/// let signature = compute_signature_base64(b"payload", "whsec_test");
/// assert_eq!(signature.len(), 44); // SHA256 produces 32 bytes = 44 base64 chars
/// ```
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature_base64(message: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    let result = mac.finalize();
    BASE64.encode(result.into_bytes())
}

/// Performs constant-time comparison of two strings.
///
/// Used for signature comparison to prevent timing attacks. Strings of
/// different lengths compare unequal without leaking where they differ.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
