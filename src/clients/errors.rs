//! Request error taxonomy for the Haven API SDK.
//!
//! This module contains the closed set of error kinds a request can fail
//! with, the wire format of Haven error bodies, and the pure classifier
//! that maps HTTP status codes onto the taxonomy.
//!
//! # Error Handling
//!
//! Every failed request surfaces exactly one [`ApiError`]. The taxonomy is
//! closed: callers can match exhaustively and the compiler will flag any
//! kind they forget to handle.
//!
//! # Example
//!
//! ```rust,ignore
//! use haven_api::ApiError;
//!
//! match client.analyze_bullying(&input).await {
//!     Ok(analysis) => println!("severity: {:?}", analysis.severity),
//!     Err(ApiError::RateLimit { message }) => {
//!         println!("slow down: {message}");
//!     }
//!     Err(ApiError::Authentication { message }) => {
//!         println!("check your API key: {message}");
//!     }
//!     Err(other) => return Err(other.into()),
//! }
//! ```

use serde::Deserialize;
use thiserror::Error;

/// Fallback message used when an error response carries no parseable body.
pub(crate) const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// An error returned by the Haven API or the request pipeline.
///
/// Each variant corresponds to one row of the SDK's status-code mapping:
///
/// | Status / condition | Variant | Retried |
/// |---|---|---|
/// | 400 | `Validation` | no |
/// | 401 | `Authentication` | no |
/// | 403 | `PlanRestriction` | no |
/// | 404 | `NotFound` | no |
/// | 429 | `RateLimit` | yes |
/// | 5xx | `Server` | yes |
/// | transport timeout | `Timeout` | yes |
/// | transport connectivity failure | `Network` | yes |
/// | caller cancellation | `Cancelled` | — |
/// | anything unrecognized | `Unknown` | yes |
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was rejected as malformed or semantically invalid (HTTP 400).
    #[error("{message}")]
    Validation {
        /// Human-readable description of the validation failure.
        message: String,
        /// Structured per-field details from the error body, when present.
        details: Option<serde_json::Value>,
    },

    /// The API key was missing, malformed, or revoked (HTTP 401).
    #[error("{message}")]
    Authentication {
        /// Human-readable description of the authentication failure.
        message: String,
    },

    /// The operation is not available on the current plan (HTTP 403).
    #[error("{message}")]
    PlanRestriction {
        /// Human-readable description of the restriction.
        message: String,
        /// Machine-readable restriction code (e.g. `PLAN_2001`), when present.
        code: Option<String>,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("{message}")]
    NotFound {
        /// Human-readable description of the missing resource.
        message: String,
    },

    /// The per-window rate limit was exceeded (HTTP 429).
    #[error("{message}")]
    RateLimit {
        /// Human-readable description of the limit.
        message: String,
    },

    /// The API failed internally (HTTP 5xx).
    #[error("{message}")]
    Server {
        /// The HTTP status code of the failing response.
        status: u16,
        /// Human-readable description of the failure.
        message: String,
    },

    /// The attempt exceeded the configured request timeout.
    #[error("{message}")]
    Timeout {
        /// Description of the timeout.
        message: String,
    },

    /// The request could not reach the API at all.
    #[error("{message}")]
    Network {
        /// Description of the transport failure.
        message: String,
    },

    /// The caller cancelled the request before it completed.
    #[error("Request cancelled")]
    Cancelled,

    /// Anything the classifier does not recognize.
    #[error("{message}")]
    Unknown {
        /// Description of the unrecognized failure.
        message: String,
    },
}

impl ApiError {
    /// Returns `true` if the retry engine may attempt this request again.
    ///
    /// Rate-limit, server, timeout, network, and unknown errors are
    /// transient; validation, authentication, not-found, and
    /// plan-restriction errors will fail identically on every attempt.
    /// Cancellation bypasses retry accounting entirely.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimit { .. }
                | Self::Server { .. }
                | Self::Timeout { .. }
                | Self::Network { .. }
                | Self::Unknown { .. }
        )
    }

    /// Returns the machine-readable error code from the response body,
    /// when one was present.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::PlanRestriction { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// The parsed `error` object of a Haven error response.
///
/// Error responses have the shape
/// `{"error": {"code", "message", "details"?, "suggestion"?, "links"?}}`.
/// All fields are optional at the parsing layer; the classifier substitutes
/// a generic message when none is present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g. `AUTH_1002`).
    pub code: Option<String>,
    /// Human-readable error message.
    pub message: Option<String>,
    /// Structured details, typically per-field validation failures.
    pub details: Option<serde_json::Value>,
    /// A suggested remediation, when the API offers one.
    pub suggestion: Option<String>,
    /// Documentation links related to the error.
    pub links: Option<Vec<String>>,
}

/// Wire envelope wrapping [`ApiErrorBody`].
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ApiErrorBody,
}

impl ApiErrorBody {
    /// Parses an error body from raw response bytes, tolerating absent or
    /// malformed JSON.
    #[must_use]
    pub(crate) fn parse(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice::<ErrorEnvelope>(bytes)
            .ok()
            .map(|envelope| envelope.error)
    }
}

/// Maps an HTTP status code and optional parsed error body onto the
/// [`ApiError`] taxonomy.
///
/// This is a pure function of its inputs: no I/O, no side effects. Message
/// content never influences the chosen kind.
#[must_use]
pub(crate) fn classify_status(status: u16, body: Option<ApiErrorBody>) -> ApiError {
    let message = body
        .as_ref()
        .and_then(|b| b.message.clone())
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());

    match status {
        400 => ApiError::Validation {
            message,
            details: body.and_then(|b| b.details),
        },
        401 => ApiError::Authentication { message },
        403 => ApiError::PlanRestriction {
            message,
            code: body.and_then(|b| b.code),
        },
        404 => ApiError::NotFound { message },
        429 => ApiError::RateLimit { message },
        500..=599 => ApiError::Server { status, message },
        _ => ApiError::Unknown { message },
    }
}

/// Classifies a transport-level failure, where no HTTP response exists.
///
/// Timeouts become [`ApiError::Timeout`]; everything else transport-level
/// becomes [`ApiError::Network`] carrying the underlying message.
#[must_use]
pub(crate) fn classify_transport(error: &reqwest::Error) -> ApiError {
    if error.is_timeout() {
        return ApiError::Timeout {
            message: "Request timed out".to_string(),
        };
    }
    if error.is_connect() {
        return ApiError::Network {
            message: format!("Connection failed: {error}"),
        };
    }
    ApiError::Network {
        message: format!("Network error: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body_with_message(message: &str) -> ApiErrorBody {
        ApiErrorBody {
            message: Some(message.to_string()),
            ..ApiErrorBody::default()
        }
    }

    #[test]
    fn test_classifier_covers_the_full_status_table() {
        assert!(matches!(
            classify_status(400, None),
            ApiError::Validation { .. }
        ));
        assert!(matches!(
            classify_status(401, None),
            ApiError::Authentication { .. }
        ));
        assert!(matches!(
            classify_status(403, None),
            ApiError::PlanRestriction { .. }
        ));
        assert!(matches!(
            classify_status(404, None),
            ApiError::NotFound { .. }
        ));
        assert!(matches!(
            classify_status(429, None),
            ApiError::RateLimit { .. }
        ));
        for status in [500, 502, 503, 599] {
            assert!(
                matches!(classify_status(status, None), ApiError::Server { status: s, .. } if s == status)
            );
        }
        assert!(matches!(
            classify_status(418, None),
            ApiError::Unknown { .. }
        ));
        assert!(matches!(
            classify_status(302, None),
            ApiError::Unknown { .. }
        ));
    }

    #[test]
    fn test_classification_is_independent_of_message_content() {
        // A 400 stays a validation error even with an alarming message
        let body = body_with_message("internal server error");
        assert!(matches!(
            classify_status(400, Some(body)),
            ApiError::Validation { .. }
        ));
    }

    #[test]
    fn test_classifier_carries_message_through() {
        let error = classify_status(401, Some(body_with_message("API key invalid")));
        assert_eq!(error.to_string(), "API key invalid");
    }

    #[test]
    fn test_classifier_falls_back_to_generic_message() {
        let error = classify_status(404, None);
        assert_eq!(error.to_string(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_validation_error_carries_details() {
        let body = ApiErrorBody {
            message: Some("text is required".to_string()),
            details: Some(json!({"text": ["must not be empty"]})),
            ..ApiErrorBody::default()
        };
        match classify_status(400, Some(body)) {
            ApiError::Validation { details, .. } => {
                assert_eq!(details, Some(json!({"text": ["must not be empty"]})));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_plan_restriction_carries_code() {
        let body = ApiErrorBody {
            code: Some("PLAN_2001".to_string()),
            message: Some("Audio analysis requires the Pro plan".to_string()),
            ..ApiErrorBody::default()
        };
        let error = classify_status(403, Some(body));
        assert_eq!(error.code(), Some("PLAN_2001"));
    }

    #[test]
    fn test_retryable_partition() {
        assert!(!classify_status(400, None).is_retryable());
        assert!(!classify_status(401, None).is_retryable());
        assert!(!classify_status(403, None).is_retryable());
        assert!(!classify_status(404, None).is_retryable());
        assert!(classify_status(429, None).is_retryable());
        assert!(classify_status(500, None).is_retryable());
        assert!(classify_status(418, None).is_retryable());
        assert!(ApiError::Timeout {
            message: "t".to_string()
        }
        .is_retryable());
        assert!(ApiError::Network {
            message: "n".to_string()
        }
        .is_retryable());
        assert!(!ApiError::Cancelled.is_retryable());
    }

    #[test]
    fn test_error_body_parses_wire_envelope() {
        let raw = br#"{"error":{"code":"AUTH_1002","message":"API key invalid"}}"#;
        let body = ApiErrorBody::parse(raw).unwrap();
        assert_eq!(body.code.as_deref(), Some("AUTH_1002"));
        assert_eq!(body.message.as_deref(), Some("API key invalid"));
    }

    #[test]
    fn test_error_body_parse_tolerates_garbage() {
        assert!(ApiErrorBody::parse(b"").is_none());
        assert!(ApiErrorBody::parse(b"<html>502</html>").is_none());
        assert!(ApiErrorBody::parse(br#"{"unrelated":true}"#).is_none());
    }

    #[test]
    fn test_error_body_parses_optional_fields() {
        let raw = br#"{"error":{"code":"VAL_1101","message":"bad request","details":{"field":"text"},"suggestion":"Provide a non-empty text field.","links":["https://docs.haven.dev/errors/VAL_1101"]}}"#;
        let body = ApiErrorBody::parse(raw).unwrap();
        assert!(body.details.is_some());
        assert!(body.suggestion.is_some());
        assert_eq!(body.links.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: &dyn std::error::Error = &ApiError::Cancelled;
        let _ = error;
    }
}
