//! Error types for the Haven API SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors. Request-time errors live in [`crate::clients::ApiError`].
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use haven_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Haven API key.")]
    EmptyApiKey,

    /// API key is shorter than the minimum length.
    #[error("API key is too short ({length} characters). Haven API keys are at least {minimum} characters long.")]
    ApiKeyTooShort {
        /// The length of the key that was provided.
        length: usize,
        /// The minimum accepted key length.
        minimum: usize,
    },

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide an absolute URL with scheme (e.g., 'https://api.haven.dev/v1').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Webhook secret cannot be empty.
    #[error("Webhook secret cannot be empty. Please provide the signing secret from your Haven dashboard.")]
    EmptyWebhookSecret,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The underlying HTTP client could not be initialized.
    #[error("Failed to initialize HTTP client: {reason}")]
    HttpClientInit {
        /// Description of the initialization failure.
        reason: String,
    },
}
