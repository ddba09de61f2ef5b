//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use url::Url;

/// The minimum accepted API key length.
///
/// Haven API keys are opaque tokens of at least this many characters;
/// anything shorter is certainly a copy/paste mistake.
pub const MIN_API_KEY_LENGTH: usize = 16;

/// A validated Haven API key.
///
/// This newtype ensures the API key is non-empty and at least
/// [`MIN_API_KEY_LENGTH`] characters long, and masks its value in debug
/// output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the key value, displaying only
/// `ApiKey(*****)` instead of the actual token.
///
/// # Example
///
/// ```rust
/// use haven_api::ApiKey;
///
/// let key = ApiKey::new("hvn_0123456789abcdef").unwrap();
/// assert_eq!(key.as_ref(), "hvn_0123456789abcdef");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty, or
    /// [`ConfigError::ApiKeyTooShort`] if it is shorter than
    /// [`MIN_API_KEY_LENGTH`] characters.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        if key.len() < MIN_API_KEY_LENGTH {
            return Err(ConfigError::ApiKeyTooShort {
                length: key.len(),
                minimum: MIN_API_KEY_LENGTH,
            });
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated webhook signing secret.
///
/// Haven signs webhook deliveries with HMAC-SHA256 using this secret.
/// The newtype ensures the secret is non-empty and masks its value in
/// debug output.
///
/// # Example
///
/// ```rust
/// use haven_api::WebhookSecret;
///
/// let secret = WebhookSecret::new("whsec_abc123").unwrap();
/// assert_eq!(format!("{:?}", secret), "WebhookSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookSecret(String);

impl WebhookSecret {
    /// Creates a new validated webhook secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyWebhookSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyWebhookSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for WebhookSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret(*****)")
    }
}

/// A validated API base URL.
///
/// This newtype validates that the URL parses as an absolute `http` or
/// `https` URL, and normalizes the path to end with a trailing slash so
/// relative endpoint paths join underneath it rather than replacing the
/// last segment.
///
/// # Serialization
///
/// `BaseUrl` serializes to and deserializes from the normalized URL string:
///
/// ```rust
/// use haven_api::BaseUrl;
///
/// let url = BaseUrl::new("https://api.haven.dev/v1").unwrap();
/// let json = serde_json::to_string(&url).unwrap();
/// assert_eq!(json, r#""https://api.haven.dev/v1/""#);
/// ```
///
/// # Example
///
/// ```rust
/// use haven_api::BaseUrl;
///
/// let url = BaseUrl::new("https://api.haven.dev/v1").unwrap();
/// assert_eq!(url.as_ref(), "https://api.haven.dev/v1/");
///
/// assert!(BaseUrl::new("not a url").is_err());
/// assert!(BaseUrl::new("ftp://api.haven.dev").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// The path is normalized to end with `/` so endpoint paths join
    /// underneath it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the value does not parse
    /// as an absolute `http`/`https` URL.
    pub fn new(url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = url.as_ref();
        let invalid = || ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
        };

        let mut parsed = Url::parse(raw).map_err(|_| invalid())?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid());
        }
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }
        Ok(Self(parsed))
    }

    /// Returns the underlying parsed URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.0
    }

    /// Joins a relative endpoint path onto this base URL.
    ///
    /// A leading `/` on `path` is stripped so the path always resolves
    /// underneath the configured base rather than replacing it.
    ///
    /// # Errors
    ///
    /// Returns the underlying parse error if the joined value is not a
    /// valid URL.
    pub fn join(&self, path: &str) -> Result<Url, url::ParseError> {
        self.0.join(path.trim_start_matches('/'))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl Serialize for BaseUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_accepts_valid_key() {
        let key = ApiKey::new("hvn_0123456789abcdef").unwrap();
        assert_eq!(key.as_ref(), "hvn_0123456789abcdef");
    }

    #[test]
    fn test_api_key_rejects_empty() {
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_api_key_rejects_short_keys() {
        let result = ApiKey::new("short");
        assert!(matches!(
            result,
            Err(ConfigError::ApiKeyTooShort {
                length: 5,
                minimum: MIN_API_KEY_LENGTH,
            })
        ));
    }

    #[test]
    fn test_api_key_debug_is_masked() {
        let key = ApiKey::new("hvn_0123456789abcdef").unwrap();
        assert_eq!(format!("{key:?}"), "ApiKey(*****)");
    }

    #[test]
    fn test_webhook_secret_rejects_empty() {
        assert!(matches!(
            WebhookSecret::new(""),
            Err(ConfigError::EmptyWebhookSecret)
        ));
    }

    #[test]
    fn test_webhook_secret_debug_is_masked() {
        let secret = WebhookSecret::new("whsec_abc").unwrap();
        assert_eq!(format!("{secret:?}"), "WebhookSecret(*****)");
    }

    #[test]
    fn test_base_url_normalizes_trailing_slash() {
        let url = BaseUrl::new("https://api.haven.dev/v1").unwrap();
        assert_eq!(url.as_ref(), "https://api.haven.dev/v1/");

        // Already-normalized URLs are left untouched
        let url = BaseUrl::new("https://api.haven.dev/v1/").unwrap();
        assert_eq!(url.as_ref(), "https://api.haven.dev/v1/");
    }

    #[test]
    fn test_base_url_rejects_relative_and_garbage() {
        assert!(BaseUrl::new("not a url").is_err());
        assert!(BaseUrl::new("/v1/analyze").is_err());
        assert!(BaseUrl::new("").is_err());
    }

    #[test]
    fn test_base_url_rejects_non_http_schemes() {
        assert!(BaseUrl::new("ftp://api.haven.dev").is_err());
        assert!(BaseUrl::new("data:text/plain,hello").is_err());
    }

    #[test]
    fn test_base_url_join_stays_under_base() {
        let url = BaseUrl::new("https://api.haven.dev/v1").unwrap();
        let joined = url.join("analyze/bullying").unwrap();
        assert_eq!(joined.as_str(), "https://api.haven.dev/v1/analyze/bullying");

        // A leading slash must not escape the base path
        let joined = url.join("/reports").unwrap();
        assert_eq!(joined.as_str(), "https://api.haven.dev/v1/reports");
    }

    #[test]
    fn test_base_url_serde_round_trip() {
        let url = BaseUrl::new("https://api.haven.dev/v1").unwrap();
        let json = serde_json::to_string(&url).unwrap();
        let back: BaseUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(back, url);
    }
}
