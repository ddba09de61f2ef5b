//! Webhook subscription endpoints.
//!
//! Haven delivers analysis and report events to subscribed callback URLs.
//! This module manages the subscriptions themselves; verifying the
//! signatures of incoming deliveries lives in [`crate::webhooks`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::HavenClient;
use crate::clients::ApiError;

/// A webhook subscription to be created.
///
/// # Example
///
/// ```rust
/// use haven_api::NewSubscription;
///
/// let subscription = NewSubscription::new(
///     "https://example.com/hooks/haven",
///     vec!["report.created".to_string(), "analysis.flagged".to_string()],
/// );
/// assert_eq!(subscription.events.len(), 2);
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct NewSubscription {
    /// The callback URL deliveries are POSTed to.
    pub url: String,
    /// Event names to subscribe to (e.g. `report.created`).
    pub events: Vec<String>,
    /// Whether the subscription starts active. Defaults to true server-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl NewSubscription {
    /// Creates a subscription for the given URL and events.
    #[must_use]
    pub fn new(url: impl Into<String>, events: Vec<String>) -> Self {
        Self {
            url: url.into(),
            events,
            active: None,
        }
    }
}

/// A webhook subscription as returned by the API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Subscription {
    /// Unique subscription identifier.
    pub id: String,
    /// The callback URL deliveries are POSTed to.
    pub url: String,
    /// Subscribed event names.
    pub events: Vec<String>,
    /// Whether deliveries are currently being made.
    pub active: bool,
    /// When the subscription was created.
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct SubscriptionList {
    subscriptions: Vec<Subscription>,
}

impl HavenClient {
    /// Creates a webhook subscription.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] if the request fails.
    pub async fn create_subscription(
        &self,
        subscription: &NewSubscription,
    ) -> Result<Subscription, ApiError> {
        self.post("webhooks", subscription).await
    }

    /// Lists all webhook subscriptions.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] if the request fails.
    pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
        let list: SubscriptionList = self.get("webhooks", None).await?;
        Ok(list.subscriptions)
    }

    /// Deletes a webhook subscription.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no such subscription exists, or
    /// another classified [`ApiError`] if the request fails.
    pub async fn delete_subscription(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("webhooks/{}", urlencoding::encode(id));
        self.delete(&path).await
    }
}
