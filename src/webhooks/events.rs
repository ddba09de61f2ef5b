//! Known webhook event kinds.

use serde::{Deserialize, Serialize};

/// Events Haven can deliver to webhook subscriptions.
///
/// The wire value is the dotted event name carried in the `X-Haven-Event`
/// header (e.g. `report.created`). Event names this SDK does not know are
/// still delivered; [`WebhookContext::event`](crate::webhooks::WebhookContext::event)
/// returns `None` for them while
/// [`event_raw`](crate::webhooks::WebhookContext::event_raw) keeps the
/// raw string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebhookEvent {
    /// A report was filed.
    #[serde(rename = "report.created")]
    ReportCreated,
    /// A report reached a terminal state.
    #[serde(rename = "report.resolved")]
    ReportResolved,
    /// An asynchronous analysis flagged content.
    #[serde(rename = "analysis.flagged")]
    AnalysisFlagged,
    /// Monthly usage crossed a warning threshold.
    #[serde(rename = "usage.threshold")]
    UsageThreshold,
    /// A GDPR export archive is ready for download.
    #[serde(rename = "gdpr.export_ready")]
    GdprExportReady,
    /// A GDPR deletion job completed.
    #[serde(rename = "gdpr.deletion_completed")]
    GdprDeletionCompleted,
}

/// Parses an event name into a `WebhookEvent`.
///
/// Returns `None` for unknown event names.
#[must_use]
pub(crate) fn parse_event(name: &str) -> Option<WebhookEvent> {
    // WebhookEvent uses serde rename attributes like "report.created";
    // deserializing a quoted JSON string yields the enum.
    let quoted = format!("\"{name}\"");
    serde_json::from_str(&quoted).ok()
}
