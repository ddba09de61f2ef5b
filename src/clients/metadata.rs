//! Response metadata tracking for the Haven API SDK.
//!
//! Every completed request attempt reports its response headers and
//! measured latency to a shared [`MetadataTracker`]. The tracker keeps the
//! most recent request id, latency, rate-limit window, and monthly usage
//! figures, and hands out consistent snapshots to concurrent readers.
//!
//! Header groups are parsed all-or-nothing: if any required header of a
//! group is absent or malformed, the previous value of that group is kept
//! rather than partially overwritten.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};

/// The per-window rate-limit state, parsed from response headers.
///
/// Haven reports the window in three headers that are parsed as a group:
/// `x-ratelimit-limit`, `x-ratelimit-remaining`, and `x-ratelimit-reset`
/// (unix seconds).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests allowed per window.
    pub limit: u32,
    /// Requests remaining in the current window.
    pub remaining: u32,
    /// When the current window resets.
    pub reset: DateTime<Utc>,
}

impl RateLimitInfo {
    /// Parses the rate-limit header group. Returns `None` unless all three
    /// required headers are present and well-formed.
    #[must_use]
    pub(crate) fn from_headers(headers: &HashMap<String, Vec<String>>) -> Option<Self> {
        let limit = first_header(headers, "x-ratelimit-limit")?.parse().ok()?;
        let remaining = first_header(headers, "x-ratelimit-remaining")?
            .parse()
            .ok()?;
        let reset_epoch: i64 = first_header(headers, "x-ratelimit-reset")?.parse().ok()?;
        let reset = DateTime::from_timestamp(reset_epoch, 0)?;
        Some(Self {
            limit,
            remaining,
            reset,
        })
    }
}

/// Monthly usage and quota figures, parsed from response headers.
///
/// The required group is `x-usage-limit`, `x-usage-used`, and
/// `x-usage-remaining`. `x-usage-reset` (ISO-8601 date) and
/// `x-usage-warning` are optional trailing fields that may independently
/// be present once the required group parses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsageInfo {
    /// Requests included in the current billing period.
    pub limit: u64,
    /// Requests consumed so far this period.
    pub used: u64,
    /// Requests remaining this period.
    pub remaining: u64,
    /// The date the billing period resets, when reported.
    pub reset_date: Option<NaiveDate>,
    /// A human-readable quota warning, when the account is near its limit.
    pub warning: Option<String>,
}

impl UsageInfo {
    /// Parses the usage header group. Returns `None` unless the three
    /// required headers are present and well-formed.
    #[must_use]
    pub(crate) fn from_headers(headers: &HashMap<String, Vec<String>>) -> Option<Self> {
        let limit = first_header(headers, "x-usage-limit")?.parse().ok()?;
        let used = first_header(headers, "x-usage-used")?.parse().ok()?;
        let remaining = first_header(headers, "x-usage-remaining")?.parse().ok()?;
        let reset_date =
            first_header(headers, "x-usage-reset").and_then(|value| value.parse().ok());
        let warning = first_header(headers, "x-usage-warning").map(ToString::to_string);
        Some(Self {
            limit,
            used,
            remaining,
            reset_date,
            warning,
        })
    }
}

fn first_header<'a>(headers: &'a HashMap<String, Vec<String>>, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|values| values.first())
        .map(String::as_str)
}

#[derive(Debug, Default)]
struct MetadataInner {
    last_request_id: Option<String>,
    last_latency: Option<Duration>,
    rate_limit: Option<RateLimitInfo>,
    usage: Option<UsageInfo>,
}

/// Thread-safe store for the latest request diagnostics.
///
/// One tracker is shared by every clone of a client. Updates and reads go
/// through a single mutex with short critical sections; header parsing
/// happens before the lock is taken, and no reader can observe a
/// half-applied update.
///
/// The tracker reflects whichever attempt's response was most recently
/// processed, which under concurrency may not match call-initiation order.
#[derive(Debug, Default)]
pub struct MetadataTracker {
    inner: Mutex<MetadataInner>,
}

impl MetadataTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed attempt's response headers and latency.
    ///
    /// Latency and request id are overwritten unconditionally (the request
    /// id is cleared when the header is absent, so it never refers to an
    /// older request). The rate-limit and usage groups are each replaced
    /// only when they parse completely.
    pub fn update(&self, headers: &HashMap<String, Vec<String>>, latency: Duration) {
        let request_id = first_header(headers, "x-request-id").map(ToString::to_string);
        let rate_limit = RateLimitInfo::from_headers(headers);
        let usage = UsageInfo::from_headers(headers);

        if let Some(warning) = usage.as_ref().and_then(|u| u.warning.as_deref()) {
            tracing::warn!("Haven monthly usage warning: {warning}");
        }

        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.last_latency = Some(latency);
        inner.last_request_id = request_id;
        if let Some(rate_limit) = rate_limit {
            inner.rate_limit = Some(rate_limit);
        }
        if let Some(usage) = usage {
            inner.usage = Some(usage);
        }
    }

    /// Returns the request id of the most recently completed attempt.
    #[must_use]
    pub fn last_request_id(&self) -> Option<String> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last_request_id
            .clone()
    }

    /// Returns the measured latency of the most recently completed attempt.
    #[must_use]
    pub fn last_latency(&self) -> Option<Duration> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last_latency
    }

    /// Returns the most recently observed rate-limit window.
    #[must_use]
    pub fn rate_limit_info(&self) -> Option<RateLimitInfo> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .rate_limit
    }

    /// Returns the most recently observed monthly usage figures.
    #[must_use]
    pub fn usage(&self) -> Option<UsageInfo> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .usage
            .clone()
    }
}

// Verify MetadataTracker is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MetadataTracker>();
};
