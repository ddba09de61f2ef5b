//! Usage and billing endpoints.
//!
//! Two views of usage exist: the billing endpoint queried here, and the
//! per-response usage headers tracked passively by the client (see
//! [`HavenClient::usage`]). The endpoint is authoritative; the headers are
//! free and always current as of the last response.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::HavenClient;
use crate::clients::ApiError;

/// The account's usage for the current billing period.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UsageReport {
    /// Name of the subscribed plan.
    pub plan: String,
    /// First day of the current billing period.
    pub period_start: NaiveDate,
    /// Last day of the current billing period.
    pub period_end: NaiveDate,
    /// Requests consumed this period.
    pub requests_used: u64,
    /// Requests included in the plan.
    pub requests_limit: u64,
    /// Requests remaining before overage.
    pub requests_remaining: u64,
    /// Requests billed beyond the plan allowance, if any.
    #[serde(default)]
    pub overage: Option<u64>,
}

impl HavenClient {
    /// Fetches the account's usage for the current billing period.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] if the request fails.
    pub async fn get_usage(&self) -> Result<UsageReport, ApiError> {
        self.get("usage", None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_usage_report_decodes() {
        let report: UsageReport = serde_json::from_value(json!({
            "plan": "pro",
            "period_start": "2025-01-01",
            "period_end": "2025-01-31",
            "requests_used": 1200,
            "requests_limit": 50000,
            "requests_remaining": 48800
        }))
        .unwrap();

        assert_eq!(report.plan, "pro");
        assert_eq!(
            report.period_start,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(report.requests_remaining, 48_800);
        assert!(report.overage.is_none());
    }

    #[test]
    fn test_usage_report_decodes_overage() {
        let report: UsageReport = serde_json::from_value(json!({
            "plan": "starter",
            "period_start": "2025-01-01",
            "period_end": "2025-01-31",
            "requests_used": 10500,
            "requests_limit": 10000,
            "requests_remaining": 0,
            "overage": 500
        }))
        .unwrap();

        assert_eq!(report.overage, Some(500));
    }
}
