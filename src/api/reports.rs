//! Incident report endpoints.
//!
//! Reports capture incidents surfaced by analysis (or filed manually) for
//! follow-up by a safety team. Creation is a POST; reads are GETs and
//! participate in the response cache when a TTL is configured.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::HavenClient;
use crate::clients::ApiError;

/// Category of a filed report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportCategory {
    /// Bullying or harassment.
    Bullying,
    /// Grooming or predatory behavior.
    Grooming,
    /// Unsafe content (violence, sexual content, hate).
    UnsafeContent,
    /// Self-harm indicators.
    SelfHarm,
    /// Anything that does not fit the other categories.
    Other,
}

impl ReportCategory {
    /// Returns the wire value used in query parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bullying => "bullying",
            Self::Grooming => "grooming",
            Self::UnsafeContent => "unsafe_content",
            Self::SelfHarm => "self_harm",
            Self::Other => "other",
        }
    }
}

/// Workflow state of a report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Newly filed, not yet triaged.
    Open,
    /// Being reviewed by the safety team.
    UnderReview,
    /// Reviewed and acted upon.
    Resolved,
    /// Reviewed and closed without action.
    Dismissed,
}

impl ReportStatus {
    /// Returns the wire value used in query parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::UnderReview => "under_review",
            Self::Resolved => "resolved",
            Self::Dismissed => "dismissed",
        }
    }
}

/// A report to be filed.
#[derive(Clone, Debug, Serialize)]
pub struct NewReport {
    /// Category of the incident.
    pub category: ReportCategory,
    /// Human-readable description of the incident.
    pub description: String,
    /// The offending content itself, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Opaque identifier of the reporting user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_id: Option<String>,
    /// Free-form metadata attached to the report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl NewReport {
    /// Creates a report with the required fields.
    #[must_use]
    pub fn new(category: ReportCategory, description: impl Into<String>) -> Self {
        Self {
            category,
            description: description.into(),
            content: None,
            reporter_id: None,
            metadata: None,
        }
    }
}

/// A filed report as returned by the API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    /// Unique report identifier.
    pub id: String,
    /// Category of the incident.
    pub category: ReportCategory,
    /// Current workflow state.
    pub status: ReportStatus,
    /// Human-readable description of the incident.
    pub description: String,
    /// When the report was filed.
    pub created_at: DateTime<Utc>,
    /// When the report was last modified, if ever.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filter and pagination parameters for listing reports.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReportListParams {
    /// Only reports in this state.
    pub status: Option<ReportStatus>,
    /// Only reports in this category.
    pub category: Option<ReportCategory>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

impl ReportListParams {
    fn into_query(self) -> Option<HashMap<String, String>> {
        let mut query = HashMap::new();
        if let Some(status) = self.status {
            query.insert("status".to_string(), status.as_str().to_string());
        }
        if let Some(category) = self.category {
            query.insert("category".to_string(), category.as_str().to_string());
        }
        if let Some(page) = self.page {
            query.insert("page".to_string(), page.to_string());
        }
        if let Some(per_page) = self.per_page {
            query.insert("per_page".to_string(), per_page.to_string());
        }
        (!query.is_empty()).then_some(query)
    }
}

/// One page of report listings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportPage {
    /// The reports on this page.
    pub reports: Vec<Report>,
    /// Total reports matching the filter.
    pub total: u64,
    /// The 1-based page number returned.
    pub page: u32,
}

impl HavenClient {
    /// Files a new report.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] if the request fails.
    pub async fn create_report(&self, report: &NewReport) -> Result<Report, ApiError> {
        self.post("reports", report).await
    }

    /// Fetches a single report by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no such report exists, or another
    /// classified [`ApiError`] if the request fails.
    pub async fn get_report(&self, id: &str) -> Result<Report, ApiError> {
        let path = format!("reports/{}", urlencoding::encode(id));
        self.get(&path, None).await
    }

    /// Lists reports matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] if the request fails.
    pub async fn list_reports(&self, params: ReportListParams) -> Result<ReportPage, ApiError> {
        self.get("reports", params.into_query()).await
    }
}
