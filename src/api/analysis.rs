//! Text analysis endpoints.
//!
//! Haven's text analyzers share one input shape, [`TextInput`], and return
//! per-analyzer result types. All four endpoints are POST requests and run
//! through the retrying pipeline like every other call.
//!
//! # Example
//!
//! ```rust,ignore
//! use haven_api::TextInput;
//!
//! let input = TextInput::new("nobody likes you, just leave")
//!     .child_age(13)
//!     .language("en");
//!
//! let analysis = client.analyze_bullying(&input).await?;
//! if analysis.detected {
//!     println!("bullying at severity {:?}", analysis.severity);
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::HavenClient;
use crate::clients::ApiError;

/// Input for a text analysis call.
///
/// Only `text` is required. The optional fields give the analyzers
/// context: `child_age` tunes age-appropriate thresholds, `language` skips
/// language detection, and `metadata` is an open-ended JSON object echoed
/// into webhook events for this analysis.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TextInput {
    /// The text to analyze.
    pub text: String,
    /// Age of the child involved in the conversation, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_age: Option<u8>,
    /// BCP-47 language tag of the text, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Free-form metadata attached to the analysis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl TextInput {
    /// Creates an input with just the text to analyze.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the child's age.
    #[must_use]
    pub const fn child_age(mut self, age: u8) -> Self {
        self.child_age = Some(age);
        self
    }

    /// Sets the language tag.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Attaches free-form metadata.
    #[must_use]
    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Severity scale used by detection results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Nothing harmful detected.
    None,
    /// Mildly concerning content.
    Low,
    /// Clearly concerning content.
    Medium,
    /// Harmful content requiring attention.
    High,
    /// Content requiring immediate intervention.
    Critical,
}

/// A byte range of the analyzed text flagged by a detector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedSpan {
    /// Byte offset where the flagged span starts.
    pub start: usize,
    /// Byte offset one past the end of the flagged span.
    pub end: usize,
    /// The detector label that flagged this span.
    pub label: String,
}

/// Result of a bullying analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BullyingAnalysis {
    /// Whether bullying was detected.
    pub detected: bool,
    /// Overall severity of the detected content.
    pub severity: Severity,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f64,
    /// Bullying sub-categories detected (e.g. `exclusion`, `threat`).
    #[serde(default)]
    pub categories: Vec<String>,
    /// Text spans that triggered the detection.
    #[serde(default)]
    pub spans: Vec<FlaggedSpan>,
}

/// Risk scale used by grooming detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// No grooming indicators present.
    Minimal,
    /// Weak or isolated indicators.
    Low,
    /// Multiple indicators present.
    Moderate,
    /// A clear grooming pattern.
    High,
    /// An active, escalating pattern.
    Severe,
}

/// Result of a grooming analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroomingAnalysis {
    /// Whether a grooming pattern was detected.
    pub detected: bool,
    /// Overall risk level.
    pub risk_level: RiskLevel,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f64,
    /// Named indicators contributing to the assessment
    /// (e.g. `isolation_attempt`, `gift_offering`).
    #[serde(default)]
    pub indicators: Vec<String>,
}

/// Result of an unsafe-content analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentAnalysis {
    /// Whether any category crossed its flagging threshold.
    pub flagged: bool,
    /// Per-category scores in `[0, 1]` (e.g. `violence`, `self_harm`).
    #[serde(default)]
    pub scores: HashMap<String, f64>,
    /// Categories that crossed their thresholds.
    #[serde(default)]
    pub flagged_categories: Vec<String>,
}

/// Result of an emotion analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    /// The strongest detected emotion.
    pub dominant: String,
    /// Per-emotion scores in `[0, 1]`.
    #[serde(default)]
    pub scores: HashMap<String, f64>,
}

impl HavenClient {
    /// Analyzes text for bullying.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] if the request fails.
    pub async fn analyze_bullying(&self, input: &TextInput) -> Result<BullyingAnalysis, ApiError> {
        self.post("analyze/bullying", input).await
    }

    /// Analyzes a conversation for grooming patterns.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] if the request fails.
    pub async fn analyze_grooming(&self, input: &TextInput) -> Result<GroomingAnalysis, ApiError> {
        self.post("analyze/grooming", input).await
    }

    /// Classifies text against Haven's unsafe-content categories.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] if the request fails.
    pub async fn analyze_content(&self, input: &TextInput) -> Result<ContentAnalysis, ApiError> {
        self.post("analyze/content", input).await
    }

    /// Detects the emotional tone of text.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] if the request fails.
    pub async fn analyze_emotion(&self, input: &TextInput) -> Result<EmotionAnalysis, ApiError> {
        self.post("analyze/emotion", input).await
    }
}
