//! Audio and image analysis endpoints.
//!
//! Media analysis uploads the file plus optional context fields as
//! `multipart/form-data`. The file part always comes first, with a MIME
//! type inferred from the filename extension; scalar fields are sent as
//! text parts and structured metadata is JSON-serialized.

use serde::{Deserialize, Serialize};

use crate::api::analysis::{BullyingAnalysis, ContentAnalysis, EmotionAnalysis};
use crate::api::HavenClient;
use crate::clients::{ApiError, MultipartForm};

/// An audio clip to analyze.
#[derive(Clone, Debug)]
pub struct AudioAnalysisRequest {
    /// Filename of the clip; the extension drives MIME type inference.
    pub file_name: String,
    /// Raw audio bytes.
    pub data: Vec<u8>,
    /// Age of the child involved, when known.
    pub child_age: Option<u8>,
    /// BCP-47 language tag of the speech, when known.
    pub language: Option<String>,
    /// Free-form metadata attached to the analysis.
    pub metadata: Option<serde_json::Value>,
}

impl AudioAnalysisRequest {
    /// Creates a request for the given file.
    #[must_use]
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
            child_age: None,
            language: None,
            metadata: None,
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

    fn into_form(self) -> Result<MultipartForm, ApiError> {
        let mut form = MultipartForm::new();
        form.file_part("file", &self.file_name, self.data);
        if let Some(age) = self.child_age {
            form.text_part("child_age", &age.to_string());
        }
        if let Some(language) = &self.language {
            form.text_part("language", language);
        }
        if let Some(metadata) = &self.metadata {
            form.json_part("metadata", metadata)
                .map_err(|error| ApiError::Validation {
                    message: format!("Failed to encode metadata field: {error}"),
                    details: None,
                })?;
        }
        Ok(form)
    }
}

/// Result of an audio analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AudioAnalysis {
    /// Transcript of the recognized speech, when transcription succeeded.
    #[serde(default)]
    pub transcript: Option<String>,
    /// Duration of the clip in seconds.
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    /// Bullying analysis of the transcript.
    #[serde(default)]
    pub bullying: Option<BullyingAnalysis>,
    /// Emotion analysis of the speech.
    #[serde(default)]
    pub emotion: Option<EmotionAnalysis>,
}

/// An image to analyze.
#[derive(Clone, Debug)]
pub struct ImageAnalysisRequest {
    /// Filename of the image; the extension drives MIME type inference.
    pub file_name: String,
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// Free-form metadata attached to the analysis.
    pub metadata: Option<serde_json::Value>,
}

impl ImageAnalysisRequest {
    /// Creates a request for the given file.
    #[must_use]
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
            metadata: None,
        }
    }

    /// Attaches free-form metadata.
    #[must_use]
    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    fn into_form(self) -> Result<MultipartForm, ApiError> {
        let mut form = MultipartForm::new();
        form.file_part("file", &self.file_name, self.data);
        if let Some(metadata) = &self.metadata {
            form.json_part("metadata", metadata)
                .map_err(|error| ApiError::Validation {
                    message: format!("Failed to encode metadata field: {error}"),
                    details: None,
                })?;
        }
        Ok(form)
    }
}

/// Result of an image analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageAnalysis {
    /// Unsafe-content classification of the image.
    pub content: ContentAnalysis,
    /// Text recognized in the image, when OCR found any.
    #[serde(default)]
    pub ocr_text: Option<String>,
}

impl HavenClient {
    /// Uploads an audio clip for transcription and analysis.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] if the request fails.
    pub async fn analyze_audio(
        &self,
        request: AudioAnalysisRequest,
    ) -> Result<AudioAnalysis, ApiError> {
        let form = request.into_form()?;
        self.post_multipart("analyze/audio", form).await
    }

    /// Uploads an image for unsafe-content classification and OCR.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] if the request fails.
    pub async fn analyze_image(
        &self,
        request: ImageAnalysisRequest,
    ) -> Result<ImageAnalysis, ApiError> {
        let form = request.into_form()?;
        self.post_multipart("analyze/image", form).await
    }
}
