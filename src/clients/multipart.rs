//! `multipart/form-data` body construction for file uploads.
//!
//! Audio and image analysis endpoints take binary uploads. This module
//! builds the raw multipart body bytes: one part per field in insertion
//! order, the file part first, closed with the final boundary marker. It
//! knows nothing about HTTP; the transport attaches the matching
//! `Content-Type` header from the boundary token.
//!
//! # Example
//!
//! ```rust
//! use haven_api::clients::MultipartForm;
//!
//! let mut form = MultipartForm::new();
//! form.file_part("file", "clip.mp3", b"ID3...".to_vec());
//! form.text_part("child_age", "12");
//! let boundary = form.boundary().to_string();
//! let body = form.finish();
//!
//! let text = String::from_utf8_lossy(&body);
//! assert!(text.contains("audio/mpeg"));
//! assert!(text.ends_with(&format!("--{boundary}--\r\n")));
//! ```

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;

/// Infers a MIME type from a file extension.
///
/// The table covers the audio and image formats Haven accepts; anything
/// unrecognized falls back to `application/octet-stream`.
#[must_use]
pub fn mime_for_filename(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        Some("flac") => "audio/flac",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Builder for raw `multipart/form-data` bodies.
///
/// Parts are emitted in insertion order. Call [`MultipartForm::finish`] to
/// append the closing boundary and take the bytes.
#[derive(Debug)]
pub struct MultipartForm {
    boundary: String,
    buf: Vec<u8>,
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartForm {
    /// Creates an empty form with a freshly generated boundary token.
    #[must_use]
    pub fn new() -> Self {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(24)
            .map(char::from)
            .collect();
        Self::with_boundary(format!("haven-{token}"))
    }

    /// Creates an empty form with a caller-supplied boundary token.
    ///
    /// Mostly useful in tests, where a fixed boundary makes output
    /// deterministic.
    #[must_use]
    pub const fn with_boundary(boundary: String) -> Self {
        Self {
            boundary,
            buf: Vec::new(),
        }
    }

    /// Returns the boundary token used by this form.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Appends a file part with a MIME type inferred from the filename
    /// extension.
    pub fn file_part(&mut self, name: &str, filename: &str, bytes: Vec<u8>) {
        let mime = mime_for_filename(filename);
        self.buf
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.buf.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        self.buf
            .extend_from_slice(format!("Content-Type: {mime}\r\n\r\n").as_bytes());
        self.buf.extend_from_slice(&bytes);
        self.buf.extend_from_slice(b"\r\n");
    }

    /// Appends a plain text field part.
    pub fn text_part(&mut self, name: &str, value: &str) {
        self.buf
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.buf.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.extend_from_slice(b"\r\n");
    }

    /// Appends a structured field, JSON-serializing the value into a text
    /// part.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if the value is not
    /// JSON-representable.
    pub fn json_part<T: Serialize>(&mut self, name: &str, value: &T) -> serde_json::Result<()> {
        let encoded = serde_json::to_string(value)?;
        self.text_part(name, &encoded);
        Ok(())
    }

    /// Appends the closing boundary marker and returns the body bytes.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build_form() -> (String, Vec<u8>) {
        let mut form = MultipartForm::with_boundary("test-boundary".to_string());
        form.file_part("file", "report.mp3", b"fake-audio".to_vec());
        form.text_part("child_age", "12");
        (form.boundary().to_string(), form.finish())
    }

    #[test]
    fn test_mime_inference_table() {
        assert_eq!(mime_for_filename("report.mp3"), "audio/mpeg");
        assert_eq!(mime_for_filename("voice.WAV"), "audio/wav");
        assert_eq!(mime_for_filename("song.flac"), "audio/flac");
        assert_eq!(mime_for_filename("photo.jpg"), "image/jpeg");
        assert_eq!(mime_for_filename("photo.JPEG"), "image/jpeg");
        assert_eq!(mime_for_filename("shot.png"), "image/png");
        assert_eq!(mime_for_filename("anim.gif"), "image/gif");
    }

    #[test]
    fn test_unknown_extension_falls_back_to_octet_stream() {
        assert_eq!(mime_for_filename("blob.xyz"), "application/octet-stream");
        assert_eq!(mime_for_filename("no_extension"), "application/octet-stream");
        assert_eq!(mime_for_filename(""), "application/octet-stream");
    }

    #[test]
    fn test_body_contains_file_part_with_inferred_mime() {
        let (_, body) = build_form();
        let text = String::from_utf8(body).unwrap();

        assert!(text.contains(
            "Content-Disposition: form-data; name=\"file\"; filename=\"report.mp3\""
        ));
        assert!(text.contains("Content-Type: audio/mpeg"));
        assert!(text.contains("fake-audio"));
    }

    #[test]
    fn test_body_contains_scalar_field() {
        let (_, body) = build_form();
        let text = String::from_utf8(body).unwrap();

        assert!(text.contains("Content-Disposition: form-data; name=\"child_age\"\r\n\r\n12\r\n"));
    }

    #[test]
    fn test_body_ends_with_closing_boundary() {
        let (boundary, body) = build_form();
        let text = String::from_utf8(body).unwrap();

        assert!(text.ends_with(&format!("--{boundary}--\r\n")));
    }

    #[test]
    fn test_parts_keep_insertion_order() {
        let (boundary, body) = build_form();
        let text = String::from_utf8(body).unwrap();

        let parts: Vec<&str> = text.split(&format!("--{boundary}")).collect();
        // [leading empty, file part, field part, closing "--\r\n"]
        assert_eq!(parts.len(), 4);
        assert!(parts[1].contains("name=\"file\""));
        assert!(parts[2].contains("name=\"child_age\""));
        assert_eq!(parts[3], "--\r\n");
    }

    #[test]
    fn test_json_part_serializes_structured_values() {
        let mut form = MultipartForm::with_boundary("b".to_string());
        form.json_part("metadata", &json!({"session_id": "s_42", "channel": "chat"}))
            .unwrap();
        let text = String::from_utf8(form.finish()).unwrap();

        assert!(text.contains("name=\"metadata\""));
        assert!(text.contains(r#""session_id":"s_42""#));
    }

    #[test]
    fn test_generated_boundaries_are_unique() {
        let a = MultipartForm::new();
        let b = MultipartForm::new();
        assert_ne!(a.boundary(), b.boundary());
        assert!(a.boundary().starts_with("haven-"));
    }
}
