//! HTTP response types for the Haven API SDK.
//!
//! This module provides the [`HttpResponse`] type holding one attempt's raw
//! outcome: status code, lowercased headers, and the unparsed body bytes.
//! Decoding into typed results happens upstream, after the caching decision.

use std::collections::HashMap;

/// An HTTP response from the Haven API.
///
/// The body is kept as raw bytes; successful responses are decoded by the
/// caller after any caching decision, and error responses are parsed by the
/// error classifier.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of the given header, if present.
    ///
    /// Header names are matched against the lowercased form.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `x-request-id` header value, if present.
    ///
    /// This ID identifies the request on Haven's side and should be
    /// included in error reports.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Consumes the response, returning the raw body bytes.
    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

/// Lowers a reqwest header map into the `HashMap` form used throughout the
/// SDK, lowercasing names and preserving repeated values.
#[must_use]
pub(crate) fn parse_response_headers(
    headers: &reqwest::header::HeaderMap,
) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}
