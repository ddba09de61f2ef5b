//! HTTP request types for the Haven API SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the Haven API.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// HTTP methods supported by the Haven API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for analysis calls and resource creation.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// The body of an outgoing request.
///
/// JSON bodies are serialized once, before the first attempt, and reused
/// across retries. Multipart bodies are pre-built byte payloads produced by
/// [`MultipartForm`](crate::clients::MultipartForm), carrying the boundary
/// token needed for the `Content-Type` header.
#[derive(Clone, Debug)]
pub enum RequestBody {
    /// A JSON document sent as `application/json`.
    Json(serde_json::Value),
    /// A pre-built `multipart/form-data` payload.
    Multipart {
        /// The complete encoded body bytes, including the closing boundary.
        bytes: Vec<u8>,
        /// The boundary token used inside `bytes`.
        boundary: String,
    },
}

impl RequestBody {
    /// Returns the `Content-Type` header value for this body.
    #[must_use]
    pub fn content_type(&self) -> String {
        match self {
            Self::Json(_) => "application/json".to_string(),
            Self::Multipart { boundary, .. } => {
                format!("multipart/form-data; boundary={boundary}")
            }
        }
    }
}

/// Error returned when an HTTP request fails validation before sending.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// A POST or PUT request was built without a body.
    #[error("Cannot use {method} without specifying a body.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A GET or DELETE request was built with a body.
    #[error("Cannot send a body with {method}.")]
    UnexpectedBody {
        /// The HTTP method that forbids a body.
        method: String,
    },
}

impl From<InvalidRequestError> for crate::clients::ApiError {
    fn from(error: InvalidRequestError) -> Self {
        Self::Validation {
            message: error.to_string(),
            details: None,
        }
    }
}

/// An HTTP request to be sent to the Haven API.
///
/// The descriptor is transient: it lives for the duration of one logical
/// operation, spanning every retry attempt. Use [`HttpRequest::builder`]
/// to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use haven_api::clients::{HttpRequest, HttpMethod, RequestBody};
/// use serde_json::json;
///
/// // GET request with query parameters
/// let get_request = HttpRequest::builder(HttpMethod::Get, "reports")
///     .query_param("status", "open")
///     .build()
///     .unwrap();
///
/// // POST request with a JSON body
/// let post_request = HttpRequest::builder(HttpMethod::Post, "analyze/bullying")
///     .body(RequestBody::Json(json!({"text": "you are great"})))
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The path, relative to the configured base URL.
    pub path: String,
    /// The request body, if any.
    pub body: Option<RequestBody>,
    /// Query parameters to append to the URL.
    pub query: Option<HashMap<String, String>>,
    /// Cancellation token honored by the retry loop, if any.
    pub cancel: Option<CancellationToken>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP method for the request
    /// * `path` - The path, relative to the configured base URL
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if a POST/PUT request lacks a body
    /// or a GET/DELETE request carries one.
    pub fn verify(&self) -> Result<(), InvalidRequestError> {
        match self.method {
            HttpMethod::Post | HttpMethod::Put => {
                if self.body.is_none() {
                    return Err(InvalidRequestError::MissingBody {
                        method: self.method.to_string(),
                    });
                }
            }
            HttpMethod::Get | HttpMethod::Delete => {
                if self.body.is_some() {
                    return Err(InvalidRequestError::UnexpectedBody {
                        method: self.method.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    method: HttpMethod,
    path: String,
    body: Option<RequestBody>,
    query: Option<HashMap<String, String>>,
    cancel: Option<CancellationToken>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: None,
            cancel: None,
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query = Some(query);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Attaches a cancellation token to the request.
    ///
    /// The token is checked at the top of every retry iteration and
    /// interrupts backoff sleeps; see
    /// [`HttpClient::execute`](crate::clients::HttpClient::execute) for the
    /// exact guarantee.
    #[must_use]
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidRequestError> {
        let request = HttpRequest {
            method: self.method,
            path: self.path,
            body: self.body,
            query: self.query,
            cancel: self.cancel,
        };
        request.verify()?;
        Ok(request)
    }
}
