//! HTTP client types for Haven API communication.
//!
//! This module provides the foundational request pipeline for making
//! authenticated requests to the Haven API. It handles request/response
//! processing, retry logic with exponential backoff, best-effort
//! cancellation, GET response caching, multipart upload encoding, and
//! Haven-specific header parsing.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async request pipeline every endpoint goes through
//! - [`HttpRequest`]: A request descriptor, built with [`HttpRequestBuilder`]
//! - [`HttpResponse`]: One attempt's raw outcome
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`RequestBody`]: JSON or pre-built multipart payloads
//! - [`MultipartForm`]: Builder for `multipart/form-data` bodies
//! - [`ApiError`]: The closed request error taxonomy
//! - [`MetadataTracker`]: Thread-safe latest-response diagnostics
//! - [`RateLimitInfo`] / [`UsageInfo`]: Header-derived quota state
//!
//! # Example
//!
//! ```rust,ignore
//! use haven_api::clients::{HttpClient, HttpRequest, HttpMethod};
//!
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "reports")
//!     .query_param("status", "open")
//!     .build()
//!     .unwrap();
//!
//! let bytes = client.execute(request).await?;
//! ```

mod cache;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod metadata;
mod multipart;

pub use errors::{ApiError, ApiErrorBody};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{
    HttpMethod, HttpRequest, HttpRequestBuilder, InvalidRequestError, RequestBody,
};
pub use http_response::HttpResponse;
pub use metadata::{MetadataTracker, RateLimitInfo, UsageInfo};
pub use multipart::{mime_for_filename, MultipartForm};
