//
//  campus-client
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Per-call request configuration.
//!
//! A [`RequestConfig`] is created fresh for each call, handed through the
//! request interceptors, and consumed by the transport. Nothing in it is
//! shared between concurrent calls.

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;

use super::common::ApiError;

/// Header name for the JSON content type.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Header name for bearer authentication.
pub const AUTHORIZATION: &str = "Authorization";

/// MIME type sent on every non-upload call.
pub const JSON_MIME: &str = "application/json";

/// How the caller expects the response body to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    /// Parse the body as JSON.
    #[default]
    Json,
    /// Pass the body through as a string.
    Text,
}

/// A file attached to a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name.
    pub field: String,
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type, if known.
    pub mime: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Creates a part in the `file` field.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: "file".to_string(),
            file_name: file_name.into(),
            mime: None,
            bytes,
        }
    }

    /// Sets the MIME type.
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Sets the form field name.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// A JSON document.
    Json(serde_json::Value),
    /// A multipart form of files. No `Content-Type` is set by the client so
    /// the transport can add the boundary.
    Multipart(Vec<FilePart>),
}

/// Mutable configuration for a single call.
///
/// # Example
///
/// ```rust
/// use campus_client::api::RequestConfig;
///
/// let config = RequestConfig::get()
///     .with_query("page", "2")
///     .with_header("X-Client", "campus");
///
/// assert_eq!(config.header("x-client"), Some("campus"));
/// assert!(config.is_idempotent());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    /// HTTP method.
    pub method: Method,
    /// Headers in insertion order; names compare case-insensitively.
    pub headers: Vec<(String, String)>,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// Request payload.
    pub body: RequestBody,
    /// Expected response body interpretation.
    pub response_kind: ResponseKind,
    /// Per-attempt timeout overriding the transport default.
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Creates an empty configuration for `method`.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: Vec::new(),
            query: Vec::new(),
            body: RequestBody::Empty,
            response_kind: ResponseKind::Json,
            timeout: None,
        }
    }

    /// A GET request.
    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    /// A DELETE request.
    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// A request carrying `body` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(method: Method, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::invalid_request(e.to_string()))?;
        let mut config = Self::new(method);
        config.body = RequestBody::Json(value);
        Ok(config)
    }

    /// A POST request uploading `parts` as multipart form data.
    pub fn multipart(parts: Vec<FilePart>) -> Self {
        let mut config = Self::new(Method::POST);
        config.body = RequestBody::Multipart(parts);
        config
    }

    /// Adds or replaces a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends several query parameters.
    pub fn with_query_pairs<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.query.extend(pairs);
        self
    }

    /// Sets the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Asks for the body to be passed through as text.
    pub fn expect_text(mut self) -> Self {
        self.response_kind = ResponseKind::Text;
        self
    }

    /// Looks up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Adds a header, replacing any existing value with the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.remove_header(&name);
        self.headers.push((name, value.into()));
    }

    /// Removes every header with the given name.
    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
    }

    /// Replaces every query parameter named `key` with a single value.
    pub fn set_query(&mut self, key: &str, value: impl Into<String>) {
        self.query.retain(|(k, _)| k != key);
        self.query.push((key.to_string(), value.into()));
    }

    /// Whether this is a file upload.
    pub fn is_multipart(&self) -> bool {
        matches!(self.body, RequestBody::Multipart(_))
    }

    /// Whether the method is safe to cache and repeat.
    pub fn is_idempotent(&self) -> bool {
        self.method == Method::GET || self.method == Method::HEAD
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self::get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_header_replaces_case_insensitively() {
        let mut config = RequestConfig::get().with_header("content-type", "text/plain");
        config.set_header("Content-Type", JSON_MIME);
        assert_eq!(config.headers.len(), 1);
        assert_eq!(config.header("CONTENT-TYPE"), Some(JSON_MIME));
    }

    #[test]
    fn test_json_body() {
        let config = RequestConfig::json(Method::POST, &serde_json::json!({"title": "Hi"})).unwrap();
        assert_eq!(config.body, RequestBody::Json(serde_json::json!({"title": "Hi"})));
        assert!(!config.is_idempotent());
    }

    #[test]
    fn test_set_query_keeps_single_value() {
        let mut config = RequestConfig::get().with_query("_t", "1");
        config.set_query("_t", "2");
        assert_eq!(config.query, vec![("_t".to_string(), "2".to_string())]);
    }

    #[test]
    fn test_multipart_is_post() {
        let config = RequestConfig::multipart(vec![FilePart::new("a.txt", b"hi".to_vec()).with_field("attachment")]);
        assert_eq!(config.method, Method::POST);
        assert!(config.is_multipart());
        match &config.body {
            RequestBody::Multipart(parts) => assert_eq!(parts[0].field, "attachment"),
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_timeout_is_per_request() {
        let config = RequestConfig::get().with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(RequestConfig::get().timeout, None);
    }
}
