//
//  campus-client
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # HTTP Transport
//!
//! The transport performs exactly one network exchange and reports what
//! came back. It makes no success/failure decisions beyond "did a response
//! arrive at all": status interpretation lives in [`super::normalize`].
//!
//! [`Transport`] is the seam the client is built on, so tests can swap the
//! network for a scripted implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use super::common::ApiError;
use super::request::{RequestBody, RequestConfig, CONTENT_TYPE};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// What came back from the server, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Canonical reason phrase (`Not Found`), empty when unknown.
    pub status_text: String,
    /// Value of the `Content-Type` header.
    pub content_type: Option<String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response with the canonical reason phrase for `status`.
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default()
            .to_string();
        Self {
            status,
            status_text,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    /// A JSON response.
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status, Some("application/json"), body.to_string())
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the content type announces JSON (`application/json`, `application/problem+json`).
    pub fn is_json(&self) -> bool {
        self.content_type.as_deref().is_some_and(|ct| {
            let mime = ct.split(';').next().unwrap_or_default().trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
    }

    /// Whether the body is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// The body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Performs a single HTTP exchange.
///
/// Implementations return `Err` only when no response was received (or the
/// request could not be built); every received response, whatever its
/// status, is `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` to the absolute `url`.
    async fn execute(&self, url: &str, request: &RequestConfig) -> Result<RawResponse, ApiError>;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Creates a transport whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            http: Client::builder()
                .user_agent(format!("campus/{}", crate::VERSION))
                .timeout(timeout)
                .build()?,
        })
    }

    fn build(&self, url: &str, request: &RequestConfig) -> Result<reqwest::RequestBuilder, ApiError> {
        let mut builder = self.http.request(request.method.clone(), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        for (name, value) in &request.headers {
            if request.is_multipart() && name.eq_ignore_ascii_case(CONTENT_TYPE) {
                continue;
            }
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::invalid_request(format!("header '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::invalid_request(format!("header '{name}': {e}")))?;
            builder = builder.header(name, value);
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(value.to_string()),
            RequestBody::Multipart(parts) => builder.multipart(multipart_form(parts)?),
        };

        Ok(builder)
    }
}

fn multipart_form(parts: &[super::request::FilePart]) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for file in parts {
        let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        if let Some(mime) = &file.mime {
            part = part
                .mime_str(mime)
                .map_err(|e| ApiError::invalid_request(format!("mime type '{mime}': {e}")))?;
        }
        form = form.part(file.field.clone(), part);
    }
    Ok(form)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, url: &str, request: &RequestConfig) -> Result<RawResponse, ApiError> {
        let response = self
            .build(url, request)?
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            content_type,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_reason_phrase() {
        let response = RawResponse::new(404, None, "");
        assert_eq!(response.status_text, "Not Found");
        assert!(!response.is_success());
        assert!(response.is_blank());
    }

    #[test]
    fn test_json_content_type_detection() {
        assert!(RawResponse::new(200, Some("application/json; charset=utf-8"), "{}").is_json());
        assert!(RawResponse::new(400, Some("application/problem+json"), "{}").is_json());
        assert!(!RawResponse::new(200, Some("text/plain"), "ok").is_json());
        assert!(!RawResponse::new(200, None, "").is_json());
    }
}
