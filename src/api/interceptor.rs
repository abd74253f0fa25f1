//
//  campus-client
//  api/interceptor.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Interceptor Chain
//!
//! Cross-cutting transforms applied around every call: header injection,
//! logging, cache busting.
//!
//! Interceptors are registered when the client is built and applied in
//! registration order. They run on every attempt, retries included, so
//! they must be safe to apply repeatedly.
//!
//! Response interceptors see the JSON-level result (before decoding into
//! the caller's type), which lets one chain serve every endpoint.
//!
//! ## Example
//!
//! ```rust
//! use campus_client::api::{HeaderInterceptor, InterceptorChain, LoggingInterceptor, RequestConfig};
//!
//! # async fn example() {
//! let chain = InterceptorChain::new()
//!     .with_request(HeaderInterceptor::new("X-Client", "campus"))
//!     .with_request_fn(|config: RequestConfig| config.with_query("locale", "en"))
//!     .with_response(LoggingInterceptor);
//!
//! let config = chain.process_request(RequestConfig::get()).await;
//! assert_eq!(config.header("x-client"), Some("campus"));
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::common::ApiResult;
use super::request::RequestConfig;

/// A pre-request transform.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Returns the configuration to hand to the next interceptor.
    async fn on_request(&self, config: RequestConfig) -> RequestConfig;
}

/// A post-response transform.
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    /// Returns the result to hand to the next interceptor.
    async fn on_response(&self, result: ApiResult<Value>) -> ApiResult<Value>;
}

/// Adapts a synchronous closure into a [`RequestInterceptor`].
pub struct RequestFn<F>(pub F);

#[async_trait]
impl<F> RequestInterceptor for RequestFn<F>
where
    F: Fn(RequestConfig) -> RequestConfig + Send + Sync,
{
    async fn on_request(&self, config: RequestConfig) -> RequestConfig {
        (self.0)(config)
    }
}

/// Adapts a synchronous closure into a [`ResponseInterceptor`].
pub struct ResponseFn<F>(pub F);

#[async_trait]
impl<F> ResponseInterceptor for ResponseFn<F>
where
    F: Fn(ApiResult<Value>) -> ApiResult<Value> + Send + Sync,
{
    async fn on_response(&self, result: ApiResult<Value>) -> ApiResult<Value> {
        (self.0)(result)
    }
}

/// Ordered request and response interceptors.
///
/// Cloning is cheap; interceptors are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    request: Vec<Arc<dyn RequestInterceptor>>,
    response: Vec<Arc<dyn ResponseInterceptor>>,
}

impl fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("request", &self.request.len())
            .field("response", &self.response.len())
            .finish()
    }
}

impl InterceptorChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a request interceptor.
    pub fn with_request(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.add_request_interceptor(Arc::new(interceptor));
        self
    }

    /// Appends a response interceptor.
    pub fn with_response(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.add_response_interceptor(Arc::new(interceptor));
        self
    }

    /// Appends a closure as a request interceptor.
    pub fn with_request_fn<F>(self, f: F) -> Self
    where
        F: Fn(RequestConfig) -> RequestConfig + Send + Sync + 'static,
    {
        self.with_request(RequestFn(f))
    }

    /// Appends a closure as a response interceptor.
    pub fn with_response_fn<F>(self, f: F) -> Self
    where
        F: Fn(ApiResult<Value>) -> ApiResult<Value> + Send + Sync + 'static,
    {
        self.with_response(ResponseFn(f))
    }

    /// Appends a shared request interceptor.
    pub fn add_request_interceptor(&mut self, interceptor: Arc<dyn RequestInterceptor>) {
        self.request.push(interceptor);
    }

    /// Appends a shared response interceptor.
    pub fn add_response_interceptor(&mut self, interceptor: Arc<dyn ResponseInterceptor>) {
        self.response.push(interceptor);
    }

    /// Number of request interceptors.
    pub fn request_len(&self) -> usize {
        self.request.len()
    }

    /// Number of response interceptors.
    pub fn response_len(&self) -> usize {
        self.response.len()
    }

    /// Folds every request interceptor over `config`, left to right.
    pub async fn process_request(&self, mut config: RequestConfig) -> RequestConfig {
        for interceptor in &self.request {
            config = interceptor.on_request(config).await;
        }
        config
    }

    /// Folds every response interceptor over `result`, left to right.
    pub async fn process_response(&self, mut result: ApiResult<Value>) -> ApiResult<Value> {
        for interceptor in &self.response {
            result = interceptor.on_response(result).await;
        }
        result
    }
}

/// Logs requests and outcomes at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingInterceptor;

#[async_trait]
impl RequestInterceptor for LoggingInterceptor {
    async fn on_request(&self, config: RequestConfig) -> RequestConfig {
        debug!(
            method = %config.method,
            headers = config.headers.len(),
            query = config.query.len(),
            multipart = config.is_multipart(),
            "outgoing request"
        );
        config
    }
}

#[async_trait]
impl ResponseInterceptor for LoggingInterceptor {
    async fn on_response(&self, result: ApiResult<Value>) -> ApiResult<Value> {
        match &result {
            ApiResult::Success { .. } => debug!("request succeeded"),
            ApiResult::Failure { error } => debug!(error = %error, "request failed"),
        }
        result
    }
}

/// Sets a fixed header on every request.
#[derive(Debug, Clone)]
pub struct HeaderInterceptor {
    name: String,
    value: String,
}

impl HeaderInterceptor {
    /// Creates an interceptor setting `name: value`.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[async_trait]
impl RequestInterceptor for HeaderInterceptor {
    async fn on_request(&self, mut config: RequestConfig) -> RequestConfig {
        config.set_header(self.name.clone(), self.value.clone());
        config
    }
}

/// Adds a `_t=<unix millis>` query parameter to GET requests so
/// intermediate HTTP caches are bypassed.
///
/// Re-applying replaces the previous value rather than adding another.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheBustInterceptor;

/// Query parameter written by [`CacheBustInterceptor`].
pub const CACHE_BUST_PARAM: &str = "_t";

#[async_trait]
impl RequestInterceptor for CacheBustInterceptor {
    async fn on_request(&self, mut config: RequestConfig) -> RequestConfig {
        if config.is_idempotent() {
            config.set_query(CACHE_BUST_PARAM, chrono::Utc::now().timestamp_millis().to_string());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ApiError;
    use reqwest::Method;

    fn marker(name: &'static str) -> impl Fn(RequestConfig) -> RequestConfig + Send + Sync {
        move |config: RequestConfig| config.with_query("marker", name)
    }

    #[tokio::test]
    async fn test_request_interceptors_apply_in_registration_order() {
        let chain = InterceptorChain::new()
            .with_request_fn(marker("A"))
            .with_request_fn(marker("B"));

        let config = chain.process_request(RequestConfig::get()).await;
        let markers: Vec<&str> = config.query.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(markers, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_response_interceptors_fold_left_to_right() {
        let chain = InterceptorChain::new()
            .with_response_fn(|result: ApiResult<Value>| {
                result.map(|mut v| {
                    v["seen"] = Value::from("first");
                    v
                })
            })
            .with_response_fn(|result: ApiResult<Value>| {
                result.and_then(|v| {
                    if v["seen"] == "first" {
                        ApiResult::success(Value::from("second"))
                    } else {
                        ApiResult::failure(ApiError::decode("out of order"))
                    }
                })
            });

        let result = chain.process_response(ApiResult::success(serde_json::json!({}))).await;
        assert_eq!(result, ApiResult::success(Value::from("second")));
    }

    #[tokio::test]
    async fn test_empty_chain_is_identity() {
        let chain = InterceptorChain::new();
        let config = RequestConfig::get().with_header("X-A", "1");
        assert_eq!(chain.process_request(config.clone()).await, config);
    }

    #[tokio::test]
    async fn test_cache_bust_is_idempotent_and_get_only() {
        let chain = InterceptorChain::new().with_request(CacheBustInterceptor);

        let once = chain.process_request(RequestConfig::get()).await;
        let twice = chain.process_request(once).await;
        assert_eq!(twice.query.iter().filter(|(k, _)| k == CACHE_BUST_PARAM).count(), 1);

        let post = chain.process_request(RequestConfig::new(Method::POST)).await;
        assert!(post.query.is_empty());
    }

    #[tokio::test]
    async fn test_header_interceptor_overrides() {
        let chain = InterceptorChain::new().with_request(HeaderInterceptor::new("X-Client", "campus"));
        let config = chain
            .process_request(RequestConfig::get().with_header("x-client", "other"))
            .await;
        assert_eq!(config.header("X-Client"), Some("campus"));
        assert_eq!(config.headers.len(), 1);
    }
}
