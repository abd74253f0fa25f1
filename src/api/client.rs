//
//  campus-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Campus API
//!
//! [`ApiClient`] wires the transport, interceptor chain, normalizer, retry
//! policy and response cache together. Service facades are thin layers on
//! top of the methods here.
//!
//! ## Request pipeline
//!
//! ```text
//! RequestConfig -> default headers -> request interceptors -> Transport
//!     -> normalize -> response interceptors -> decode::<T> -> ApiResult<T>
//! ```
//!
//! ## Features
//!
//! - `Content-Type: application/json` on every call except uploads
//! - Bearer authentication while a token is set
//! - GETs run under the retry policy; mutations are attempted once
//! - Keyed caching of GET responses with per-entry TTL

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::cache::ResponseCache;
use super::common::{ApiError, ApiResult};
use super::context::ClientContext;
use super::normalize::{decode, normalize};
use super::request::{FilePart, RequestConfig, AUTHORIZATION, CONTENT_TYPE, JSON_MIME};
use super::retry::RetryPolicy;
use super::transport::{HttpTransport, Transport, DEFAULT_TIMEOUT};

/// The Campus API client.
///
/// Cloning is cheap and clones share the same session (token, cache,
/// interceptors).
///
/// # Example
///
/// ```rust,no_run
/// use campus_client::api::{ApiClient, RequestConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = ApiClient::new("http://localhost:8080/api/v1")?;
/// client.set_auth_token("eyJhbGciOi...");
///
/// let health: serde_json::Value = client
///     .send("/health", RequestConfig::get())
///     .await
///     .into_result()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    context: Arc<ClientContext>,
    retry: RetryPolicy,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.context.base_url())
            .field("authenticated", &self.context.is_authenticated())
            .field("interceptors", self.context.interceptors())
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client for `base_url` over HTTP with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client could not be created.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self::with_transport(
            Arc::new(HttpTransport::new(DEFAULT_TIMEOUT)?),
            ClientContext::new(base_url),
        ))
    }

    /// Creates a client over any transport.
    pub fn with_transport(transport: Arc<dyn Transport>, context: ClientContext) -> Self {
        Self {
            transport,
            context: Arc::new(context),
            retry: RetryPolicy::default(),
        }
    }

    /// Replaces the retry policy applied to GETs.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// The session state.
    pub fn context(&self) -> &ClientContext {
        &self.context
    }

    /// The response cache.
    pub fn cache(&self) -> &ResponseCache {
        self.context.cache()
    }

    /// The retry policy applied to GETs.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Attaches `token` to every following call.
    pub fn set_auth_token(&self, token: impl Into<String>) {
        self.context.set_auth_token(token);
    }

    /// Stops attaching a token.
    pub fn remove_auth_token(&self) {
        self.context.remove_auth_token();
    }

    /// Whether a token is set.
    pub fn is_authenticated(&self) -> bool {
        self.context.is_authenticated()
    }

    /// Sends one request and decodes the response into `T`.
    ///
    /// Never fails with anything but an [`ApiResult::Failure`].
    pub async fn send<T: DeserializeOwned>(&self, endpoint: &str, config: RequestConfig) -> ApiResult<T> {
        let result = self.send_value(endpoint, config).await;
        finish(endpoint, result)
    }

    /// Sends a request under the client's retry policy.
    pub async fn send_with_retry<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        config: RequestConfig,
    ) -> ApiResult<T> {
        let result = self
            .retry
            .run(move || self.send_value(endpoint, config.clone()))
            .await;
        finish(endpoint, result)
    }

    /// Sends one request and returns the JSON-level result.
    ///
    /// Runs default headers, request interceptors, the transport, the
    /// normalizer and response interceptors, in that order.
    pub async fn send_value(&self, endpoint: &str, config: RequestConfig) -> ApiResult<Value> {
        let config = self.prepare(config);
        let config = self.context.interceptors().process_request(config).await;
        let url = self.context.url_for(endpoint);

        debug!(method = %config.method, %url, "sending request");
        let outcome = self.transport.execute(&url, &config).await;
        let result = normalize(outcome, config.response_kind);

        if let Some(error) = result.error() {
            warn!(endpoint, error = %error, "API request failed");
        }

        self.context.interceptors().process_response(result).await
    }

    fn prepare(&self, mut config: RequestConfig) -> RequestConfig {
        if config.is_multipart() {
            config.remove_header(CONTENT_TYPE);
        } else if config.header(CONTENT_TYPE).is_none() {
            config.set_header(CONTENT_TYPE, JSON_MIME);
        }

        if let Some(token) = self.context.auth_token() {
            config.set_header(AUTHORIZATION, format!("Bearer {token}"));
        }

        config
    }

    /// GET `endpoint` under the retry policy.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.send_with_retry(endpoint, RequestConfig::get()).await
    }

    /// GET `endpoint` with query parameters under the retry policy.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: Vec<(String, String)>,
    ) -> ApiResult<T> {
        self.send_with_retry(endpoint, RequestConfig::get().with_query_pairs(query))
            .await
    }

    /// POST `body` as JSON.
    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, endpoint, body).await
    }

    /// PUT `body` as JSON.
    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, endpoint, body).await
    }

    /// PATCH `body` as JSON.
    pub async fn patch<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PATCH, endpoint, body).await
    }

    /// DELETE `endpoint`.
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.send(endpoint, RequestConfig::delete()).await
    }

    /// POST `parts` as multipart form data.
    pub async fn upload<T: DeserializeOwned>(&self, endpoint: &str, parts: Vec<FilePart>) -> ApiResult<T> {
        self.send(endpoint, RequestConfig::multipart(parts)).await
    }

    async fn send_json<T, B>(&self, method: Method, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        match RequestConfig::json(method, body) {
            Ok(config) => self.send(endpoint, config).await,
            Err(error) => {
                warn!(endpoint, error = %error, "could not build request");
                ApiResult::failure(error)
            }
        }
    }

    /// Serves `key` from the cache, or GETs `endpoint` under the retry
    /// policy and caches a successful response for `ttl` (default TTL when
    /// `None`).
    ///
    /// Only the miss path is retried.
    pub async fn get_cached<T: DeserializeOwned>(
        &self,
        key: &str,
        endpoint: &str,
        query: Vec<(String, String)>,
        ttl: Option<Duration>,
    ) -> ApiResult<T> {
        let config = &RequestConfig::get().with_query_pairs(query);
        self.cached(key, endpoint, ttl, move || {
            self.retry.run(move || self.send_value(endpoint, config.clone()))
        })
        .await
    }

    /// Serves `key` from the cache, or makes a single attempt at
    /// `endpoint` and caches a successful response.
    ///
    /// Wrap the call in [`with_retry`](super::with_retry) to retry misses.
    pub async fn fetch_cached<T: DeserializeOwned>(
        &self,
        key: &str,
        endpoint: &str,
        ttl: Option<Duration>,
    ) -> ApiResult<T> {
        self.cached(key, endpoint, ttl, move || self.send_value(endpoint, RequestConfig::get()))
            .await
    }

    async fn cached<T, F, Fut>(&self, key: &str, endpoint: &str, ttl: Option<Duration>, fetch: F) -> ApiResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<Value>>,
    {
        let cache = self.cache();

        if let Some(value) = cache.get(key) {
            match serde_json::from_value::<T>(value) {
                Ok(data) => {
                    trace!(key, "served from cache");
                    return ApiResult::success(data);
                }
                Err(e) => {
                    debug!(key, error = %e, "cached value has a different shape, refetching");
                    cache.delete(key);
                }
            }
        }

        match fetch().await {
            ApiResult::Success { data: value } => match serde_json::from_value::<T>(value.clone()) {
                Ok(data) => {
                    cache.set(key, value, ttl.unwrap_or_else(|| cache.default_ttl()));
                    ApiResult::success(data)
                }
                Err(e) => {
                    let error = ApiError::decode(e.to_string());
                    warn!(endpoint, error = %error, "response did not match the expected shape");
                    ApiResult::failure(error)
                }
            },
            ApiResult::Failure { error } => ApiResult::failure(error),
        }
    }
}

fn finish<T: DeserializeOwned>(endpoint: &str, result: ApiResult<Value>) -> ApiResult<T> {
    let received = result.is_success();
    let decoded = decode(result);
    if received {
        if let Some(error) = decoded.error() {
            warn!(endpoint, error = %error, "response did not match the expected shape");
        }
    }
    decoded
}
