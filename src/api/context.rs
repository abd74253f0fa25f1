//
//  campus-client
//  api/context.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Per-session client state.
//!
//! A [`ClientContext`] owns everything that used to be process-wide: the
//! base URL, the bearer token, the interceptor chain and the response cache.
//! Each [`ApiClient`](super::ApiClient) holds one, so two sessions (for
//! example two users in one test) never see each other's token or cache.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use super::cache::ResponseCache;
use super::interceptor::InterceptorChain;

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Session state shared by every call made through one client.
#[derive(Debug)]
pub struct ClientContext {
    base_url: String,
    token: RwLock<Option<String>>,
    interceptors: InterceptorChain,
    cache: Arc<ResponseCache>,
}

impl Default for ClientContext {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientContext {
    /// Creates a context for `base_url` with no token, no interceptors and
    /// an empty cache.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
            interceptors: InterceptorChain::new(),
            cache: Arc::new(ResponseCache::new()),
        }
    }

    /// Installs the interceptor chain.
    pub fn with_interceptors(mut self, interceptors: InterceptorChain) -> Self {
        self.interceptors = interceptors;
        self
    }

    /// Uses `cache` instead of a private one.
    pub fn with_cache(mut self, cache: Arc<ResponseCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Starts the session already authenticated.
    pub fn with_auth_token(self, token: impl Into<String>) -> Self {
        self.set_auth_token(token);
        self
    }

    /// The base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves `endpoint` against the base URL.
    ///
    /// Absolute `http(s)://` endpoints are used as-is.
    ///
    /// ```rust
    /// use campus_client::api::ClientContext;
    ///
    /// let context = ClientContext::new("http://localhost:8080/api/v1/");
    /// assert_eq!(context.url_for("/challenges"), "http://localhost:8080/api/v1/challenges");
    /// assert_eq!(context.url_for("users/42"), "http://localhost:8080/api/v1/users/42");
    /// ```
    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Attaches `token` as a bearer credential to every following call.
    pub fn set_auth_token(&self, token: impl Into<String>) {
        debug!("auth token set");
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    /// Stops sending a bearer credential.
    pub fn remove_auth_token(&self) {
        debug!("auth token removed");
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The current bearer token.
    pub fn auth_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a token is set.
    pub fn is_authenticated(&self) -> bool {
        self.auth_token().is_some()
    }

    /// The interceptor chain.
    pub fn interceptors(&self) -> &InterceptorChain {
        &self.interceptors
    }

    /// The response cache.
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_lifecycle() {
        let context = ClientContext::default();
        assert!(!context.is_authenticated());

        context.set_auth_token("abc");
        assert_eq!(context.auth_token().as_deref(), Some("abc"));

        context.set_auth_token("def");
        assert_eq!(context.auth_token().as_deref(), Some("def"));

        context.remove_auth_token();
        assert_eq!(context.auth_token(), None);
    }

    #[test]
    fn test_sessions_are_independent() {
        let alice = ClientContext::default().with_auth_token("alice");
        let bob = ClientContext::default();

        alice.cache().set_default("user:me", serde_json::json!({"name": "alice"}));

        assert_eq!(bob.auth_token(), None);
        assert!(bob.cache().is_empty());
    }

    #[test]
    fn test_absolute_endpoint_untouched() {
        let context = ClientContext::default();
        assert_eq!(context.url_for("https://cdn.example.com/a.png"), "https://cdn.example.com/a.png");
        assert_eq!(context.base_url(), DEFAULT_BASE_URL);
    }
}
