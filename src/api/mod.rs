//
//  campus-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP client used to talk to the Campus backend
//! (`http://localhost:8080/api/v1` by default).
//!
//! ## Architecture
//!
//! Components, from the wire up:
//!
//! - [`transport`]: performs exactly one HTTP exchange ([`Transport`], [`HttpTransport`])
//! - [`normalize`]: turns raw outcomes into an [`ApiResult`]
//! - [`cache`]: time-boxed response cache with lazy eviction
//! - [`retry`]: bounded retry with linear backoff
//! - [`interceptor`]: ordered request/response transforms
//! - [`client`]: [`ApiClient`], which wires the pieces together
//! - [`services`]: typed facades (challenges, forum, projects, users, auth)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use campus_client::api::{
//!     ApiClient, ClientContext, HttpTransport, InterceptorChain, LoggingInterceptor, RetryPolicy,
//! };
//!
//! # fn example() -> anyhow::Result<()> {
//! let interceptors = InterceptorChain::new()
//!     .with_request(LoggingInterceptor)
//!     .with_response(LoggingInterceptor);
//!
//! let context = ClientContext::new("https://campus.example.com/api/v1")
//!     .with_interceptors(interceptors);
//!
//! let client = ApiClient::with_transport(Arc::new(HttpTransport::new(Duration::from_secs(30))?), context)
//!     .with_retry_policy(RetryPolicy::new(5, Duration::from_millis(500)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Business-level failures never surface as `Err` or panics: they are
//! [`ApiResult::Failure`] values carrying an [`ApiError`]:
//!
//! - `Network`: no response was received
//! - `Http`: a non-2xx status, with the best message the body offered
//! - `Decode`: a 2xx body that was not structurally usable
//! - `InvalidRequest`: the request could not be built (bad header, unserializable body)

pub mod cache;
pub mod client;
pub mod common;
pub mod context;
pub mod interceptor;
pub mod normalize;
pub mod request;
pub mod retry;
pub mod services;
pub mod transport;

pub use cache::{CacheEntry, ResponseCache, DEFAULT_TTL};
pub use client::ApiClient;
pub use common::{ApiError, ApiResult, PageQuery, PaginatedResult};
pub use context::{ClientContext, DEFAULT_BASE_URL};
pub use interceptor::{
    CacheBustInterceptor, HeaderInterceptor, InterceptorChain, LoggingInterceptor, RequestFn,
    RequestInterceptor, ResponseFn, ResponseInterceptor, CACHE_BUST_PARAM,
};
pub use request::{FilePart, RequestBody, RequestConfig, ResponseKind};
pub use retry::{with_retry, RetryPolicy, Retrying};
pub use transport::{HttpTransport, RawResponse, Transport};
