//
//  campus-client
//  tests/support/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use campus_client::api::{
    ApiClient, ApiError, ClientContext, InterceptorChain, RawResponse, RequestConfig, RetryPolicy, Transport,
};

/// A request as the transport saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub url: String,
    pub config: RequestConfig,
}

/// Transport that replays queued outcomes and records every request.
///
/// Once the queue is empty every call fails with a network error.
#[derive(Default)]
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<RawResponse, ApiError>>>,
    requests: Mutex<Vec<Recorded>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, outcome: Result<RawResponse, ApiError>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.push(Ok(RawResponse::json(status, &body)));
    }

    pub fn push_network_error(&self, message: &str) {
        self.push(Err(ApiError::network(message)));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("no request was sent")
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, url: &str, request: &RequestConfig) -> Result<RawResponse, ApiError> {
        self.requests.lock().unwrap().push(Recorded {
            url: url.to_string(),
            config: request.clone(),
        });
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::network("no scripted response")))
    }
}

pub const BASE_URL: &str = "http://campus.test/api/v1";

/// Retry policy with short delays; tests run on a paused clock anyway.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(10))
}

pub fn client(transport: &Arc<ScriptedTransport>) -> ApiClient {
    client_with(transport, InterceptorChain::new())
}

pub fn client_with(transport: &Arc<ScriptedTransport>, interceptors: InterceptorChain) -> ApiClient {
    let context = ClientContext::new(BASE_URL).with_interceptors(interceptors);
    ApiClient::with_transport(transport.clone(), context).with_retry_policy(fast_retry())
}

pub fn user_summary(id: &str) -> Value {
    serde_json::json!({"id": id, "username": format!("user-{id}")})
}
