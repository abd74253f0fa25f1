//
//  campus-client
//  tests/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Request pipeline tests against a scripted transport.

mod support;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use campus_client::api::{
    with_retry, ApiError, ApiResult, CacheBustInterceptor, FilePart, InterceptorChain, RawResponse, RequestConfig,
    RetryPolicy, CACHE_BUST_PARAM,
};

use support::{client, client_with, ScriptedTransport, BASE_URL};

#[tokio::test(start_paused = true)]
async fn test_retry_around_cached_fetch_recovers_after_two_failures() {
    let transport = ScriptedTransport::new();
    transport.push_network_error("connection reset");
    transport.push_network_error("connection reset");
    transport.push_json(200, json!({"id": "x1"}));

    let failures = Arc::new(AtomicU32::new(0));
    let spy = failures.clone();
    let chain = InterceptorChain::new().with_response_fn(move |result: ApiResult<Value>| {
        if result.is_failure() {
            spy.fetch_add(1, Ordering::SeqCst);
        }
        result
    });
    let client = client_with(&transport, chain);
    let api = &client;

    let fetch = with_retry(
        move || api.fetch_cached::<Value>("challenge:x1", "/challenges/x1", None),
        RetryPolicy::new(3, Duration::from_millis(1000)),
    );
    let result = fetch.call().await;

    assert_eq!(result, ApiResult::success(json!({"id": "x1"})));
    assert_eq!(failures.load(Ordering::SeqCst), 2);
    assert_eq!(transport.calls(), 3);
    assert!(client.cache().contains_raw("challenge:x1"));

    // Served from the cache: no fourth request.
    let again = fetch.call().await;
    assert_eq!(again, ApiResult::success(json!({"id": "x1"})));
    assert_eq!(transport.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_retries_return_last_failure() {
    let transport = ScriptedTransport::new();
    transport.push_network_error("first");
    transport.push_network_error("second");
    transport.push_network_error("third");
    let client = client(&transport);

    let result: ApiResult<Value> = client.get("/challenges").await;

    assert_eq!(result.error(), Some(&ApiError::network("third")));
    assert_eq!(transport.calls(), 3);
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let transport = ScriptedTransport::new();
    transport.push_json(500, json!({"message": "database down"}));
    transport.push_json(200, json!({"id": "u1"}));
    let client = client(&transport).with_retry_policy(RetryPolicy::none());

    let first: ApiResult<Value> = client.get_cached("user:u1", "/users/u1", Vec::new(), None).await;
    assert_eq!(first.error().map(ToString::to_string).as_deref(), Some("database down"));
    assert!(!client.cache().contains_raw("user:u1"));

    let second: ApiResult<Value> = client.get_cached("user:u1", "/users/u1", Vec::new(), None).await;
    assert!(second.is_success());
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_shape_mismatch_is_a_decode_failure_and_not_cached() {
    #[derive(Debug, serde::Deserialize)]
    struct Named {
        #[allow(dead_code)]
        name: String,
    }

    let transport = ScriptedTransport::new();
    transport.push_json(200, json!({"id": 7}));
    let client = client(&transport);

    let result: ApiResult<Named> = client.get_cached("thing", "/things/7", Vec::new(), None).await;

    assert!(matches!(result.error(), Some(ApiError::Decode(_))));
    assert!(!client.cache().contains_raw("thing"));
}

#[tokio::test]
async fn test_auth_header_follows_token_lifecycle() {
    let transport = ScriptedTransport::new();
    let client = client(&transport).with_retry_policy(RetryPolicy::none());

    let _: ApiResult<Value> = client.send("/health", RequestConfig::get()).await;
    assert_eq!(transport.last().config.header("Authorization"), None);

    client.set_auth_token("abc");
    let _: ApiResult<Value> = client.send("/health", RequestConfig::get()).await;
    assert_eq!(transport.last().config.header("authorization"), Some("Bearer abc"));

    client.remove_auth_token();
    let _: ApiResult<Value> = client.send("/health", RequestConfig::get()).await;
    assert_eq!(transport.last().config.header("Authorization"), None);
}

#[tokio::test]
async fn test_content_type_is_json_except_for_uploads() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, json!({}));
    transport.push_json(201, json!({}));
    let client = client(&transport);

    let _: ApiResult<Value> = client.post("/forum/posts", &json!({"title": "t"})).await;
    assert_eq!(transport.last().config.header("Content-Type"), Some("application/json"));

    let file = FilePart::new("main.rs", b"fn main() {}".to_vec()).with_mime("text/x-rust");
    let _: ApiResult<Value> = client.upload("/projects/p1/files", vec![file]).await;
    let upload = transport.last().config;
    assert!(upload.is_multipart());
    assert_eq!(upload.header("Content-Type"), None);
}

#[tokio::test(start_paused = true)]
async fn test_interceptors_run_on_every_attempt() {
    let transport = ScriptedTransport::new();
    transport.push_network_error("timeout");
    transport.push_network_error("timeout");
    transport.push_json(200, json!([]));

    let seen = Arc::new(AtomicU32::new(0));
    let counter = seen.clone();
    let chain = InterceptorChain::new()
        .with_request_fn(move |config: RequestConfig| {
            counter.fetch_add(1, Ordering::SeqCst);
            config
        })
        .with_request(CacheBustInterceptor);
    let client = client_with(&transport, chain);

    let result: ApiResult<Vec<Value>> = client.get("/challenges").await;

    assert!(result.is_success());
    assert_eq!(seen.load(Ordering::SeqCst), 3);
    for request in transport.requests() {
        let busts = request.config.query.iter().filter(|(k, _)| k == CACHE_BUST_PARAM).count();
        assert_eq!(busts, 1);
    }
}

#[tokio::test]
async fn test_mutations_are_attempted_once() {
    let transport = ScriptedTransport::new();
    transport.push_json(503, json!({}));
    let client = client(&transport);

    let result: ApiResult<Value> = client.post("/challenges/x1/submissions", &json!({"code": ""})).await;

    assert_eq!(result.error().and_then(ApiError::status), Some(503));
    assert_eq!(
        result.error().map(ToString::to_string).as_deref(),
        Some("HTTP 503: Service Unavailable")
    );
    assert_eq!(transport.calls(), 1);

    transport.push_json(502, json!({}));
    let replaced: ApiResult<Value> = client.put("/projects/p1", &json!({"title": "t"})).await;
    assert!(replaced.is_failure());
    assert_eq!(transport.last().config.method, reqwest::Method::PUT);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_endpoints_resolve_against_base_url() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, json!({}));
    let client = client(&transport);

    let _: ApiResult<Value> = client.get_with_query("/forum/posts", vec![("page".into(), "2".into())]).await;

    let request = transport.last();
    assert_eq!(request.url, format!("{BASE_URL}/forum/posts"));
    assert_eq!(request.config.query, vec![("page".to_string(), "2".to_string())]);
}

#[tokio::test]
async fn test_sessions_do_not_share_token_or_cache() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, json!({"id": "me"}));
    let alice = client(&transport);
    let bob = client(&transport);

    alice.set_auth_token("alice-token");
    let _: ApiResult<Value> = alice.get_cached("user:me", "/users/me", Vec::new(), None).await;

    assert!(!bob.is_authenticated());
    assert!(!bob.cache().contains_raw("user:me"));
    assert!(alice.cache().contains_raw("user:me"));
}

#[tokio::test]
async fn test_empty_success_body_decodes_into_unit() {
    let transport = ScriptedTransport::new();
    transport.push(Ok(RawResponse::new(204, None, "")));
    let client = client(&transport);

    let result: ApiResult<()> = client.delete("/forum/posts/p1").await;
    assert_eq!(result, ApiResult::success(()));
}
