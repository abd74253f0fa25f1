//
//  campus-client
//  tests/http_transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The reqwest transport against a local mock server.

use std::sync::Arc;
use std::time::Duration;

use mockito::{Matcher, Server};
use serde_json::{json, Value};

use campus_client::api::services::Challenge;
use campus_client::api::{
    ApiClient, ApiError, ApiResult, ClientContext, FilePart, HttpTransport, RequestConfig, RetryPolicy,
};

fn client_for(server: &Server) -> ApiClient {
    let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
    ApiClient::with_transport(Arc::new(transport), ClientContext::new(format!("{}/api", server.url())))
        .with_retry_policy(RetryPolicy::none())
}

#[tokio::test]
async fn test_json_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/challenges/x1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "x1", "title": "Two Sum", "difficulty": "beginner"}"#)
        .create_async()
        .await;

    let result = client_for(&server).challenges().get("x1").await;

    mock.assert_async().await;
    let challenge: Challenge = result.into_result().unwrap();
    assert_eq!(challenge.title, "Two Sum");
}

#[tokio::test]
async fn test_error_message_from_body() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/challenges/missing")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Challenge not found"}"#)
        .create_async()
        .await;

    let result = client_for(&server).challenges().get("missing").await;

    let error = result.into_result().unwrap_err();
    assert!(error.is_not_found());
    assert_eq!(error.to_string(), "Challenge not found");
}

#[tokio::test]
async fn test_error_without_body_uses_status_line() {
    let mut server = Server::new_async().await;
    server.mock("GET", "/api/health").with_status(500).create_async().await;

    let result: ApiResult<Value> = client_for(&server).get("/health").await;

    assert_eq!(
        result.error(),
        Some(&ApiError::http(500, "HTTP 500: Internal Server Error"))
    );
}

#[tokio::test]
async fn test_no_content_is_null() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/api/forum/posts/p1")
        .with_status(204)
        .create_async()
        .await;

    let result: ApiResult<Value> = client_for(&server).delete("/forum/posts/p1").await;

    assert_eq!(result, ApiResult::success(Value::Null));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let transport = HttpTransport::new(Duration::from_secs(2)).unwrap();
    let client = ApiClient::with_transport(Arc::new(transport), ClientContext::new("http://127.0.0.1:1/api"))
        .with_retry_policy(RetryPolicy::none());

    let result: ApiResult<Value> = client.get("/health").await;

    let error = result.into_result().unwrap_err();
    assert!(matches!(error, ApiError::Network(_)));
    assert!(!error.to_string().is_empty());
}

#[tokio::test]
async fn test_bearer_and_json_headers_are_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/forum/posts")
        .match_header("authorization", "Bearer s3cret")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"title": "Borrowing", "content": "Why?", "category": "rust"})))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": true}"#)
        .create_async()
        .await;
    let client = client_for(&server);
    client.set_auth_token("s3cret");

    let body = json!({"title": "Borrowing", "content": "Why?", "category": "rust"});
    let result: ApiResult<Value> = client.post("/forum/posts", &body).await;

    mock.assert_async().await;
    assert!(result.is_success());
}

#[tokio::test]
async fn test_upload_sends_multipart_boundary() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/projects/p1/files")
        .match_header("content-type", Matcher::Regex("^multipart/form-data; boundary=".to_string()))
        .match_body(Matcher::Regex("demo.txt".to_string()))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "f1", "name": "demo.txt", "url": "https://cdn.campus.test/f1", "size": 5}"#)
        .create_async()
        .await;

    let file = FilePart::new("demo.txt", b"hello".to_vec()).with_mime("text/plain");
    let uploaded = client_for(&server).projects().upload_file("p1", file).await;

    mock.assert_async().await;
    assert_eq!(uploaded.into_result().unwrap().size, 5);
}

#[tokio::test]
async fn test_query_parameters_are_encoded() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/forum/posts")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("limit".into(), "20".into()),
            Matcher::UrlEncoded("search".into(), "lifetimes & traits".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": [], "total": 0, "page": 2, "limit": 20}"#)
        .create_async()
        .await;

    let query = vec![
        ("page".to_string(), "2".to_string()),
        ("limit".to_string(), "20".to_string()),
        ("search".to_string(), "lifetimes & traits".to_string()),
    ];
    let result: ApiResult<Value> = client_for(&server).get_with_query("/forum/posts", query).await;

    mock.assert_async().await;
    assert!(result.is_success());
}

#[tokio::test]
async fn test_text_response_passthrough() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/health")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("ok")
        .create_async()
        .await;

    let result: ApiResult<String> = client_for(&server)
        .send("/health", RequestConfig::get().expect_text())
        .await;

    assert_eq!(result, ApiResult::success("ok".to_string()));
}

#[tokio::test]
async fn test_get_retries_server_errors() {
    let mut server = Server::new_async().await;
    let failing = server
        .mock("GET", "/api/users/me")
        .with_status(503)
        .expect(2)
        .create_async()
        .await;
    let client = client_for(&server).with_retry_policy(RetryPolicy::new(2, Duration::from_millis(10)));

    let result: ApiResult<Value> = client.get("/users/me").await;

    assert_eq!(result.error().and_then(ApiError::status), Some(503));
    failing.assert_async().await;
}
