//
//  campus-client
//  api/normalize.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Response normalization.
//!
//! Every "what counts as success" decision lives here, so service facades
//! never look at status codes. Normalization happens in two steps:
//!
//! 1. [`normalize`] turns a transport outcome into an `ApiResult<Value>`
//! 2. [`decode`] turns that into the caller's type
//!
//! Response interceptors run between the two.
//!
//! | Outcome | Result |
//! |---------|--------|
//! | no response | `Failure(Network)` |
//! | non-2xx | `Failure(Http)`, message from body or status line |
//! | 2xx, blank body, no JSON content type | `Success(null)` |
//! | 2xx, unparsable JSON | `Failure(Decode)` |
//! | 2xx, JSON of the wrong shape | `Failure(Decode)` |

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::common::{ApiError, ApiResult};
use super::request::ResponseKind;
use super::transport::RawResponse;

/// Converts a transport outcome into a JSON-level result.
pub fn normalize(outcome: Result<RawResponse, ApiError>, kind: ResponseKind) -> ApiResult<Value> {
    let response = match outcome {
        Ok(response) => response,
        Err(error) => return ApiResult::failure(error),
    };

    if !response.is_success() {
        return ApiResult::failure(http_error(&response));
    }

    if response.status == 204 || (response.is_blank() && !response.is_json()) {
        return ApiResult::success(Value::Null);
    }

    match kind {
        ResponseKind::Text => ApiResult::success(Value::String(response.text())),
        ResponseKind::Json => match serde_json::from_slice(&response.body) {
            Ok(value) => ApiResult::success(value),
            Err(e) => ApiResult::failure(ApiError::decode(e.to_string())),
        },
    }
}

/// Decodes a JSON-level result into `T`.
///
/// A `null` payload (empty body) decodes into `()`, `Option<_>` or `Value`;
/// any other type reports a decode failure.
pub fn decode<T: DeserializeOwned>(result: ApiResult<Value>) -> ApiResult<T> {
    result.and_then(|value| {
        ApiResult::from(serde_json::from_value::<T>(value).map_err(|e| ApiError::decode(e.to_string())))
    })
}

/// Builds the error for a non-2xx response.
///
/// Looks for a message in the JSON body, in this order:
///
/// ```json
/// {"message": "..."}
/// {"error": "..."}
/// {"error": {"message": "..."}}
/// ```
///
/// and falls back to `HTTP <status>: <reason>`, or `HTTP <status>` when
/// the status has no reason phrase.
pub fn http_error(response: &RawResponse) -> ApiError {
    let message = serde_json::from_slice::<Value>(&response.body)
        .ok()
        .and_then(|json| error_message(&json));

    match message {
        Some(message) => ApiError::http(response.status, message),
        None if response.status_text.is_empty() => ApiError::http(response.status, format!("HTTP {}", response.status)),
        None => ApiError::http(
            response.status,
            format!("HTTP {}: {}", response.status, response.status_text),
        ),
    }
}

fn error_message(json: &Value) -> Option<String> {
    let candidates = [
        json.get("message"),
        json.get("error"),
        json.get("error").and_then(|e| e.get("message")),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
}
