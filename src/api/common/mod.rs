//
//  campus-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Shared types that cross every API boundary in the crate.
//!
//! # Overview
//!
//! - [`ApiResult`] - the uniform success/failure wrapper returned by every client operation
//! - [`ApiError`] - the failure taxonomy carried by [`ApiResult::Failure`]
//! - Pagination types (re-exported from the [`pagination`] submodule)
//!
//! # Example
//!
//! ```rust
//! use campus_client::api::{ApiError, ApiResult};
//!
//! fn describe(result: &ApiResult<u32>) -> String {
//!     match result {
//!         ApiResult::Success { data } => format!("got {data}"),
//!         ApiResult::Failure { error } => format!("failed: {error}"),
//!     }
//! }
//!
//! assert_eq!(describe(&ApiResult::success(7)), "got 7");
//! assert_eq!(
//!     describe(&ApiResult::failure(ApiError::network("connection refused"))),
//!     "failed: connection refused"
//! );
//! ```

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Failure taxonomy for API operations.
///
/// The `Display` output of each variant is the message stored in a failed
/// [`ApiResult`]; it is never empty.
///
/// # Variants
///
/// | Variant | Cause |
/// |---------|-------|
/// | `Network` | No response received (DNS, refused connection, timeout) |
/// | `Http` | Non-2xx status received |
/// | `Decode` | 2xx received but the body was not usable data |
/// | `InvalidRequest` | The request could not be built |
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A network-level error occurred before any response was received.
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-success status.
    ///
    /// `message` is taken from the JSON error body when present, otherwise
    /// it reads `HTTP <status>: <reason>`.
    #[error("{message}")]
    Http {
        /// The HTTP status code
        status: u16,
        /// Human readable message
        message: String,
    },

    /// A successful response whose body could not be decoded.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The request could not be constructed (bad header, unserializable body).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Creates a network error, substituting a generic message for an empty one.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(non_empty(message.into(), "Network request failed"))
    }

    /// Creates an HTTP error, substituting the status line for an empty message.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            format!("HTTP {status}")
        } else {
            message
        };
        Self::Http { status, message }
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(non_empty(message.into(), "unreadable body"))
    }

    /// Creates an invalid-request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(non_empty(message.into(), "malformed request"))
    }

    /// Returns the HTTP status for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for 401 and 403 responses.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns `true` for 404 responses.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

fn non_empty(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// The uniform result of every client operation.
///
/// Exactly one branch exists by construction: a `Success` carries data and
/// no error, a `Failure` carries an error and no data. Serializes to the
/// wire shape `{"success": true, "data": ...}` or
/// `{"success": false, "error": "<message>"}`.
///
/// # Example
///
/// ```rust
/// use campus_client::api::ApiResult;
///
/// let result = ApiResult::success(vec![1, 2, 3]);
/// let json = serde_json::to_value(&result).unwrap();
/// assert_eq!(json["success"], true);
/// assert_eq!(json["data"][0], 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    /// The call produced usable data.
    Success {
        /// The decoded payload
        data: T,
    },
    /// The call failed.
    Failure {
        /// Why it failed
        error: ApiError,
    },
}

impl<T> ApiResult<T> {
    /// Wraps data in a `Success`.
    pub fn success(data: T) -> Self {
        Self::Success { data }
    }

    /// Wraps an error in a `Failure`.
    pub fn failure(error: ApiError) -> Self {
        Self::Failure { error }
    }

    /// Returns `true` for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns `true` for `Failure`.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Borrows the data of a `Success`.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// Borrows the error of a `Failure`.
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// Consumes the result, returning the data of a `Success`.
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// Converts into a standard `Result` so callers can use `?`.
    ///
    /// # Errors
    ///
    /// Returns the carried [`ApiError`] for a `Failure`.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            Self::Success { data } => Ok(data),
            Self::Failure { error } => Err(error),
        }
    }

    /// Maps the data of a `Success`, leaving a `Failure` untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResult<U> {
        match self {
            Self::Success { data } => ApiResult::Success { data: f(data) },
            Self::Failure { error } => ApiResult::Failure { error },
        }
    }

    /// Chains a fallible step onto a `Success`.
    pub fn and_then<U, F: FnOnce(T) -> ApiResult<U>>(self, f: F) -> ApiResult<U> {
        match self {
            Self::Success { data } => f(data),
            Self::Failure { error } => ApiResult::Failure { error },
        }
    }
}

impl<T> From<Result<T, ApiError>> for ApiResult<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self::Success { data },
            Err(error) => Self::Failure { error },
        }
    }
}

impl<T: Serialize> Serialize for ApiResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ApiResult", 2)?;
        match self {
            Self::Success { data } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Self::Failure { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", &error.to_string())?;
            }
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_serializes_without_error_field() {
        let value = serde_json::to_value(ApiResult::success(json!({"id": "x1"}))).unwrap();
        assert_eq!(value, json!({"success": true, "data": {"id": "x1"}}));
    }

    #[test]
    fn test_failure_serializes_message_without_data() {
        let result: ApiResult<u8> = ApiResult::failure(ApiError::http(404, "Challenge not found"));
        let value = serde_json::to_value(result).unwrap();
        assert_eq!(value, json!({"success": false, "error": "Challenge not found"}));
    }

    #[test]
    fn test_error_messages_are_never_empty() {
        assert_eq!(ApiError::network("").to_string(), "Network request failed");
        assert_eq!(ApiError::http(502, "  ").to_string(), "HTTP 502");
        assert!(!ApiError::decode("").to_string().is_empty());
    }

    #[test]
    fn test_status_helpers() {
        assert!(ApiError::http(401, "nope").is_auth_error());
        assert!(ApiError::http(404, "gone").is_not_found());
        assert_eq!(ApiError::network("down").status(), None);
    }

    #[test]
    fn test_into_result_and_map() {
        let result = ApiResult::success(2).map(|n| n * 21);
        assert_eq!(result.into_result(), Ok(42));

        let failed: ApiResult<u8> = ApiResult::failure(ApiError::network("refused"));
        assert!(failed.data().is_none());
        assert_eq!(failed.into_result(), Err(ApiError::Network("refused".to_string())));
    }
}
