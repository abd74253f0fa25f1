//
//  campus-client
//  api/services/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Session management.
//!
//! Logging in or registering stores the returned bearer token on the
//! client's [`ClientContext`](crate::api::ClientContext); logging out
//! removes it. Both directions clear the response cache so one user's
//! data is never served to another.

use std::fmt;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::users::User;
use crate::api::client::ApiClient;
use crate::api::common::ApiResult;
use crate::api::request::RequestConfig;

/// Login credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Credentials for `email`.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

/// A new account.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"********")
            .field("display_name", &self.display_name)
            .finish()
    }
}

/// An authenticated session as returned by login and register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub user: User,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Session operations.
#[derive(Debug, Clone, Copy)]
pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    /// Creates the facade.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchanges credentials for a session and starts using its token.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthSession> {
        let result = self.client.post("/auth/login", credentials).await;
        self.adopt(&result);
        result
    }

    /// Creates an account and starts using its token.
    pub async fn register(&self, registration: &Registration) -> ApiResult<AuthSession> {
        let result = self.client.post("/auth/register", registration).await;
        self.adopt(&result);
        result
    }

    /// Ends the session on the server.
    ///
    /// The local token and cache are cleared whatever the server answers.
    pub async fn logout(&self) -> ApiResult<()> {
        let result = self
            .client
            .send::<Value>("/auth/logout", RequestConfig::new(Method::POST))
            .await
            .map(drop);
        if let Some(error) = result.error() {
            warn!(error = %error, "server logout failed, clearing local session anyway");
        }
        self.client.remove_auth_token();
        self.client.cache().clear();
        result
    }

    fn adopt(&self, result: &ApiResult<AuthSession>) {
        if let Some(session) = result.data() {
            debug!(user = %session.user.username, "session started");
            self.client.cache().clear();
            self.client.set_auth_token(session.token.clone());
        }
    }
}
