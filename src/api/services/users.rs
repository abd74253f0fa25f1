//
//  campus-client
//  api/services/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! User profiles and dashboard statistics.
//!
//! # Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/users/{id}` | [`UserService::get`] |
//! | GET | `/users/me` | [`UserService::current`] |
//! | PATCH | `/users/{id}` | [`UserService::update_profile`] |
//! | GET | `/users/{id}/stats` | [`UserService::stats`] |

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::segment;
use crate::api::client::ApiClient;
use crate::api::common::ApiResult;

/// Dashboard statistics change often; keep them for a minute.
const STATS_TTL: Duration = Duration::from_secs(60);

/// A full user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: String,
    /// Handle shown in the forum.
    pub username: String,
    /// Contact address.
    #[serde(default)]
    pub email: Option<String>,
    /// Full display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Short biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// `student`, `mentor` or `admin`.
    #[serde(default)]
    pub role: Option<String>,
    /// When the account was created.
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

/// The author or owner reference embedded in posts and projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Unique identifier.
    pub id: String,
    /// Handle shown in the forum.
    pub username: String,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Fields a user may change on their own profile. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// New biography.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// New avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Learning progress shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    /// Challenges with a passing submission.
    pub challenges_completed: u32,
    /// Sum of points earned.
    pub total_points: u64,
    /// Consecutive active days, current.
    pub current_streak: u32,
    /// Consecutive active days, best ever.
    pub longest_streak: u32,
    /// Forum posts written.
    pub forum_posts: u32,
    /// Projects published.
    pub projects: u32,
    /// Global leaderboard position, if ranked.
    pub rank: Option<u32>,
}

/// User operations.
#[derive(Debug, Clone, Copy)]
pub struct UserService<'a> {
    client: &'a ApiClient,
}

impl<'a> UserService<'a> {
    /// Creates the facade.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Cache key of a user profile.
    pub fn user_key(id: &str) -> String {
        format!("user:{}", segment(id))
    }

    /// Cache key of the signed-in user's profile.
    pub const CURRENT_USER_KEY: &'static str = "user:me";

    /// Cache key of a user's statistics.
    pub fn stats_key(id: &str) -> String {
        format!("user:{}:stats", segment(id))
    }

    /// Fetches a profile.
    pub async fn get(&self, id: &str) -> ApiResult<User> {
        self.client
            .get_cached(&Self::user_key(id), &format!("/users/{}", segment(id)), Vec::new(), None)
            .await
    }

    /// Fetches the signed-in user's profile.
    pub async fn current(&self) -> ApiResult<User> {
        self.client
            .get_cached(Self::CURRENT_USER_KEY, "/users/me", Vec::new(), None)
            .await
    }

    /// Updates a profile and drops its cached copies.
    pub async fn update_profile(&self, id: &str, update: &ProfileUpdate) -> ApiResult<User> {
        let result = self
            .client
            .patch(&format!("/users/{}", segment(id)), update)
            .await;
        if result.is_success() {
            let cache = self.client.cache();
            cache.delete(&Self::user_key(id));
            cache.delete(Self::CURRENT_USER_KEY);
        }
        result
    }

    /// Fetches dashboard statistics.
    pub async fn stats(&self, id: &str) -> ApiResult<UserStats> {
        self.client
            .get_cached(
                &Self::stats_key(id),
                &format!("/users/{}/stats", segment(id)),
                Vec::new(),
                Some(STATS_TTL),
            )
            .await
    }
}
