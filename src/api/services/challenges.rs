//
//  campus-client
//  api/services/challenges.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Practice challenges.
//!
//! # Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/challenges` | [`ChallengeService::list`] |
//! | GET | `/challenges/{id}` | [`ChallengeService::get`] |
//! | POST | `/challenges/{id}/submissions` | [`ChallengeService::submit`] |
//! | GET | `/challenges/{id}/submissions` | [`ChallengeService::submissions`] |
//! | GET | `/challenges/{id}/leaderboard` | [`ChallengeService::leaderboard`] |

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{list_key, segment};
use crate::api::client::ApiClient;
use crate::api::common::{ApiResult, PageQuery, PaginatedResult};

const LEADERBOARD_TTL: Duration = Duration::from_secs(60);

/// Challenge difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!(
                "unknown difficulty '{other}' (expected beginner, intermediate or advanced)"
            )),
        }
    }
}

/// A practice challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the signed-in user has solved it.
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub starter_code: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Filters for [`ChallengeService::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeFilter {
    pub page: PageQuery,
    pub difficulty: Option<Difficulty>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ChallengeFilter {
    /// Query parameters, page first.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = self.page.to_query();
        if let Some(difficulty) = self.difficulty {
            query.push(("difficulty".to_string(), difficulty.to_string()));
        }
        if let Some(category) = &self.category {
            query.push(("category".to_string(), category.clone()));
        }
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        query
    }

    /// Cache key of the page this filter selects.
    ///
    /// Two filters share a key only if they render the same query.
    pub fn cache_key(&self) -> String {
        let query = self.to_query();
        list_key(ChallengeService::LIST_PREFIX, &self.page, &query[2..])
    }
}

/// A solution attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeSubmission {
    pub code: String,
    pub language: String,
}

/// Outcome of one test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResult {
    pub name: String,
    pub passed: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// The graded result of a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub id: String,
    pub challenge_id: String,
    pub passed: bool,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub test_results: Vec<TestCaseResult>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl SubmissionResult {
    /// `(passed, total)` test case counts.
    pub fn tally(&self) -> (usize, usize) {
        let passed = self.test_results.iter().filter(|t| t.passed).count();
        (passed, self.test_results.len())
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: String,
    pub username: String,
    pub score: u32,
}

/// Challenge operations.
#[derive(Debug, Clone, Copy)]
pub struct ChallengeService<'a> {
    client: &'a ApiClient,
}

impl<'a> ChallengeService<'a> {
    /// Prefix shared by every cached challenge page.
    pub const LIST_PREFIX: &'static str = "challenges:list";

    /// Creates the facade.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Cache key of one challenge.
    pub fn challenge_key(id: &str) -> String {
        format!("challenge:{}", segment(id))
    }

    /// Cache key of the signed-in user's submissions for a challenge.
    pub fn submissions_key(id: &str) -> String {
        format!("challenge:{}:submissions", segment(id))
    }

    /// Cache key of a challenge leaderboard.
    pub fn leaderboard_key(id: &str) -> String {
        format!("challenge:{}:leaderboard", segment(id))
    }

    /// Lists challenges matching `filter`.
    pub async fn list(&self, filter: &ChallengeFilter) -> ApiResult<PaginatedResult<Challenge>> {
        self.client
            .get_cached(&filter.cache_key(), "/challenges", filter.to_query(), None)
            .await
            .map(PaginatedResult::normalized)
    }

    /// Fetches one challenge.
    pub async fn get(&self, id: &str) -> ApiResult<Challenge> {
        self.client
            .get_cached(
                &Self::challenge_key(id),
                &format!("/challenges/{}", segment(id)),
                Vec::new(),
                None,
            )
            .await
    }

    /// Submits a solution for grading.
    ///
    /// On success the challenge, its submission history, its leaderboard and
    /// every cached list page are invalidated, since `completed` and scores
    /// may have changed.
    pub async fn submit(&self, id: &str, submission: &ChallengeSubmission) -> ApiResult<SubmissionResult> {
        let result = self
            .client
            .post(&format!("/challenges/{}/submissions", segment(id)), submission)
            .await;
        if result.is_success() {
            let cache = self.client.cache();
            cache.delete(&Self::challenge_key(id));
            cache.delete(&Self::submissions_key(id));
            cache.delete(&Self::leaderboard_key(id));
            cache.delete_prefix(Self::LIST_PREFIX);
        }
        result
    }

    /// The signed-in user's past submissions for a challenge.
    pub async fn submissions(&self, id: &str) -> ApiResult<Vec<SubmissionResult>> {
        self.client
            .get_cached(
                &Self::submissions_key(id),
                &format!("/challenges/{}/submissions", segment(id)),
                Vec::new(),
                None,
            )
            .await
    }

    /// Top scores for a challenge.
    pub async fn leaderboard(&self, id: &str) -> ApiResult<Vec<LeaderboardEntry>> {
        self.client
            .get_cached(
                &Self::leaderboard_key(id),
                &format!("/challenges/{}/leaderboard", segment(id)),
                Vec::new(),
                Some(LEADERBOARD_TTL),
            )
            .await
    }
}
