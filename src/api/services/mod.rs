//
//  campus-client
//  api/services/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Typed service facades for the Campus API.
//!
//! Each facade borrows an [`ApiClient`] and exposes one method per backend
//! operation, hiding transport, cache and retry wiring.
//!
//! # Module Organization
//!
//! - [`challenges`] - practice challenges, submissions and leaderboards
//! - [`forum`] - community forum posts and replies
//! - [`projects`] - showcase projects and file uploads
//! - [`users`] - profiles and dashboard statistics
//! - [`auth`] - login, registration and logout
//!
//! # Caching rules
//!
//! Only GETs are cached. Mutations go straight to the network and, once
//! they succeed, drop every cache entry whose data they changed.
//!
//! | Key | Holds |
//! |-----|-------|
//! | `challenges:list:<filter>` | a page of challenges |
//! | `challenge:<id>` | one challenge |
//! | `challenge:<id>:submissions` | the user's submissions |
//! | `challenge:<id>:leaderboard` | its leaderboard |
//! | `forum:posts:<filter>` | a page of posts |
//! | `forum:post:<id>` | one post |
//! | `forum:replies:<id>` | replies to a post |
//! | `projects:list:<filter>` | a page of projects |
//! | `project:<id>` | one project |
//! | `user:<id>` / `user:me` | a profile |
//! | `user:<id>:stats` | dashboard statistics |
//!
//! Ids and filter values are percent-encoded before they go into a key, so
//! a caller-supplied `:` or `=` can never make two requests share an entry.

pub mod auth;
pub mod challenges;
pub mod forum;
pub mod projects;
pub mod users;

pub use auth::{AuthService, AuthSession, Credentials, Registration};
pub use challenges::{
    Challenge, ChallengeFilter, ChallengeService, ChallengeSubmission, Difficulty, LeaderboardEntry,
    SubmissionResult, TestCaseResult,
};
pub use forum::{ForumPost, ForumService, LikeStatus, NewPost, NewReply, PostFilter, Reply};
pub use projects::{NewProject, Project, ProjectService, ProjectStatus, ProjectUpdate, UploadedFile};
pub use users::{ProfileUpdate, User, UserService, UserStats, UserSummary};

use super::client::ApiClient;
use super::common::PageQuery;

/// Percent-encodes a path segment so ids cannot escape their position in a URL.
pub(crate) fn segment(id: &str) -> String {
    url::form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Cache key of one list page: `<prefix>:<page>` followed by
/// `:<name>=<value>` for every filter, values encoded with [`segment`].
pub(crate) fn list_key(prefix: &str, page: &PageQuery, filters: &[(String, String)]) -> String {
    let mut key = format!("{prefix}:{}", page.cache_key());
    for (name, value) in filters {
        key.push_str(&format!(":{name}={}", segment(value)));
    }
    key
}

impl ApiClient {
    /// Practice challenge operations.
    pub fn challenges(&self) -> ChallengeService<'_> {
        ChallengeService::new(self)
    }

    /// Forum operations.
    pub fn forum(&self) -> ForumService<'_> {
        ForumService::new(self)
    }

    /// Project operations.
    pub fn projects(&self) -> ProjectService<'_> {
        ProjectService::new(self)
    }

    /// User operations.
    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    /// Session operations.
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_escapes_separators() {
        assert_eq!(segment("x1"), "x1");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
        assert_eq!(segment("u1:stats"), "u1%3Astats");
    }

    #[test]
    fn test_list_key_encodes_filter_values() {
        let page = PageQuery::default();
        let nested = list_key("forum:posts", &page, &[("category".to_string(), "help:author=bob".to_string())]);
        let split = list_key(
            "forum:posts",
            &page,
            &[
                ("category".to_string(), "help".to_string()),
                ("author".to_string(), "bob".to_string()),
            ],
        );
        assert_eq!(nested, "forum:posts:p1l20:category=help%3Aauthor%3Dbob");
        assert_eq!(split, "forum:posts:p1l20:category=help:author=bob");
    }
}
