//
//  campus-client
//  api/services/forum.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Community forum.
//!
//! # Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/forum/posts` | [`ForumService::list_posts`] |
//! | GET | `/forum/posts/{id}` | [`ForumService::get_post`] |
//! | POST | `/forum/posts` | [`ForumService::create_post`] |
//! | GET | `/forum/posts/{id}/replies` | [`ForumService::replies`] |
//! | POST | `/forum/posts/{id}/replies` | [`ForumService::submit_reply`] |
//! | POST | `/forum/posts/{id}/like` | [`ForumService::like_post`] |
//! | DELETE | `/forum/posts/{id}` | [`ForumService::delete_post`] |

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{list_key, segment};
use super::users::UserSummary;
use crate::api::client::ApiClient;
use crate::api::common::{ApiResult, PageQuery, PaginatedResult};
use crate::api::request::RequestConfig;

/// A forum thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub author: UserSummary,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub reply_count: u32,
    /// Whether the signed-in user liked it.
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A reply in a thread. Nested replies carry their parent's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub author: UserSummary,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A new thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A new reply. `post_id` selects the thread and is not part of the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReply {
    #[serde(skip_serializing)]
    pub post_id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl NewReply {
    /// A top-level reply to `post_id`.
    pub fn new(post_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
            content: content.into(),
            parent_id: None,
        }
    }

    /// Nests the reply under another reply.
    pub fn in_reply_to(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

/// Like state after toggling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LikeStatus {
    pub liked: bool,
    pub likes: u32,
}

/// Filters for [`ForumService::list_posts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub page: PageQuery,
    pub category: Option<String>,
    pub author: Option<String>,
    pub search: Option<String>,
}

impl PostFilter {
    /// Query parameters, page first.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = self.page.to_query();
        let optional = [
            ("category", &self.category),
            ("author", &self.author),
            ("search", &self.search),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                query.push((name.to_string(), value.clone()));
            }
        }
        query
    }

    /// Cache key of the page this filter selects.
    pub fn cache_key(&self) -> String {
        let query = self.to_query();
        list_key(ForumService::LIST_PREFIX, &self.page, &query[2..])
    }
}

/// Forum operations.
#[derive(Debug, Clone, Copy)]
pub struct ForumService<'a> {
    client: &'a ApiClient,
}

impl<'a> ForumService<'a> {
    /// Prefix shared by every cached page of posts.
    pub const LIST_PREFIX: &'static str = "forum:posts";

    /// Creates the facade.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Cache key of one thread.
    pub fn post_key(id: &str) -> String {
        format!("forum:post:{}", segment(id))
    }

    /// Cache key of a thread's replies.
    pub fn replies_key(post_id: &str) -> String {
        format!("forum:replies:{}", segment(post_id))
    }

    /// Lists threads matching `filter`.
    pub async fn list_posts(&self, filter: &PostFilter) -> ApiResult<PaginatedResult<ForumPost>> {
        self.client
            .get_cached(&filter.cache_key(), "/forum/posts", filter.to_query(), None)
            .await
            .map(PaginatedResult::normalized)
    }

    /// Fetches one thread.
    pub async fn get_post(&self, id: &str) -> ApiResult<ForumPost> {
        self.client
            .get_cached(&Self::post_key(id), &post_path(id), Vec::new(), None)
            .await
    }

    /// Opens a thread.
    pub async fn create_post(&self, post: &NewPost) -> ApiResult<ForumPost> {
        let result = self.client.post("/forum/posts", post).await;
        if result.is_success() {
            self.client.cache().delete_prefix(Self::LIST_PREFIX);
        }
        result
    }

    /// Replies to a thread, oldest first.
    pub async fn replies(&self, post_id: &str) -> ApiResult<Vec<Reply>> {
        self.client
            .get_cached(
                &Self::replies_key(post_id),
                &format!("{}/replies", post_path(post_id)),
                Vec::new(),
                None,
            )
            .await
    }

    /// Posts a reply and drops the thread's cached replies and reply counts.
    pub async fn submit_reply(&self, reply: &NewReply) -> ApiResult<Reply> {
        let result = self
            .client
            .post(&format!("{}/replies", post_path(&reply.post_id)), reply)
            .await;
        if result.is_success() {
            let cache = self.client.cache();
            cache.delete(&Self::replies_key(&reply.post_id));
            cache.delete(&Self::post_key(&reply.post_id));
            cache.delete_prefix(Self::LIST_PREFIX);
        }
        result
    }

    /// Toggles the signed-in user's like on a thread.
    pub async fn like_post(&self, id: &str) -> ApiResult<LikeStatus> {
        let result = self
            .client
            .send(&format!("{}/like", post_path(id)), RequestConfig::new(Method::POST))
            .await;
        if result.is_success() {
            let cache = self.client.cache();
            cache.delete(&Self::post_key(id));
            cache.delete_prefix(Self::LIST_PREFIX);
        }
        result
    }

    /// Deletes a thread and its replies.
    pub async fn delete_post(&self, id: &str) -> ApiResult<()> {
        let result = self.client.delete::<Value>(&post_path(id)).await.map(drop);
        if result.is_success() {
            let cache = self.client.cache();
            cache.delete(&Self::post_key(id));
            cache.delete(&Self::replies_key(id));
            cache.delete_prefix(Self::LIST_PREFIX);
        }
        result
    }
}

fn post_path(id: &str) -> String {
    format!("/forum/posts/{}", segment(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_body_omits_post_id() {
        let reply = NewReply::new("p1", "Try a HashMap").in_reply_to("r7");
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            serde_json::json!({"content": "Try a HashMap", "parentId": "r7"})
        );
    }

    #[test]
    fn test_post_filter_keys() {
        let filter = PostFilter {
            category: Some("help".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.cache_key(), "forum:posts:p1l20:category=help");
        assert_eq!(filter.to_query().len(), 3);
    }

    #[test]
    fn test_filter_values_are_encoded_in_keys() {
        let forged = PostFilter {
            category: Some("help:author=bob".to_string()),
            ..Default::default()
        };
        let real = PostFilter {
            category: Some("help".to_string()),
            author: Some("bob".to_string()),
            ..Default::default()
        };
        assert_ne!(forged.cache_key(), real.cache_key());
    }

    #[test]
    fn test_post_key_is_outside_list_prefix() {
        assert!(!ForumService::post_key("1").starts_with(ForumService::LIST_PREFIX));
    }

    #[test]
    fn test_new_post_skips_empty_tags() {
        let post = NewPost {
            title: "Lifetimes".to_string(),
            content: "Why does this not compile?".to_string(),
            category: None,
            tags: Vec::new(),
        };
        let body = serde_json::to_value(&post).unwrap();
        assert!(body.get("tags").is_none());
        assert!(body.get("category").is_none());
    }
}
