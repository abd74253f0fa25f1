//
//  campus-client
//  api/services/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Showcase projects.
//!
//! # Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/projects` | [`ProjectService::list`] |
//! | GET | `/projects/{id}` | [`ProjectService::get`] |
//! | POST | `/projects` | [`ProjectService::create`] |
//! | PATCH | `/projects/{id}` | [`ProjectService::update`] |
//! | DELETE | `/projects/{id}` | [`ProjectService::delete`] |
//! | POST | `/projects/{id}/files` | [`ProjectService::upload_file`] (multipart) |

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{list_key, segment};
use super::users::UserSummary;
use crate::api::client::ApiClient;
use crate::api::common::{ApiResult, PageQuery, PaginatedResult};
use crate::api::request::FilePart;

/// Project lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Draft,
    InProgress,
    Completed,
    Archived,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Archived => "archived",
        };
        f.write_str(s)
    }
}

/// A file attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// A showcase project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub owner: UserSummary,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub repository_url: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub files: Vec<UploadedFile>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A project to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
}

/// A partial project update; unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
}

/// Project operations.
#[derive(Debug, Clone, Copy)]
pub struct ProjectService<'a> {
    client: &'a ApiClient,
}

impl<'a> ProjectService<'a> {
    /// Prefix shared by every cached page of projects.
    pub const LIST_PREFIX: &'static str = "projects:list";

    /// Creates the facade.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Cache key of one page of projects.
    pub fn list_key(page: &PageQuery) -> String {
        list_key(Self::LIST_PREFIX, page, &[])
    }

    /// Cache key of one project.
    pub fn project_key(id: &str) -> String {
        format!("project:{}", segment(id))
    }

    /// Lists projects, newest first.
    pub async fn list(&self, page: &PageQuery) -> ApiResult<PaginatedResult<Project>> {
        self.client
            .get_cached(&Self::list_key(page), "/projects", page.to_query(), None)
            .await
            .map(PaginatedResult::normalized)
    }

    /// Fetches one project.
    pub async fn get(&self, id: &str) -> ApiResult<Project> {
        self.client
            .get_cached(&Self::project_key(id), &project_path(id), Vec::new(), None)
            .await
    }

    /// Creates a project.
    pub async fn create(&self, project: &NewProject) -> ApiResult<Project> {
        let result = self.client.post("/projects", project).await;
        if result.is_success() {
            self.client.cache().delete_prefix(Self::LIST_PREFIX);
        }
        result
    }

    /// Changes the fields set in `update`.
    pub async fn update(&self, id: &str, update: &ProjectUpdate) -> ApiResult<Project> {
        let result = self.client.patch(&project_path(id), update).await;
        if result.is_success() {
            self.invalidate(id);
        }
        result
    }

    /// Deletes a project. Any response body is accepted.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let result = self.client.delete::<Value>(&project_path(id)).await.map(drop);
        if result.is_success() {
            self.invalidate(id);
        }
        result
    }

    /// Attaches a file to a project as multipart form data.
    pub async fn upload_file(&self, id: &str, file: FilePart) -> ApiResult<UploadedFile> {
        let result = self
            .client
            .upload(&format!("{}/files", project_path(id)), vec![file])
            .await;
        if result.is_success() {
            self.client.cache().delete(&Self::project_key(id));
        }
        result
    }

    fn invalidate(&self, id: &str) {
        let cache = self.client.cache();
        cache.delete(&Self::project_key(id));
        cache.delete_prefix(Self::LIST_PREFIX);
    }
}

fn project_path(id: &str) -> String {
    format!("/projects/{}", segment(id))
}
