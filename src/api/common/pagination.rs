//
//  campus-client
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Pagination Types for Campus API Responses
//!
//! List endpoints (`/challenges`, `/forum/posts`, `/projects`) page their
//! results by 1-indexed page number and page size.
//!
//! # Overview
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`PaginatedResult`] | One page of results plus navigation flags |
//! | [`PageQuery`] | The `page`/`limit` query parameters of a list request |
//!
//! # Example
//!
//! ```rust
//! use campus_client::api::PaginatedResult;
//!
//! let page = PaginatedResult::new(vec!["a", "b"], 45, 3, 20);
//! assert!(!page.has_next);
//! assert!(page.has_prev);
//! assert_eq!(page.total_pages(), 3);
//! ```
//!
//! # Notes
//!
//! - The navigation flags are derived, never trusted from the wire: call
//!   [`PaginatedResult::normalized`] on deserialized pages
//! - `items` never holds more than `limit` entries

use serde::{Deserialize, Serialize};

/// Default page size for list requests.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A single page of results.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `items` | `Vec<T>` | Items on this page, at most `limit` |
/// | `total` | `u64` | Total number of items across all pages |
/// | `page` | `u32` | Current page number (1-indexed) |
/// | `limit` | `u32` | Page size |
/// | `has_next` | `bool` | `page * limit < total` |
/// | `has_prev` | `bool` | `page > 1` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    /// Items in the current page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,

    /// Total number of items across all pages.
    #[serde(default)]
    pub total: u64,

    /// Current page number (1-indexed).
    #[serde(default = "first_page")]
    pub page: u32,

    /// Page size.
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Whether a following page exists.
    #[serde(default)]
    pub has_next: bool,

    /// Whether a preceding page exists.
    #[serde(default)]
    pub has_prev: bool,
}

fn first_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl<T> PaginatedResult<T> {
    /// Builds a page, deriving the navigation flags.
    ///
    /// Items beyond `limit` are dropped.
    pub fn new(mut items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        items.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Self {
            items,
            total,
            page,
            limit,
            has_next: u64::from(page) * u64::from(limit) < total,
            has_prev: page > 1,
        }
    }

    /// Returns an empty first page.
    pub fn empty(limit: u32) -> Self {
        Self::new(Vec::new(), 0, 1, limit)
    }

    /// Re-derives the navigation flags and enforces the item bound.
    ///
    /// Used on pages decoded from the backend, whose flags may be missing
    /// or inconsistent.
    pub fn normalized(self) -> Self {
        Self::new(self.items, self.total, self.page, self.limit)
    }

    /// Number of pages needed to hold `total` items.
    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            0
        } else {
            self.total.div_ceil(u64::from(self.limit))
        }
    }

    /// Page number of the following page, if any.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next.then(|| self.page.saturating_add(1))
    }

    /// Page number of the preceding page, if any.
    pub fn prev_page(&self) -> Option<u32> {
        self.has_prev.then(|| self.page - 1)
    }
}

/// Page selection for list requests.
///
/// # Example
///
/// ```rust
/// use campus_client::api::PageQuery;
///
/// let query = PageQuery::new(2, 50);
/// assert_eq!(
///     query.to_query(),
///     vec![("page".to_string(), "2".to_string()), ("limit".to_string(), "50".to_string())]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    /// Page number (1-indexed).
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageQuery {
    /// Creates a page query; a page of 0 is treated as page 1.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit,
        }
    }

    /// Renders the query parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ]
    }

    /// Compact form used inside cache keys.
    pub fn cache_key(&self) -> String {
        format!("p{}l{}", self.page, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_flags() {
        let page = PaginatedResult::new(vec![1, 2, 3, 4, 5], 45, 3, 20);
        assert!(!page.has_next);
        assert!(page.has_prev);
        assert_eq!(page.next_page(), None);
        assert_eq!(page.prev_page(), Some(2));
    }

    #[test]
    fn test_first_page_flags() {
        let page = PaginatedResult::new(vec![0; 20], 45, 1, 20);
        assert!(page.has_next);
        assert!(!page.has_prev);
        assert_eq!(page.next_page(), Some(2));
    }

    #[test]
    fn test_items_bounded_by_limit() {
        let page = PaginatedResult::new(vec![0; 30], 100, 1, 20);
        assert_eq!(page.items.len(), 20);
    }

    #[test]
    fn test_normalized_recomputes_wire_flags() {
        let json = r#"{"items": [{"id": 1}], "total": 21, "page": 1, "limit": 20, "hasNext": false}"#;
        let page: PaginatedResult<serde_json::Value> = serde_json::from_str(json).unwrap();
        let page = page.normalized();
        assert!(page.has_next);
        assert!(!page.has_prev);
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn test_page_query_clamps_zero() {
        assert_eq!(PageQuery::new(0, 10).page, 1);
        assert_eq!(PageQuery::default().cache_key(), "p1l20");
    }
}
