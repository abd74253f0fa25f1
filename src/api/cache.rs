//
//  campus-client
//  api/cache.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Response Cache
//!
//! A time-boxed key/value store for successful GET responses.
//!
//! Entries carry their own TTL and are checked lazily: a read that finds
//! an expired entry removes it and reports a miss. There is no background
//! sweep. Time is read from `tokio::time::Instant`, so a paused tokio clock
//! controls expiry in tests.
//!
//! The map sits behind a mutex; every operation takes the lock once and
//! never holds it across an `.await`.
//!
//! ```rust
//! use std::time::Duration;
//! use campus_client::api::ResponseCache;
//!
//! let cache: ResponseCache<u32> = ResponseCache::new();
//! cache.set("challenge:x1", 7, Duration::from_secs(60));
//! assert_eq!(cache.get("challenge:x1"), Some(7));
//!
//! cache.delete("challenge:x1");
//! assert_eq!(cache.get("challenge:x1"), None);
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

/// TTL applied when a caller does not choose one: five minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// A cached value with its creation instant and lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    /// The cached value.
    pub data: T,
    /// When the entry was stored.
    pub timestamp: Instant,
    /// How long the entry stays valid.
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    /// Creates an entry stamped with the current instant.
    pub fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            timestamp: Instant::now(),
            ttl,
        }
    }

    /// An entry is valid while `now - timestamp <= ttl`.
    pub fn is_valid_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.timestamp) <= self.ttl
    }

    /// Whether the entry is valid right now.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Instant::now())
    }
}

/// TTL cache keyed by string.
///
/// The client stores decoded JSON (`serde_json::Value`), which is the
/// default value type.
#[derive(Debug)]
pub struct ResponseCache<V = serde_json::Value> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    default_ttl: Duration,
}

impl<V> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::with_default_ttl(DEFAULT_TTL)
    }
}

impl<V> ResponseCache<V> {
    /// Creates an empty cache with the five-minute default TTL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache whose [`set_default`](Self::set_default) uses `ttl`.
    pub fn with_default_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl: ttl,
        }
    }

    /// The TTL used by [`set_default`](Self::set_default).
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        // The map is never left half-updated, so a poisoned lock is still usable.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `data` under `key` for `ttl`, replacing any existing entry.
    pub fn set(&self, key: impl Into<String>, data: V, ttl: Duration) {
        let key = key.into();
        trace!(%key, ?ttl, "cache set");
        self.lock().insert(key, CacheEntry::new(data, ttl));
    }

    /// Stores `data` under `key` with the default TTL.
    pub fn set_default(&self, key: impl Into<String>, data: V) {
        self.set(key, data, self.default_ttl);
    }

    /// Removes the entry for `key`. Returns whether one existed.
    pub fn delete(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Returns the number of entries removed.
    pub fn delete_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        before - entries.len()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Whether an entry exists for `key`, expired or not. Does not evict.
    pub fn contains_raw(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Number of stored entries, expired ones included. Does not evict.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> ResponseCache<V> {
    /// Returns the value for `key` if present and unexpired.
    ///
    /// An expired entry is removed by this call.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.lock();
        let valid = entries.get(key)?.is_valid();
        if valid {
            trace!(key, "cache hit");
            entries.get(key).map(|entry| entry.data.clone())
        } else {
            trace!(key, "cache entry expired");
            entries.remove(key);
            None
        }
    }
}
