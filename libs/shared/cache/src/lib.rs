//! Keyed query cache for client-side reads.
//!
//! Read results are stored under ordered key segments and served until they
//! go stale or a mutation invalidates the matching prefix, at which point
//! the next read fetches from the backend again.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::RwLock;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use shared_models::error::AppError;

#[cfg(not(test))]
use std::time::Instant;

#[cfg(test)]
use mock_instant::Instant;

pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(60);

/// Ordered cache key segments, e.g. `["admin-users", "PATIENT", "1"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(":"))
    }
}

struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, CacheEntry>>,
    stale_after: Duration,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_AFTER)
    }
}

impl QueryCache {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stale_after,
        }
    }

    /// Fresh cached value for the key, if any.
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entries = self.entries.read().unwrap();
        let entry = entries.get(key)?;

        if entry.stored_at.elapsed() > self.stale_after {
            return None;
        }

        serde_json::from_value(entry.value.clone()).ok()
    }

    pub fn insert<T: Serialize>(&self, key: QueryKey, value: &T) {
        let value = serde_json::to_value(value).expect("cached value serializes");
        self.entries.write().unwrap().insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Serve a fresh cached value or run the fetch and store its result.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        if let Some(hit) = self.get::<T>(&key) {
            debug!("Query cache hit for {}", key);
            return Ok(hit);
        }

        debug!("Query cache miss for {}", key);
        let value = fetch().await?;
        self.insert(key, &value);
        Ok(value)
    }

    /// Drop every entry whose key starts with the prefix.
    pub fn invalidate(&self, prefix: &QueryKey) {
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        debug!(
            "Invalidated {} cache entries under {}",
            before - entries.len(),
            prefix
        );
    }

    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }
}
