//! Response cache keyed by request, shared across tasks through `DashMap`.

use std::time::{Duration, Instant};

use dashmap::DashMap;

struct Cached {
    json: String,
    stored_at: Instant,
}

/// Serialized API responses with a fixed time-to-live.
///
/// An entry older than the TTL is treated as absent and evicted by the read
/// that finds it. A zero TTL turns the cache off: nothing is stored.
pub struct MemoryCache {
    entries: DashMap<String, Cached>,
    ttl: Duration,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Fresh JSON stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        let fresh = {
            let cached = self.entries.get(key)?;
            (cached.stored_at.elapsed() < self.ttl).then(|| cached.json.clone())
        };
        if fresh.is_none() {
            self.entries.remove(key);
        }
        fresh
    }

    /// Stores `json` under `key`, replacing any previous response.
    pub fn set(&self, key: String, json: String) {
        if self.ttl.is_zero() {
            return;
        }
        self.entries.insert(
            key,
            Cached {
                json,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drops every expired entry and returns how many remain.
    pub fn purge_expired(&self) -> usize {
        self.entries
            .retain(|_, cached| cached.stored_at.elapsed() < self.ttl);
        self.entries.len()
    }

    /// Entry count, including expired entries not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
