//! Cache abstraction for memoized model responses.
//!
//! Call sites depend only on the [`Cache`] trait so the in-memory map can be
//! swapped for a bounded or externally-persisted implementation.

use dashmap::DashMap;

/// A shared key-value cache.
pub trait Cache<V>: Send + Sync {
    /// Look up a value by key.
    fn get(&self, key: &str) -> Option<V>;

    /// Store a value. Existing entries are overwritten.
    fn insert(&self, key: String, value: V);

    /// Whether a key is present.
    fn contains(&self, key: &str) -> bool;
}

/// Unbounded in-memory cache. Entries never expire or evict; unbounded
/// growth is a known limitation of this implementation.
pub struct MemoryCache<V> {
    entries: DashMap<String, V>,
}

impl<V> MemoryCache<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for MemoryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync> Cache<V> for MemoryCache<V> {
    fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn insert(&self, key: String, value: V) {
        self.entries.insert(key, value);
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
