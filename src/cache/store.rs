//! Cache Store Module
//!
//! The unsynchronised map behind a [`Cache`](crate::cache::Cache). Callers
//! must hold the cache lock for every method here.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

use crate::cache::CacheEntry;

// == Cache Store ==
/// Key-value storage with a fixed time-to-live.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// TTL, also the reap period
    interval: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries live for `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            interval,
        }
    }

    // == Add ==
    /// Inserts or replaces the entry for `key`, stamped with the current instant.
    pub fn add(&mut self, key: impl Into<String>, value: Bytes) {
        self.add_at(key, value, Instant::now());
    }

    /// Inserts or replaces the entry for `key` with an explicit creation instant.
    pub fn add_at(&mut self, key: impl Into<String>, value: Bytes, created_at: Instant) {
        self.entries
            .insert(key.into(), CacheEntry::created_at(value, created_at));
    }

    // == Get ==
    /// Returns the value for `key` if present.
    ///
    /// Entries are returned regardless of how close they are to expiry, and
    /// reading never renews the creation instant.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Reap ==
    /// Removes every entry older than the interval as of `now`.
    ///
    /// Returns the number of entries removed.
    pub fn reap(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let interval = self.interval;
        self.entries
            .retain(|_, entry| !entry.is_expired_at(now, interval));
        before - self.entries.len()
    }

    /// Removes every entry older than the interval as of the current instant.
    pub fn reap_expired(&mut self) -> usize {
        self.reap(Instant::now())
    }

    // == Accessors ==
    /// Returns the configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
