//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

// == Cache Entry ==
/// A single cached value together with the instant it was stored.
///
/// Entries are never mutated. Re-adding a key replaces the whole entry,
/// which also resets its creation time.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: Bytes,
    /// Monotonic creation instant
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Bytes) -> Self {
        Self::created_at(value, Instant::now())
    }

    /// Creates an entry with an explicit creation instant.
    pub fn created_at(value: Bytes, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Time elapsed between creation and `now`.
    ///
    /// Saturates to zero if `now` is earlier than the creation instant.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks if the entry outlived `interval` as of `now`.
    ///
    /// Boundary condition: the comparison is strict. An entry whose age is
    /// exactly `interval` is still live and survives the sweep.
    pub fn is_expired_at(&self, now: Instant, interval: Duration) -> bool {
        self.age_at(now) > interval
    }
}
