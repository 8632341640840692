//! TTL Cache Handle
//!
//! The shareable cache used by the API client: one lock around a
//! [`CacheStore`] plus the background reaper that sweeps it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

use crate::cache::CacheStore;
use crate::error::{Error, Result};
use crate::tasks::spawn_reap_task;

// == Cache ==
/// Time-bounded concurrent key/value cache.
///
/// Cloning is cheap and every clone shares the same entries. Entries are
/// removed by a background reaper that ticks once per `interval` and drops
/// anything older than `interval`, so an entry stays retrievable for at
/// least one and at most roughly two intervals.
///
/// The reaper stops when [`Cache::shutdown`] is called, when the token passed
/// to [`Cache::with_cancellation`] is cancelled, or when the last clone is
/// dropped.
#[derive(Clone)]
pub struct Cache {
    shared: Arc<Shared>,
}

struct Shared {
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    token: CancellationToken,
    reaper: Mutex<Option<JoinHandle<()>>>,
    // Cancels the reaper once the last handle goes away
    _guard: DropGuard,
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper.
    ///
    /// Must be called from within a tokio runtime. Returns
    /// [`Error::InvalidInterval`] for a zero interval.
    pub fn new(interval: Duration) -> Result<Self> {
        Self::with_cancellation(interval, CancellationToken::new())
    }

    /// Creates an empty cache whose reaper also stops when `token` is cancelled.
    ///
    /// The reaper listens on a child of `token`, so shutting this cache down
    /// never cancels the caller's token.
    pub fn with_cancellation(interval: Duration, token: CancellationToken) -> Result<Self> {
        if interval.is_zero() {
            return Err(Error::InvalidInterval(interval));
        }

        let token = token.child_token();
        let store = Arc::new(Mutex::new(CacheStore::new(interval)));
        let handle = spawn_reap_task(store.clone(), interval, token.clone());

        Ok(Self {
            shared: Arc::new(Shared {
                store,
                interval,
                _guard: token.clone().drop_guard(),
                token,
                reaper: Mutex::new(Some(handle)),
            }),
        })
    }

    // == Add ==
    /// Inserts or replaces the value stored under `key`.
    pub async fn add(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        let key = key.into();
        let value = value.into();
        debug!(key = %key, bytes = value.len(), "cache add");

        let mut store = self.shared.store.lock().await;
        store.add(key, value);
    }

    // == Get ==
    /// Returns the value stored under `key`, or `None` if absent or reaped.
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        let store = self.shared.store.lock().await;
        store.get(key)
    }

    // == Introspection ==
    /// Current number of entries, including expired ones not yet reaped.
    pub async fn len(&self) -> usize {
        self.shared.store.lock().await.len()
    }

    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.shared.store.lock().await.is_empty()
    }

    /// The TTL and reap period this cache was built with.
    pub fn interval(&self) -> Duration {
        self.shared.interval
    }

    /// Returns true once the reaper has been told to stop.
    pub fn is_shut_down(&self) -> bool {
        self.shared.token.is_cancelled()
    }

    // == Shutdown ==
    /// Stops the reaper and waits for it to finish.
    ///
    /// Entries stay readable afterwards but are no longer swept. Calling this
    /// more than once is harmless.
    pub async fn shutdown(&self) {
        self.shared.token.cancel();
        let handle = self.shared.reaper.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("interval", &self.shared.interval)
            .field("shut_down", &self.is_shut_down())
            .finish_non_exhaustive()
    }
}
