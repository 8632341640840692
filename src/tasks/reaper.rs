//! Cache Reaper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns the reaper for one cache store.
///
/// The task ticks every `interval`, first firing one full interval after
/// this call. On each tick it takes the store lock, drops entries older than
/// the store's interval and releases the lock before waiting again. It keeps
/// running on empty stores and quiet ticks, and exits only when `token` is
/// cancelled. Cancellation is observed between sweeps, never in the middle of
/// one.
///
/// # Arguments
/// * `store` - Shared store, the same lock used by `add` and `get`
/// * `interval` - Tick period; must be non-zero
/// * `token` - Stops the task when cancelled
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new(interval)));
/// let token = CancellationToken::new();
/// let handle = spawn_reap_task(store.clone(), interval, token.clone());
/// // Later, during shutdown:
/// token.cancel();
/// handle.await?;
/// ```
pub fn spawn_reap_task(
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    token: CancellationToken,
) -> JoinHandle<()> {
    let start = Instant::now() + interval;

    tokio::spawn(async move {
        let mut ticker = time::interval_at(start, interval);
        // A late tick only stretches the current cycle
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(?interval, "Starting cache reaper");

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let (removed, remaining) = {
                let mut store = store.lock().await;
                let removed = store.reap_expired();
                (removed, store.len())
            };

            if removed > 0 {
                info!(removed, remaining, "Cache reap removed expired entries");
            } else {
                debug!(remaining, "Cache reap found no expired entries");
            }
        }

        info!("Cache reaper stopped");
    })
}
