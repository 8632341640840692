//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - Reaper: Removes expired cache entries once per cache interval

mod reaper;

pub use reaper::spawn_reap_task;
