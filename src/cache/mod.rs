//! Cache Module
//!
//! Provides the time-bounded concurrent cache that fronts PokeAPI requests.

mod entry;
mod store;
mod ttl;


// Re-export public types
pub use entry::CacheEntry;
pub use store::CacheStore;
pub use ttl::Cache;
