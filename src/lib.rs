//! Pokedex - A command-line PokeAPI explorer
//!
//! Provides a REPL over PokeAPI with a time-bounded concurrent response cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod tasks;

pub use api::PokeClient;
pub use cache::Cache;
pub use config::Config;
pub use error::{Error, Result};
pub use repl::Session;
