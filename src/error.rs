//! Error types for the Pokedex
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the cache, the API client and the REPL.
#[derive(Error, Debug)]
pub enum Error {
    /// Cache was constructed with an interval the reaper cannot tick on
    #[error("Invalid cache interval: {0:?}")]
    InvalidInterval(Duration),

    /// Transport-level HTTP failure
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// Response body did not match the expected resource shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// First word of the input is not a registered command
    #[error("Unknown command")]
    UnknownCommand(String),

    /// Command needs an argument that was not given
    #[error("you must provide a {0}")]
    MissingArgument(&'static str),

    /// `mapb` on the first page
    #[error("you're on the first page")]
    FirstPage,

    /// `map` past the last page
    #[error("you're on the last page")]
    LastPage,

    /// `inspect` on a creature that is not in the pokedex
    #[error("you have not caught that pokemon")]
    NotCaught(String),
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex.
pub type Result<T> = std::result::Result<T, Error>;
