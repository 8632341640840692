//! PokeAPI resource models
//!
//! serde shapes for the subset of PokeAPI resources the REPL commands read.
//! Unknown fields are ignored, so only what the commands print is modelled.

pub mod location;
pub mod pokemon;

use serde::Deserialize;

// Re-export commonly used types
pub use location::{LocationArea, LocationAreaPage, PokemonEncounter};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};

/// A `{ name, url }` link to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}
