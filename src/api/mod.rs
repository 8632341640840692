//! API Module
//!
//! Cached HTTP client for PokeAPI.
//!
//! # Endpoints
//! - `GET /location-area?offset=..&limit=..` - Paginated location areas
//! - `GET /location-area/{name}` - Creatures found in an area
//! - `GET /pokemon/{name}` - A single creature

pub mod client;

pub use client::PokeClient;
