//! PokeAPI Client
//!
//! Fetches JSON resources, answering repeat requests from the response cache.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

/// HTTP client for PokeAPI backed by a [`Cache`].
///
/// Raw response bodies are cached under their full request URL, so a page
/// reached through `next`/`previous` links and one built by hand share an
/// entry only when the URLs match exactly.
#[derive(Debug, Clone)]
pub struct PokeClient {
    http: reqwest::Client,
    cache: Cache,
    base_url: String,
    page_size: u32,
}

impl PokeClient {
    /// Creates a client from configuration.
    pub fn new(config: &Config, cache: Cache) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            cache,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }

    /// The response cache shared with this client.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// URL of the first page of the location area listing.
    pub fn first_page_url(&self) -> String {
        format!(
            "{}/location-area?offset=0&limit={}",
            self.base_url, self.page_size
        )
    }

    /// URL of a single location area.
    pub fn location_area_url(&self, name: &str) -> String {
        format!("{}/location-area/{}", self.base_url, name)
    }

    /// URL of a single creature.
    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, name)
    }

    // == Endpoints ==
    /// Fetches a page of location areas; `None` means the first page.
    pub async fn location_areas(&self, page_url: Option<&str>) -> Result<LocationAreaPage> {
        match page_url {
            Some(url) => self.get_json(url).await,
            None => self.get_json(&self.first_page_url()).await,
        }
    }

    /// Fetches one location area by name or id.
    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        self.get_json(&self.location_area_url(name)).await
    }

    /// Fetches one creature by name or id.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        self.get_json(&self.pokemon_url(name)).await
    }

    /// Fetches `url` (through the cache) and decodes it as `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.fetch(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Bytes> {
        if let Some(body) = self.cache.get(url).await {
            debug!("cache hit");
            return Ok(body);
        }
        debug!("cache miss");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        self.cache.add(url, body.clone()).await;
        Ok(body)
    }
}
