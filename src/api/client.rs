//! PokeAPI client
//!
//! Cheap-to-clone handle shared by every object the resource layer creates.
//! It carries the transport used for fetching and the base URL used for
//! canonical resource urls.

use super::cache::ResponseCache;
use super::http::HttpTransport;
use super::transport::Transport;
use crate::error::Result;
use crate::resource::{CategoryIndex, NameOrId, ResourceRef};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Default API root
pub const BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Default sprite root
pub const SPRITE_URL: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites";

#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    base_url: Arc<str>,
    sprite_url: Arc<str>,
}

impl Client {
    /// Client talking to the public API with a memory-only cache
    pub fn new() -> anyhow::Result<Self> {
        ClientBuilder::default().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Client over an arbitrary transport
    pub fn with_transport(transport: Arc<dyn Transport>, base_url: &str) -> Self {
        Self {
            transport,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            sprite_url: Arc::from(SPRITE_URL),
        }
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Canonical url of one item
    pub fn resource_url(&self, category: &str, id: u32) -> String {
        format!("{}/{}/{}/", self.base_url, category, id)
    }

    /// Sprite image url, e.g. `sprite_url("pokemon", 25)` -> `.../pokemon/25.png`
    pub fn sprite_url(&self, kind: &str, id: u32) -> String {
        format!("{}/{}/{}.png", self.sprite_url, kind.trim_matches('/'), id)
    }

    /// Fetch and fully load a resource
    pub async fn resource(
        &self,
        category: &str,
        name_or_id: impl Into<NameOrId>,
    ) -> Result<ResourceRef> {
        ResourceRef::new(self, category, name_or_id, false).await
    }

    /// Resolve a resource's identity without loading its payload
    pub async fn lazy_resource(
        &self,
        category: &str,
        name_or_id: impl Into<NameOrId>,
    ) -> Result<ResourceRef> {
        ResourceRef::new(self, category, name_or_id, true).await
    }

    /// Fetch a category listing
    pub async fn category(&self, category: &str) -> Result<CategoryIndex> {
        CategoryIndex::fetch(self, category).await
    }

    /// Interconvert a name and an id within a category
    pub async fn resolve(
        &self,
        category: &str,
        name_or_id: impl Into<NameOrId>,
    ) -> Result<(Option<String>, u32)> {
        crate::resource::resolve(self, category, name_or_id.into()).await
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Builder for an HTTP-backed [`Client`]
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    sprite_url: String,
    cache_dir: Option<PathBuf>,
    list_limit: usize,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            sprite_url: SPRITE_URL.to_string(),
            cache_dir: None,
            list_limit: super::http::DEFAULT_LIST_LIMIT,
        }
    }
}

impl ClientBuilder {
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn sprite_url(mut self, sprite_url: &str) -> Self {
        self.sprite_url = sprite_url.to_string();
        self
    }

    /// Persist responses as JSON files under `dir`
    pub fn cache_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.cache_dir = dir;
        self
    }

    pub fn list_limit(mut self, limit: usize) -> Self {
        self.list_limit = limit;
        self
    }

    pub fn build(self) -> anyhow::Result<Client> {
        url::Url::parse(&self.base_url)
            .map_err(|e| anyhow::anyhow!("Invalid base URL '{}': {}", self.base_url, e))?;

        let cache = match self.cache_dir {
            Some(dir) => ResponseCache::with_dir(dir),
            None => ResponseCache::in_memory(),
        };
        let transport = HttpTransport::with_cache(&self.base_url, cache)?.list_limit(self.list_limit);

        let mut client = Client::with_transport(Arc::new(transport), &self.base_url);
        client.sprite_url = Arc::from(self.sprite_url.trim_end_matches('/'));
        Ok(client)
    }
}
