//! HTTP transport for the PokeAPI REST service

use super::cache::ResponseCache;
use super::transport::{ResourceListing, Transport};
use crate::error::Result;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use thiserror::Error;

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Listing size requested when none is configured; large enough to return
/// every category in one page
pub const DEFAULT_LIST_LIMIT: usize = 100_000;

/// Non-success HTTP status returned by the API
#[derive(Debug, Error)]
#[error("API request failed: {status}")]
pub struct StatusError {
    pub status: StatusCode,
}

/// Truncate a response body for logging and strip control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// reqwest-backed [`Transport`] with a response cache
pub struct HttpTransport {
    client: Client,
    base_url: String,
    list_limit: usize,
    cache: ResponseCache,
}

impl HttpTransport {
    /// Create a transport for `base_url` with a memory-only cache
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::with_cache(base_url, ResponseCache::in_memory())
    }

    pub fn with_cache(base_url: &str, cache: ResponseCache) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pokebase/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            cache,
        })
    }

    /// Number of entries requested per category listing
    pub fn list_limit(mut self, limit: usize) -> Self {
        self.list_limit = limit;
        self
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// GET `{base_url}/{path}/`, served from the cache entry `key` when possible.
    /// `key` must cover every query parameter that changes the response.
    async fn get_cached(
        &self,
        key: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> anyhow::Result<Value> {
        if let Some(value) = self.cache.get(key).await {
            return Ok(value);
        }

        let url = format!("{}/{}/", self.base_url, path);
        let value = self.get(&url, query).await?;
        self.cache.put(key, &value).await;
        Ok(value)
    }

    /// Make a GET request and parse the JSON body
    async fn get(&self, url: &str, query: &[(&str, String)]) -> anyhow::Result<Value> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(StatusError { status }.into());
        }

        serde_json::from_str(&body).context("Failed to parse response JSON")
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_resource(&self, category: &str) -> Result<ResourceListing> {
        let path = urlencoding::encode(category).into_owned();
        let key = format!("{}?limit={}", path, self.list_limit);
        let value = self
            .get_cached(&key, &path, &[("limit", self.list_limit.to_string())])
            .await
            .with_context(|| format!("Failed to list {}", category))?;

        let listing = serde_json::from_value(value)
            .with_context(|| format!("Unexpected listing shape for {}", category))?;
        Ok(listing)
    }

    async fn get_data(&self, category: &str, id: u32) -> Result<Map<String, Value>> {
        let path = format!("{}/{}", urlencoding::encode(category), id);
        let value = self
            .get_cached(&path, &path, &[])
            .await
            .with_context(|| format!("Failed to fetch {}/{}", category, id))?;

        match value {
            Value::Object(map) => Ok(map),
            other => Err(anyhow::anyhow!(
                "Expected an object for {}/{}, got {}",
                category,
                id,
                json_kind(&other)
            )
            .into()),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Format a transport error for display
pub fn format_api_error(error: &anyhow::Error) -> String {
    let status = error
        .chain()
        .find_map(|e| e.downcast_ref::<StatusError>())
        .map(|e| e.status);

    match status {
        Some(StatusCode::NOT_FOUND) => return "Resource not found.".to_string(),
        Some(StatusCode::TOO_MANY_REQUESTS) => {
            return "Rate limit exceeded. Please try again later.".to_string()
        }
        Some(s) if s.is_server_error() => {
            return "PokeAPI temporarily unavailable. Please try again.".to_string()
        }
        _ => {}
    }

    if error.chain().any(|e| e.is::<reqwest::Error>()) {
        return "Request failed. Check your network connection and try again.".to_string();
    }

    format!("{:#}", error)
}
