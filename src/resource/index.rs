//! Category listings
//!
//! A [`CategoryIndex`] holds the listing of every item in one category
//! ("berry", "move", ...). It backs id/name resolution and lets callers
//! browse what a category contains.

use super::convert::url_segments;
use crate::api::{Client, ListEntry, ResourceListing};
use crate::error::Result;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryIndex {
    category: String,
    entries: Vec<ListEntry>,
    count: usize,
}

impl CategoryIndex {
    /// Fetch the listing of `category`
    pub async fn fetch(client: &Client, category: &str) -> Result<Self> {
        tracing::debug!("fetching {} index", category);
        let listing = client.transport().get_resource(category).await?;
        Ok(Self::from_listing(category, listing))
    }

    pub fn from_listing(category: &str, listing: ResourceListing) -> Self {
        Self {
            category: category.to_string(),
            entries: listing.results,
            count: listing.count,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Total count reported by the API. May exceed the number of listed
    /// entries when the listing was truncated.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The entries actually listed, in API order
    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListEntry> {
        self.entries.iter()
    }

    /// Entry names. Unnamed entries fall back to the id in their url.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(entry_name)
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.url.as_str())
    }
}

/// Id segment of an entry's url, as listed
pub(crate) fn entry_id(entry: &ListEntry) -> Option<&str> {
    url_segments(&entry.url).map(|(_, id)| id)
}

fn entry_name(entry: &ListEntry) -> &str {
    entry
        .name
        .as_deref()
        .or_else(|| entry_id(entry))
        .unwrap_or(entry.url.as_str())
}

impl<'a> IntoIterator for &'a CategoryIndex {
    type Item = &'a ListEntry;
    type IntoIter = std::slice::Iter<'a, ListEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for CategoryIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(&self.entries).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::fake::FakeTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn berry_client() -> Client {
        let fake = FakeTransport::new().with_listing(
            "berry",
            json!({
                "count": 64,
                "results": [
                    {"name": "cheri", "url": "https://pokeapi.co/api/v2/berry/1/"},
                    {"name": "chesto", "url": "https://pokeapi.co/api/v2/berry/2/"}
                ]
            }),
        );
        Client::with_transport(Arc::new(fake), crate::api::BASE_URL)
    }

    #[tokio::test]
    async fn test_len_is_reported_count() {
        let index = CategoryIndex::fetch(&berry_client(), "berry").await.unwrap();
        assert_eq!(index.len(), 64);
        assert_eq!(index.entries().len(), 2);
        assert!(!index.is_empty());
    }

    #[tokio::test]
    async fn test_names_and_urls_in_listing_order() {
        let index = CategoryIndex::fetch(&berry_client(), "berry").await.unwrap();
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["cheri", "chesto"]);
        assert_eq!(
            index.urls().collect::<Vec<_>>(),
            vec![
                "https://pokeapi.co/api/v2/berry/1/",
                "https://pokeapi.co/api/v2/berry/2/"
            ]
        );
        // re-iterable
        assert_eq!(index.names().count(), 2);
        assert_eq!((&index).into_iter().count(), 2);
    }

    #[test]
    fn test_unnamed_entries_use_url_id() {
        let listing: ResourceListing = serde_json::from_value(json!({
            "count": 2,
            "results": [
                {"url": "https://pokeapi.co/api/v2/evolution-chain/1/"},
                {"url": "https://pokeapi.co/api/v2/evolution-chain/2/"}
            ]
        }))
        .unwrap();
        let index = CategoryIndex::from_listing("evolution-chain", listing);
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["1", "2"]);
    }

    #[test]
    fn test_display_renders_entries() {
        let listing = ResourceListing {
            count: 1,
            results: vec![ListEntry {
                name: Some("cheri".to_string()),
                url: "https://pokeapi.co/api/v2/berry/1/".to_string(),
            }],
        };
        let index = CategoryIndex::from_listing("berry", listing);
        assert_eq!(
            index.to_string(),
            r#"[{"name":"cheri","url":"https://pokeapi.co/api/v2/berry/1/"}]"#
        );
    }

    #[tokio::test]
    async fn test_unknown_category_propagates_transport_error() {
        let err = CategoryIndex::fetch(&berry_client(), "nope").await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }
}
