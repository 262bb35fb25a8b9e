//! Transport contract
//!
//! The resource layer never builds request URLs itself. It asks a
//! [`Transport`] for a category listing or for one item's payload, keyed by
//! category and id.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a category listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub url: String,
}

/// Category listing as served by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceListing {
    pub count: usize,
    #[serde(default)]
    pub results: Vec<ListEntry>,
}

/// Source of raw API data
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the listing of every item in a category
    async fn get_resource(&self, category: &str) -> Result<ResourceListing>;

    /// Fetch the full payload of one item
    async fn get_data(&self, category: &str, id: u32) -> Result<Map<String, Value>>;
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_entries_without_name() {
        let listing: ResourceListing = serde_json::from_value(json!({
            "count": 2,
            "next": null,
            "results": [
                {"url": "https://pokeapi.co/api/v2/evolution-chain/1/"},
                {"name": "cheri", "url": "https://pokeapi.co/api/v2/berry/1/"}
            ]
        }))
        .unwrap();

        assert_eq!(listing.count, 2);
        assert_eq!(listing.results[0].name, None);
        assert_eq!(listing.results[1].name.as_deref(), Some("cheri"));
    }
}
