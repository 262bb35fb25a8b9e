//! Id/name resolution
//!
//! Items are addressable by numeric id or by name. The API payload endpoint
//! only takes one of them, so the other is looked up in the category
//! listing.

use super::convert::parse_resource_url;
use super::index::{entry_id, CategoryIndex};
use crate::api::Client;
use crate::error::{Error, Result};
use std::fmt;

/// An item identifier: numeric id or name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NameOrId {
    Id(u32),
    Name(String),
}

impl NameOrId {
    /// All-digit input is an id, anything else a name
    pub fn parse(input: &str) -> Self {
        match input.parse::<u32>() {
            Ok(id) if input.bytes().all(|b| b.is_ascii_digit()) => NameOrId::Id(id),
            _ => NameOrId::Name(input.to_string()),
        }
    }
}

impl From<u32> for NameOrId {
    fn from(id: u32) -> Self {
        NameOrId::Id(id)
    }
}

impl From<&str> for NameOrId {
    fn from(name: &str) -> Self {
        NameOrId::Name(name.to_string())
    }
}

impl From<String> for NameOrId {
    fn from(name: String) -> Self {
        NameOrId::Name(name)
    }
}

impl fmt::Display for NameOrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameOrId::Id(id) => write!(f, "{}", id),
            NameOrId::Name(name) => f.write_str(name),
        }
    }
}

/// Return `(name, id)` for an item given either one.
///
/// An unknown id is not an error: the name comes back as `None`. An unknown
/// name fails with [`Error::NameNotFound`]. The listing is fetched on every
/// call; repeated lookups rely on the transport cache.
pub async fn resolve(
    client: &Client,
    category: &str,
    name_or_id: NameOrId,
) -> Result<(Option<String>, u32)> {
    let index = CategoryIndex::fetch(client, category).await?;

    match name_or_id {
        NameOrId::Id(id) => {
            let name = name_for_id(&index, id);
            tracing::debug!("resolved {}/{} -> {:?}", category, id, name);
            Ok((name, id))
        }
        NameOrId::Name(name) => {
            let id = id_for_name(&index, &name)?;
            tracing::debug!("resolved {}/{} -> {}", category, name, id);
            Ok((Some(name), id))
        }
    }
}

fn name_for_id(index: &CategoryIndex, id: u32) -> Option<String> {
    let wanted = id.to_string();
    index
        .iter()
        .find(|entry| entry_id(entry) == Some(wanted.as_str()))
        .and_then(|entry| entry.name.clone())
}

fn id_for_name(index: &CategoryIndex, name: &str) -> Result<u32> {
    let entry = index
        .iter()
        .find(|entry| entry.name.as_deref() == Some(name))
        .ok_or_else(|| Error::NameNotFound {
            category: index.category().to_string(),
            name: name.to_string(),
        })?;

    let (_, id) = parse_resource_url(&entry.url)?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::fake::FakeTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn berry_client() -> (Arc<FakeTransport>, Client) {
        let fake = Arc::new(FakeTransport::new().with_listing(
            "berry",
            json!({
                "count": 2,
                "results": [
                    {"name": "cheri", "url": "https://pokeapi.co/api/v2/berry/1/"},
                    {"name": "chesto", "url": "https://pokeapi.co/api/v2/berry/2/"}
                ]
            }),
        ));
        let client = Client::with_transport(fake.clone(), crate::api::BASE_URL);
        (fake, client)
    }

    #[test]
    fn test_parse_name_or_id() {
        assert_eq!(NameOrId::parse("25"), NameOrId::Id(25));
        assert_eq!(NameOrId::parse("pikachu"), NameOrId::from("pikachu"));
        assert_eq!(NameOrId::parse("+25"), NameOrId::Name("+25".to_string()));
        assert_eq!(NameOrId::parse("99999999999"), NameOrId::Name("99999999999".to_string()));
    }

    #[tokio::test]
    async fn test_name_resolves_to_id() {
        let (_, client) = berry_client();
        let resolved = resolve(&client, "berry", "chesto".into()).await.unwrap();
        assert_eq!(resolved, (Some("chesto".to_string()), 2));
    }

    #[tokio::test]
    async fn test_id_resolves_to_name() {
        let (_, client) = berry_client();
        let resolved = resolve(&client, "berry", NameOrId::Id(1)).await.unwrap();
        assert_eq!(resolved, (Some("cheri".to_string()), 1));
    }

    #[tokio::test]
    async fn test_unknown_id_resolves_to_no_name() {
        let (_, client) = berry_client();
        let resolved = resolve(&client, "berry", NameOrId::Id(99)).await.unwrap();
        assert_eq!(resolved, (None, 99));
    }

    #[tokio::test]
    async fn test_unknown_name_is_an_error() {
        let (_, client) = berry_client();
        let err = resolve(&client, "berry", "oran".into()).await.unwrap_err();
        assert!(
            matches!(&err, Error::NameNotFound { category, name } if category == "berry" && name == "oran")
        );
    }

    #[tokio::test]
    async fn test_every_call_fetches_the_index() {
        let (fake, client) = berry_client();
        resolve(&client, "berry", NameOrId::Id(1)).await.unwrap();
        resolve(&client, "berry", NameOrId::Id(2)).await.unwrap();
        assert_eq!(fake.listing_calls(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_names_take_first_match() {
        let fake = FakeTransport::new().with_listing(
            "item",
            json!({
                "count": 2,
                "results": [
                    {"name": "potion", "url": "https://pokeapi.co/api/v2/item/17/"},
                    {"name": "potion", "url": "https://pokeapi.co/api/v2/item/18/"}
                ]
            }),
        );
        let client = Client::with_transport(Arc::new(fake), crate::api::BASE_URL);
        let resolved = resolve(&client, "item", "potion".into()).await.unwrap();
        assert_eq!(resolved.1, 17);
    }
}
