//! Value conversion
//!
//! Turns raw JSON into [`ApiValue`]s. A mapping with a `url` names another
//! resource and becomes a deferred [`ResourceRef`]; any other mapping becomes
//! a [`MetadataObject`]. Everything else is kept as is.

use super::metadata::MetadataObject;
use super::reference::ResourceRef;
use super::value::ApiValue;
use crate::api::Client;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Convert one value. Lists are not walked.
pub fn convert(client: &Client, value: Value) -> Result<ApiValue> {
    let map = match value {
        Value::Object(map) => map,
        other => return Ok(ApiValue::Scalar(other)),
    };

    if !map.contains_key("url") {
        return Ok(ApiValue::Metadata(MetadataObject::new(client, map)?));
    }

    let url = &map["url"];
    let Some(url) = url.as_str() else {
        return Err(Error::MalformedUrl {
            url: url.to_string(),
        });
    };
    let (category, id) = parse_resource_url(url)?;
    let name = map.get("name").and_then(Value::as_str).map(str::to_owned);
    Ok(ApiValue::Resource(ResourceRef::with_identity(client, category, id, name)))
}

/// Convert every field of a fetched payload. Unlike [`convert`], list
/// fields are converted element by element.
pub(crate) fn convert_payload(
    client: &Client,
    data: Map<String, Value>,
) -> Result<IndexMap<String, ApiValue>> {
    data.into_iter()
        .map(|(key, value)| -> Result<(String, ApiValue)> {
            let converted = match value {
                Value::Array(items) => ApiValue::List(
                    items
                        .into_iter()
                        .map(|item| convert(client, item))
                        .collect::<Result<_>>()?,
                ),
                other => convert(client, other)?,
            };
            Ok((key, converted))
        })
        .collect()
}

/// Last two path segments of a resource url: `(category, id)`.
/// A single trailing slash is ignored.
pub(crate) fn url_segments(url: &str) -> Option<(&str, &str)> {
    let trimmed = url.strip_suffix('/').unwrap_or(url);
    let mut parts = trimmed.rsplit('/');
    let id = parts.next().filter(|s| !s.is_empty())?;
    let category = parts.next().filter(|s| !s.is_empty())?;
    Some((category, id))
}

/// Extract `(category, id)` from `.../<category>/<id>/`
pub fn parse_resource_url(url: &str) -> Result<(&str, u32)> {
    url_segments(url)
        .and_then(|(category, id)| id.parse().ok().map(|id| (category, id)))
        .ok_or_else(|| Error::MalformedUrl {
            url: url.to_string(),
        })
}
