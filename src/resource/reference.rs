//! Resource references
//!
//! A [`ResourceRef`] stands for one item of a category. Its identity
//! (category, id, name, url) is known from construction; the rest of the
//! payload is fetched the first time a field outside that identity is
//! requested, converted once, and kept for the lifetime of the reference.

use super::convert::convert_payload;
use super::resolver::{resolve, NameOrId};
use super::value::ApiValue;
use crate::api::Client;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Fields available without loading
const IDENTITY_FIELDS: [&str; 4] = ["name", "category", "id", "url"];

/// Clones share one loaded state: loading through any clone loads them all.
#[derive(Clone)]
pub struct ResourceRef {
    client: Client,
    category: String,
    id: u32,
    name: Option<String>,
    url: String,
    identity: IndexMap<String, ApiValue>,
    fields: Arc<OnceCell<IndexMap<String, ApiValue>>>,
}

impl ResourceRef {
    /// Resolve `name_or_id` within `category` and build a reference.
    /// Unless `lazy`, the payload is loaded before returning.
    pub async fn new(
        client: &Client,
        category: &str,
        name_or_id: impl Into<NameOrId>,
        lazy: bool,
    ) -> Result<Self> {
        let (name, id) = resolve(client, category, name_or_id.into()).await?;
        let reference = Self::with_identity(client, category, id, name);

        if !lazy {
            reference.load().await?;
        }
        Ok(reference)
    }

    /// Build an unloaded reference whose identity is already known
    pub fn with_identity(client: &Client, category: &str, id: u32, name: Option<String>) -> Self {
        let url = client.resource_url(category, id);

        let identity = IDENTITY_FIELDS
            .iter()
            .map(|&field| {
                let value = match field {
                    "name" => name.clone().map_or(Value::Null, Value::String),
                    "category" => Value::String(category.to_string()),
                    "id" => Value::from(id),
                    _ => Value::String(url.clone()),
                };
                (field.to_string(), ApiValue::Scalar(value))
            })
            .collect();

        Self {
            client: client.clone(),
            category: category.to_string(),
            id,
            name,
            url,
            identity,
            fields: Arc::new(OnceCell::new()),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Name as resolved at construction; `None` when the id is not listed
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_loaded(&self) -> bool {
        self.fields.initialized()
    }

    /// Fetch and convert the payload. Runs at most once; a failed load
    /// leaves the reference unloaded.
    pub async fn load(&self) -> Result<()> {
        self.loaded_fields().await.map(|_| ())
    }

    /// All payload fields, loading first if needed
    pub async fn loaded_fields(&self) -> Result<&IndexMap<String, ApiValue>> {
        self.fields
            .get_or_try_init(|| async {
                tracing::debug!("loading {}/{}", self.category, self.id);
                let data = self
                    .client
                    .transport()
                    .get_data(&self.category, self.id)
                    .await?;
                convert_payload(&self.client, data)
            })
            .await
    }

    /// Payload fields if already loaded
    pub fn fields(&self) -> Option<&IndexMap<String, ApiValue>> {
        self.fields.get()
    }

    /// Look up a field. Identity fields never trigger a load; anything else
    /// loads the payload on first use.
    pub async fn get(&self, field: &str) -> Result<&ApiValue> {
        if let Some(fields) = self.fields.get() {
            return fields
                .get(field)
                .or_else(|| self.identity.get(field))
                .ok_or_else(|| self.not_found(field));
        }

        if let Some(value) = self.identity.get(field) {
            return Ok(value);
        }

        self.loaded_fields()
            .await?
            .get(field)
            .ok_or_else(|| self.not_found(field))
    }

    fn not_found(&self, field: &str) -> Error {
        Error::AttributeNotFound {
            field: field.to_string(),
            category: self.category.clone(),
            id: self.id,
        }
    }

    fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.to_string())
    }
}

impl PartialEq for ResourceRef {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.id == other.id
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl fmt::Debug for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}-{}>", self.category, self.label())
    }
}
