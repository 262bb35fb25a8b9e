//! Metadata objects
//!
//! Small nested structures that have no identity of their own in the API
//! (effect entries, stat blocks, names in other languages, ...). They are
//! fully materialized when built.

use super::convert::convert;
use super::value::ApiValue;
use crate::api::Client;
use crate::error::Result;
use indexmap::IndexMap;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetadataObject {
    fields: IndexMap<String, ApiValue>,
}

impl MetadataObject {
    /// Build from a raw mapping. Mapping-valued fields are converted;
    /// list-valued fields are kept raw.
    pub fn new(client: &Client, data: Map<String, Value>) -> Result<Self> {
        let fields = data
            .into_iter()
            .map(|(key, value)| -> Result<(String, ApiValue)> {
                let converted = if value.is_object() {
                    convert(client, value)?
                } else {
                    ApiValue::Scalar(value)
                };
                Ok((key, converted))
            })
            .collect::<Result<_>>()?;

        Ok(Self { fields })
    }

    pub fn get(&self, field: &str) -> Option<&ApiValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Fields in payload order
    pub fn fields(&self) -> impl Iterator<Item = (&String, &ApiValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
