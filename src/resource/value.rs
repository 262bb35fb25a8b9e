//! Converted API values

use super::metadata::MetadataObject;
use super::reference::ResourceRef;
use serde_json::{json, Value};

/// A payload value after conversion
#[derive(Debug, Clone, PartialEq)]
pub enum ApiValue {
    /// Any non-mapping JSON value, including lists that were not converted
    Scalar(Value),
    /// A mapping carrying a `url`, deferred until accessed
    Resource(ResourceRef),
    /// A mapping without a `url`
    Metadata(MetadataObject),
    /// A list converted element by element (top-level payload lists only)
    List(Vec<ApiValue>),
}

impl ApiValue {
    pub fn is_scalar(&self) -> bool {
        matches!(self, ApiValue::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            ApiValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Value::as_str)
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_scalar().and_then(Value::as_u64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().and_then(Value::as_bool)
    }

    pub fn as_resource(&self) -> Option<&ResourceRef> {
        match self {
            ApiValue::Resource(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_metadata(&self) -> Option<&MetadataObject> {
        match self {
            ApiValue::Metadata(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ApiValue]> {
        match self {
            ApiValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Render back to JSON without loading anything. References become
    /// `{"name", "url"}` stubs.
    pub fn to_json(&self) -> Value {
        match self {
            ApiValue::Scalar(v) => v.clone(),
            ApiValue::Resource(r) => json!({ "name": r.name(), "url": r.url() }),
            ApiValue::Metadata(m) => Value::Object(
                m.fields()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            ApiValue::List(items) => Value::Array(items.iter().map(ApiValue::to_json).collect()),
        }
    }
}

impl From<Value> for ApiValue {
    fn from(value: Value) -> Self {
        ApiValue::Scalar(value)
    }
}
