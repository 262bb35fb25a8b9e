//! Error types
//!
//! Failures the resource layer can report. Transport problems (network,
//! HTTP status, JSON parsing, cache I/O) are carried as `anyhow` chains
//! so the HTTP layer can keep attaching context the usual way.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A reference url did not contain a category and a numeric id
    #[error("malformed resource url: {url}")]
    MalformedUrl { url: String },

    /// No entry of the category listing carries this name
    #[error("no {category} named '{name}'")]
    NameNotFound { category: String, name: String },

    /// The field is absent from the resource, even after loading it
    #[error("{category}/{id} has no field '{field}'")]
    AttributeNotFound {
        field: String,
        category: String,
        id: u32,
    },

    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl Error {
    /// True for lookups the caller is expected to handle (missing names or fields)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NameNotFound { .. } | Error::AttributeNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_not_found_names_field_and_resource() {
        let err = Error::AttributeNotFound {
            field: "color".to_string(),
            category: "berry".to_string(),
            id: 1,
        };
        assert_eq!(err.to_string(), "berry/1 has no field 'color'");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_transport_errors_are_not_lookups() {
        let err = Error::from(anyhow::anyhow!("API request failed: 500"));
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "API request failed: 500");
    }
}
