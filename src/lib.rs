//! Lazy object mapper for the PokeAPI REST service.
//!
//! Items are fetched on demand: a [`ResourceRef`] knows its category, id
//! and name up front and pulls the rest of its payload the first time a
//! field is read. Nested references inside a payload stay unloaded until
//! they are used in turn.

pub mod api;
pub mod config;
pub mod error;
pub mod resource;

pub use api::Client;
pub use error::{Error, Result};
pub use resource::{ApiValue, CategoryIndex, MetadataObject, NameOrId, ResourceRef};
