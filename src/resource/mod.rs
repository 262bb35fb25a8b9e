//! Resource object layer
//!
//! Maps raw API payloads onto navigable objects, fetching lazily.
//!
//! # Architecture
//!
//! - [`reference`] - [`ResourceRef`], a lazily loaded item of a category
//! - [`metadata`] - [`MetadataObject`], nested structures without identity
//! - [`index`] - [`CategoryIndex`], the listing of one category
//! - [`resolver`] - id/name interconversion over a category listing
//! - [`convert`] - raw JSON to [`ApiValue`]
//!
//! # Example
//!
//! ```ignore
//! use pokebase::api::Client;
//! use pokebase::resource::ApiValue;
//!
//! async fn firmness(client: &Client) -> pokebase::Result<()> {
//!     let cheri = client.lazy_resource("berry", "cheri").await?;
//!     let firmness = cheri.get("firmness").await?.as_resource().cloned();
//!     Ok(())
//! }
//! ```

pub mod convert;
pub mod index;
pub mod metadata;
pub mod reference;
pub mod resolver;
pub mod value;

pub use convert::{convert, parse_resource_url};
pub use index::CategoryIndex;
pub use metadata::MetadataObject;
pub use reference::ResourceRef;
pub use resolver::{resolve, NameOrId};
pub use value::ApiValue;
