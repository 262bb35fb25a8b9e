//! PokeAPI interaction module
//!
//! # Module Structure
//!
//! - [`client`] - Shared client handle and builder
//! - [`transport`] - The listing/payload contract the resource layer consumes
//! - [`http`] - reqwest implementation of the transport
//! - [`cache`] - In-memory and on-disk response cache
//!
//! # Example
//!
//! ```ignore
//! use pokebase::api::Client;
//!
//! async fn example() -> pokebase::Result<()> {
//!     let client = Client::new()?;
//!     let berry = client.resource("berry", "cheri").await?;
//!     let firmness = berry.get("firmness").await?;
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod http;
pub mod transport;

pub use client::{Client, ClientBuilder, BASE_URL, SPRITE_URL};
pub use http::HttpTransport;
pub use transport::{ListEntry, ResourceListing, Transport};
