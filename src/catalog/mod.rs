//! Catalog - movie data and the clients that fetch it.
//!
//! The browse view-model never talks to the network itself. It asks a
//! [`CatalogClient`] for trending movies, searches, genres and details.
//!
//! ## Example
//!
//! ```ignore
//! use movie_corner::catalog::{CatalogClient, InMemoryCatalog, Movie};
//!
//! let catalog = InMemoryCatalog::new().with_trending(vec![Movie::new(1, "Heat")]);
//! let movies = catalog.fetch_trending().await?;
//! ```

mod client;
mod in_memory;
mod model;
#[cfg(feature = "client")]
mod tmdb;

pub use client::{CatalogClient, CatalogError};
pub use in_memory::{CatalogCall, InMemoryCatalog};
pub use model::{CastMember, Genre, Movie, MovieDetail, Video, IMAGE_BASE_URL, TOP_CAST};
#[cfg(feature = "client")]
pub use tmdb::TmdbClient;
