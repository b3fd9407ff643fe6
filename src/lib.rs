//! Movie Corner - browse trending movies from a TMDB-style catalog, backed by
//! a small bearer-token auth service.
//!
//! - [`browse`]: the browse view-model and its async driver.
//! - [`catalog`]: the catalog client trait, TMDB client and an in-memory catalog.
//! - [`session`]: the explicit auth session, its persistence and the auth client.
//! - [`server`]: the `/auth` backend (feature `http`).

pub mod browse;
pub mod catalog;
pub mod config;
pub mod forms;
pub mod routes;
#[cfg(feature = "http")]
pub mod server;
pub mod session;
pub mod store;
pub mod wire;

pub use browse::{BrowseError, BrowseState, Browser, GenreFilter, SortKey};
pub use catalog::{CatalogClient, CatalogError, Genre, InMemoryCatalog, Movie, MovieDetail};
pub use config::{CatalogConfig, ClientConfig, ConfigError};
pub use forms::{FieldErrors, LoginForm, RegisterForm};
pub use routes::{gate, Route, RouteDecision};
pub use session::{AuthSession, FileSessionStore, MemorySessionStore, SessionStore};
#[cfg(feature = "client")]
pub use session::{AuthClient, ClientError};
pub use wire::{LoginResponse, MessageResponse, SessionUser};
