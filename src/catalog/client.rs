use std::fmt;

use async_trait::async_trait;

use super::model::{Genre, Movie, MovieDetail};

/// Error type for catalog fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The request never produced a response (connect, timeout, TLS).
    Transport(String),
    /// The catalog answered with a non-success status.
    Status { status: u16, message: String },
    /// The response body could not be decoded.
    Decode(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Transport(msg) => write!(f, "catalog unreachable: {}", msg),
            CatalogError::Status { status, message } => {
                write!(f, "catalog returned {}: {}", status, message)
            }
            CatalogError::Decode(msg) => write!(f, "catalog response malformed: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decode(err.to_string())
    }
}

/// Remote movie catalog.
///
/// Implementations must be shareable across tasks: the browse driver holds
/// one behind an `Arc` and calls it from concurrently running fetches.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Default popularity-ranked slice of the catalog.
    async fn fetch_trending(&self) -> Result<Vec<Movie>, CatalogError>;

    /// Free-text title search.
    async fn search(&self, query: &str) -> Result<Vec<Movie>, CatalogError>;

    async fn fetch_genres(&self) -> Result<Vec<Genre>, CatalogError>;

    /// Movie with cast and videos appended.
    async fn fetch_detail(&self, id: u64) -> Result<MovieDetail, CatalogError>;
}
