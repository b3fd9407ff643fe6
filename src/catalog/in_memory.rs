//! InMemoryCatalog - canned catalog for tests and offline development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use super::client::{CatalogClient, CatalogError};
use super::model::{Genre, Movie, MovieDetail};

/// A call observed by an [`InMemoryCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCall {
    Trending,
    Search(String),
    Genres,
    Detail(u64),
}

#[derive(Default)]
struct Inner {
    trending: Vec<Movie>,
    searches: HashMap<String, Vec<Movie>>,
    genres: Vec<Genre>,
    details: HashMap<u64, MovieDetail>,
    delays: HashMap<String, Duration>,
    failure: Option<CatalogError>,
    calls: Vec<CatalogCall>,
}

/// Catalog backed by in-process data.
///
/// Unknown searches answer with an empty list; unknown detail ids answer with
/// a 404 status error. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trending(self, movies: Vec<Movie>) -> Self {
        self.write(|inner| inner.trending = movies);
        self
    }

    pub fn with_search(self, query: impl Into<String>, movies: Vec<Movie>) -> Self {
        let query = query.into();
        self.write(|inner| {
            inner.searches.insert(query, movies);
        });
        self
    }

    pub fn with_genres(self, genres: Vec<Genre>) -> Self {
        self.write(|inner| inner.genres = genres);
        self
    }

    pub fn with_detail(self, detail: MovieDetail) -> Self {
        self.write(|inner| {
            inner.details.insert(detail.id(), detail);
        });
        self
    }

    /// Delay answers to the given search query.
    pub fn with_search_delay(self, query: impl Into<String>, delay: Duration) -> Self {
        let query = query.into();
        self.write(|inner| {
            inner.delays.insert(query, delay);
        });
        self
    }

    /// Make every subsequent call fail with `error`, or succeed again with `None`.
    pub fn set_failure(&self, error: Option<CatalogError>) {
        self.write(|inner| inner.failure = error);
    }

    /// Every call made so far, in issue order.
    pub fn calls(&self) -> Vec<CatalogCall> {
        self.inner
            .read()
            .map(|inner| inner.calls.clone())
            .unwrap_or_default()
    }

    fn write(&self, f: impl FnOnce(&mut Inner)) {
        if let Ok(mut inner) = self.inner.write() {
            f(&mut inner);
        }
    }

    fn record(&self, call: CatalogCall) -> Result<(), CatalogError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| CatalogError::Transport("catalog lock poisoned".into()))?;
        inner.calls.push(call);
        match &inner.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Inner) -> T) -> Result<T, CatalogError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| CatalogError::Transport("catalog lock poisoned".into()))?;
        Ok(f(&inner))
    }
}

#[async_trait]
impl CatalogClient for InMemoryCatalog {
    async fn fetch_trending(&self) -> Result<Vec<Movie>, CatalogError> {
        self.record(CatalogCall::Trending)?;
        self.read(|inner| inner.trending.clone())
    }

    async fn search(&self, query: &str) -> Result<Vec<Movie>, CatalogError> {
        self.record(CatalogCall::Search(query.to_string()))?;
        let delay = self.read(|inner| inner.delays.get(query).copied())?;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.read(|inner| inner.searches.get(query).cloned().unwrap_or_default())
    }

    async fn fetch_genres(&self) -> Result<Vec<Genre>, CatalogError> {
        self.record(CatalogCall::Genres)?;
        self.read(|inner| inner.genres.clone())
    }

    async fn fetch_detail(&self, id: u64) -> Result<MovieDetail, CatalogError> {
        self.record(CatalogCall::Detail(id))?;
        self.read(|inner| inner.details.get(&id).cloned())?
            .ok_or_else(|| CatalogError::Status {
                status: 404,
                message: "The resource you requested could not be found.".into(),
            })
    }
}
