//! Browser - runs the view-model's fetches against a catalog.
//!
//! Every fetch becomes its own tokio task, so a detail fetch can be in flight
//! next to a listing refresh. Completions come back over a channel and are
//! applied one at a time on the owning task; tickets decide whether a late
//! answer still counts.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::filter::GenreFilter;
use super::sort::SortKey;
use super::state::{BrowseState, Fetch, FetchRequest, FetchTicket};
use crate::catalog::{CatalogClient, CatalogError, Genre, Movie, MovieDetail};
use crate::session::AuthSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseError {
    /// Browsing requires a logged-in user.
    Unauthenticated,
}

impl fmt::Display for BrowseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowseError::Unauthenticated => write!(f, "login required to browse movies"),
        }
    }
}

impl std::error::Error for BrowseError {}

/// Payload of a successful fetch.
#[derive(Debug, Clone)]
pub enum Outcome {
    Movies(Vec<Movie>),
    Genres(Vec<Genre>),
    Detail(MovieDetail),
}

/// A finished fetch, tagged with the ticket it was issued under.
#[derive(Debug)]
pub struct Completion {
    pub ticket: FetchTicket,
    pub result: Result<Outcome, CatalogError>,
}

pub struct Browser<C> {
    state: BrowseState,
    catalog: Arc<C>,
    session: AuthSession,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    outstanding: usize,
}

impl<C: CatalogClient + 'static> Browser<C> {
    /// Mount the browse view for the session's user and start the initial
    /// trending and genre fetches. Must be called inside a tokio runtime.
    pub fn mount(catalog: Arc<C>, session: AuthSession) -> Result<Self, BrowseError> {
        if !session.is_authenticated() {
            return Err(BrowseError::Unauthenticated);
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let mut browser = Self {
            state: BrowseState::new(),
            catalog,
            session,
            tx,
            rx,
            outstanding: 0,
        };
        for request in browser.state.mount() {
            browser.spawn(request);
        }
        Ok(browser)
    }

    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn set_search_query(&mut self, text: impl Into<String>) {
        if let Some(request) = self.state.set_search_query(text) {
            self.spawn(request);
        }
    }

    pub fn set_filter(&mut self, filter: impl Into<GenreFilter>) {
        self.state.set_filter(filter);
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.state.set_sort(key);
    }

    pub fn clear_filters(&mut self) {
        let request = self.state.clear_filters();
        self.spawn(request);
    }

    pub fn select_movie(&mut self, id: u64) {
        let request = self.state.select_movie(id);
        self.spawn(request);
    }

    pub fn close_detail(&mut self) {
        self.state.close_detail();
    }

    pub fn paginate(&mut self, page: usize) {
        self.state.paginate(page);
    }

    pub fn retry(&mut self) {
        let request = self.state.retry();
        self.spawn(request);
    }

    /// Fetches spawned but not yet applied.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Wait for the next fetch to finish and apply it. Returns `None` when
    /// nothing is outstanding, otherwise whether the result was applied.
    pub async fn next_completion(&mut self) -> Option<bool> {
        if self.outstanding == 0 {
            return None;
        }
        let completion = self.rx.recv().await?;
        self.outstanding -= 1;
        Some(self.apply(completion))
    }

    /// Apply completions until no fetch is outstanding.
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    /// Tell the backend and clear the session. The view stays mounted until
    /// the caller drops it.
    #[cfg(feature = "client")]
    pub async fn logout(
        &self,
        client: &crate::session::AuthClient,
    ) -> Result<(), crate::session::ClientError> {
        client.sign_out().await
    }

    fn apply(&mut self, completion: Completion) -> bool {
        let Completion { ticket, result } = completion;
        match result {
            Ok(Outcome::Movies(movies)) => self.state.on_fetch_succeeded(ticket, movies),
            Ok(Outcome::Genres(genres)) => self.state.on_genres_loaded(ticket, genres),
            Ok(Outcome::Detail(detail)) => self.state.on_detail_loaded(ticket, detail),
            Err(err) => {
                warn!(%ticket, error = %err, "catalog fetch failed");
                self.state.on_fetch_failed(ticket, err.to_string())
            }
        }
    }

    fn spawn(&mut self, request: FetchRequest) {
        let catalog = Arc::clone(&self.catalog);
        let tx = self.tx.clone();
        self.outstanding += 1;

        tokio::spawn(async move {
            let FetchRequest { ticket, fetch } = request;
            // A panicking catalog must still produce a completion.
            let result = match tokio::spawn(run_fetch(catalog, fetch)).await {
                Ok(result) => result,
                Err(err) => Err(CatalogError::Transport(format!("fetch task failed: {}", err))),
            };
            if tx.send(Completion { ticket, result }).is_err() {
                debug!(%ticket, "browser dropped before fetch finished");
            }
        });
    }
}

async fn run_fetch<C: CatalogClient + 'static>(
    catalog: Arc<C>,
    fetch: Fetch,
) -> Result<Outcome, CatalogError> {
    match fetch {
        Fetch::Trending => catalog.fetch_trending().await.map(Outcome::Movies),
        Fetch::Search(query) => catalog.search(&query).await.map(Outcome::Movies),
        Fetch::Genres => catalog.fetch_genres().await.map(Outcome::Genres),
        Fetch::Detail(id) => catalog.fetch_detail(id).await.map(Outcome::Detail),
    }
}
