//! BrowseState - the movie browse view-model.
//!
//! Pure and synchronous. Operations update parameters, recompute the visible
//! set and hand back the fetches they want issued. Whoever runs the fetches
//! reports back through `on_fetch_succeeded`, `on_fetch_failed`,
//! `on_genres_loaded` and `on_detail_loaded`, quoting the request's ticket.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use super::filter::GenreFilter;
use super::sort::SortKey;
use crate::catalog::{Genre, Movie, MovieDetail};

pub const PAGE_SIZE: usize = 12;

/// Queries shorter than this neither search nor refresh.
pub const MIN_SEARCH_CHARS: usize = 3;

/// Identifies one issued fetch. Tickets grow monotonically per state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a fetch asks the catalog for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch {
    Trending,
    Search(String),
    Genres,
    Detail(u64),
}

impl Fetch {
    /// Trending and search both replace the working set.
    pub fn is_listing(&self) -> bool {
        matches!(self, Fetch::Trending | Fetch::Search(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub fetch: Fetch,
}

/// Which listing the working set came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchMode {
    #[default]
    Trending,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailVisibility {
    Closed,
    Loading,
    Open,
}

#[derive(Debug, Clone)]
pub struct BrowseState {
    working_set: Vec<Movie>,
    visible_set: Vec<Movie>,
    active_filter: GenreFilter,
    active_sort: SortKey,
    search_query: String,
    page_index: usize,
    mode: FetchMode,
    selected_movie_id: Option<u64>,
    detail_ticket: Option<FetchTicket>,
    detail: Option<MovieDetail>,
    genres: Vec<Genre>,
    error: Option<String>,
    in_flight: BTreeMap<FetchTicket, Fetch>,
    resolved_listing: Option<FetchTicket>,
    last_listing: Fetch,
    next_ticket: u64,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowseState {
    /// Fresh state: all genres, most popular first, trending mode, page 1.
    pub fn new() -> Self {
        Self {
            working_set: Vec::new(),
            visible_set: Vec::new(),
            active_filter: GenreFilter::All,
            active_sort: SortKey::PopularityDesc,
            search_query: String::new(),
            page_index: 1,
            mode: FetchMode::Trending,
            selected_movie_id: None,
            detail_ticket: None,
            detail: None,
            genres: Vec::new(),
            error: None,
            in_flight: BTreeMap::new(),
            resolved_listing: None,
            last_listing: Fetch::Trending,
            next_ticket: 1,
        }
    }

    /// Initial fetches: trending listing and the genre list.
    pub fn mount(&mut self) -> Vec<FetchRequest> {
        vec![self.issue(Fetch::Trending), self.issue(Fetch::Genres)]
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Store the query. Three or more characters search, an empty query
    /// refreshes trending, anything in between only updates the text.
    pub fn set_search_query(&mut self, text: impl Into<String>) -> Option<FetchRequest> {
        let text = text.into();
        if text != self.search_query {
            self.page_index = 1;
        }
        self.search_query = text;

        let chars = self.search_query.chars().count();
        if chars >= MIN_SEARCH_CHARS {
            Some(self.issue(Fetch::Search(self.search_query.clone())))
        } else if chars == 0 {
            Some(self.issue(Fetch::Trending))
        } else {
            None
        }
    }

    /// Replace the working set with a listing result.
    ///
    /// Returns false when the ticket is unknown or a newer listing has
    /// already resolved, successfully or not; the result is dropped then.
    pub fn on_fetch_succeeded(&mut self, ticket: FetchTicket, movies: Vec<Movie>) -> bool {
        let mode = match self.in_flight.remove(&ticket) {
            Some(Fetch::Trending) => FetchMode::Trending,
            Some(Fetch::Search(_)) => FetchMode::Search,
            Some(other) => {
                self.in_flight.insert(ticket, other);
                return false;
            }
            None => return false,
        };

        if self.resolved_listing.is_some_and(|resolved| resolved > ticket) {
            debug!(%ticket, "dropping stale listing result");
            return false;
        }

        debug!(%ticket, ?mode, count = movies.len(), "listing applied");
        self.resolved_listing = Some(ticket);
        self.mode = mode;
        self.working_set = movies;
        self.page_index = 1;
        self.error = None;
        self.recompute();
        true
    }

    /// Record a failed fetch for display. Stale failures are ignored; a
    /// failed detail fetch closes the detail view. A failed listing still
    /// counts as resolved, so older listings arriving later are dropped.
    /// Genre failures only leave the genre list empty.
    pub fn on_fetch_failed(&mut self, ticket: FetchTicket, message: impl Into<String>) -> bool {
        let Some(fetch) = self.in_flight.remove(&ticket) else {
            return false;
        };

        let current = match fetch {
            Fetch::Trending | Fetch::Search(_) => {
                let current = !self.resolved_listing.is_some_and(|resolved| resolved > ticket);
                if current {
                    self.resolved_listing = Some(ticket);
                }
                current
            }
            Fetch::Detail(_) => {
                let current = self.detail_ticket == Some(ticket);
                if current {
                    self.close_detail();
                }
                current
            }
            Fetch::Genres => {
                warn!(%ticket, "genre list unavailable");
                false
            }
        };

        if current {
            self.error = Some(message.into());
        }
        current
    }

    pub fn on_genres_loaded(&mut self, ticket: FetchTicket, genres: Vec<Genre>) -> bool {
        match self.in_flight.remove(&ticket) {
            Some(Fetch::Genres) => {
                self.genres = genres;
                true
            }
            Some(other) => {
                self.in_flight.insert(ticket, other);
                false
            }
            None => false,
        }
    }

    /// Filter the current working set; never re-fetches.
    pub fn set_filter(&mut self, filter: impl Into<GenreFilter>) {
        self.active_filter = filter.into();
        self.page_index = 1;
        self.recompute();
    }

    /// Re-sort the visible set. The current page is kept.
    pub fn set_sort(&mut self, key: SortKey) {
        self.active_sort = key;
        self.recompute();
    }

    /// Back to all genres and trending mode.
    pub fn clear_filters(&mut self) -> FetchRequest {
        self.set_filter(GenreFilter::All);
        self.search_query.clear();
        self.page_index = 1;
        self.issue(Fetch::Trending)
    }

    /// Open the detail view for `id`, replacing any previous selection.
    pub fn select_movie(&mut self, id: u64) -> FetchRequest {
        let request = self.issue(Fetch::Detail(id));
        self.selected_movie_id = Some(id);
        self.detail = None;
        self.detail_ticket = Some(request.ticket);
        request
    }

    /// Show a detail result if it answers the current selection.
    pub fn on_detail_loaded(&mut self, ticket: FetchTicket, detail: MovieDetail) -> bool {
        let fetch = self.in_flight.remove(&ticket);
        if !matches!(fetch, Some(Fetch::Detail(_))) {
            if let Some(other) = fetch {
                self.in_flight.insert(ticket, other);
            }
            return false;
        }

        if self.detail_ticket != Some(ticket) || self.selected_movie_id != Some(detail.id()) {
            debug!(%ticket, id = detail.id(), "dropping detail for closed or replaced selection");
            return false;
        }

        self.detail = Some(detail);
        true
    }

    /// Close the detail view whatever the state of its fetch.
    pub fn close_detail(&mut self) {
        self.selected_movie_id = None;
        self.detail_ticket = None;
        self.detail = None;
    }

    /// Jump to a 1-based page. Not clamped: pages past the end are empty.
    pub fn paginate(&mut self, page: usize) {
        self.page_index = page;
    }

    /// Re-issue the last listing fetch (trending, or the search that ran).
    pub fn retry(&mut self) -> FetchRequest {
        self.error = None;
        let fetch = self.last_listing.clone();
        self.issue(fetch)
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    pub fn working_set(&self) -> &[Movie] {
        &self.working_set
    }

    /// Filtered and sorted working set, before pagination.
    pub fn visible_set(&self) -> &[Movie] {
        &self.visible_set
    }

    pub fn visible_page(&self) -> &[Movie] {
        if self.page_index == 0 {
            return &[];
        }
        let len = self.visible_set.len();
        let start = match (self.page_index - 1).checked_mul(PAGE_SIZE) {
            Some(start) if start < len => start,
            _ => return &[],
        };
        let end = (start + PAGE_SIZE).min(len);
        &self.visible_set[start..end]
    }

    pub fn page_count(&self) -> usize {
        self.visible_set.len().div_ceil(PAGE_SIZE)
    }

    /// `(shown on this page, visible in total)`.
    pub fn showing_summary(&self) -> (usize, usize) {
        (self.visible_page().len(), self.visible_set.len())
    }

    /// Whether a search or a genre filter is narrowing the results.
    pub fn has_active_filters(&self) -> bool {
        !self.search_query.is_empty() || !self.active_filter.is_all()
    }

    pub fn active_filter(&self) -> GenreFilter {
        self.active_filter
    }

    pub fn active_sort(&self) -> SortKey {
        self.active_sort
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn fetch_mode(&self) -> FetchMode {
        self.mode
    }

    pub fn selected_movie_id(&self) -> Option<u64> {
        self.selected_movie_id
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        self.detail.as_ref()
    }

    pub fn detail_visibility(&self) -> DetailVisibility {
        match (self.selected_movie_id, &self.detail) {
            (None, _) => DetailVisibility::Closed,
            (Some(_), None) => DetailVisibility::Loading,
            (Some(_), Some(_)) => DetailVisibility::Open,
        }
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn genre_name(&self, id: u32) -> Option<&str> {
        self.genres
            .iter()
            .find(|genre| genre.id == id)
            .map(|genre| genre.name.as_str())
    }

    /// Side-channel error from the last failed fetch.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A trending or search fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.values().any(Fetch::is_listing)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn issue(&mut self, fetch: Fetch) -> FetchRequest {
        let ticket = FetchTicket(self.next_ticket);
        self.next_ticket += 1;
        if fetch.is_listing() {
            self.last_listing = fetch.clone();
        }
        debug!(%ticket, ?fetch, "fetch issued");
        self.in_flight.insert(ticket, fetch.clone());
        FetchRequest { ticket, fetch }
    }

    fn recompute(&mut self) {
        let filter = self.active_filter;
        let mut visible: Vec<Movie> = self
            .working_set
            .iter()
            .filter(|movie| filter.matches(movie))
            .cloned()
            .collect();
        self.active_sort.sort(&mut visible);
        self.visible_set = visible;
    }
}
