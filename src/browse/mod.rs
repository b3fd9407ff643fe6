//! Browse - the movie collection view-model and its driver.
//!
//! [`BrowseState`] owns the working set and the filter, sort, search, page
//! and selection parameters. The visible set is always
//! `sort(filter(working_set))`, recomputed on every change and paginated
//! twelve at a time. [`Browser`] wires the state to a catalog client.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use movie_corner::browse::{Browser, SortKey};
//! use movie_corner::catalog::InMemoryCatalog;
//!
//! let mut browser = Browser::mount(Arc::new(catalog), session)?;
//! browser.settle().await;
//!
//! browser.set_search_query("alien");
//! browser.set_sort(SortKey::RatingDesc);
//! browser.settle().await;
//!
//! for movie in browser.state().visible_page() {
//!     println!("{} ({})", movie.title, movie.rating_label());
//! }
//! ```

mod driver;
mod filter;
mod sort;
mod state;

pub use driver::{BrowseError, Browser, Completion, Outcome};
pub use filter::{GenreFilter, ParseFilterError};
pub use sort::{ParseSortError, SortKey};
pub use state::{
    BrowseState, DetailVisibility, Fetch, FetchMode, FetchRequest, FetchTicket, MIN_SEARCH_CHARS,
    PAGE_SIZE,
};
