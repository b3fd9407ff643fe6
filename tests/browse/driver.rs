//! Browser against an in-memory catalog.

use std::sync::Arc;
use std::time::Duration;

use movie_corner::browse::{BrowseError, Browser, DetailVisibility, FetchMode, SortKey};
use async_trait::async_trait;
use movie_corner::catalog::{
    CatalogCall, CatalogClient, CatalogError, Genre, InMemoryCatalog, Movie, MovieDetail,
};
use movie_corner::session::{AuthSession, MemorySessionStore, SessionStore, TOKEN_KEY, USER_KEY};

use crate::support::{catalog, logged_in_session, ACTION};

#[tokio::test]
async fn mount_requires_login() {
    let session = AuthSession::new(Arc::new(MemorySessionStore::new()));
    let result = Browser::mount(Arc::new(catalog()), session);
    assert!(matches!(result, Err(BrowseError::Unauthenticated)));

    let store = Arc::new(MemorySessionStore::new());
    store.set(USER_KEY, "{not json").unwrap();
    store.set(TOKEN_KEY, "jwt").unwrap();
    let result = Browser::mount(Arc::new(catalog()), AuthSession::new(store));
    assert!(matches!(result, Err(BrowseError::Unauthenticated)));
}

#[tokio::test]
async fn mount_loads_trending_and_genres() {
    let catalog = Arc::new(catalog());
    let mut browser = Browser::mount(catalog.clone(), logged_in_session()).unwrap();
    assert_eq!(browser.outstanding(), 2);

    browser.settle().await;

    let state = browser.state();
    assert_eq!(state.working_set().len(), 25);
    assert_eq!(state.visible_page().len(), 12);
    assert_eq!(state.genre_name(ACTION), Some("Action"));
    assert!(!state.is_loading());

    let calls = catalog.calls();
    assert!(calls.contains(&CatalogCall::Trending));
    assert!(calls.contains(&CatalogCall::Genres));
}

#[tokio::test]
async fn search_then_sort() {
    let mut browser = Browser::mount(Arc::new(catalog()), logged_in_session()).unwrap();
    browser.settle().await;

    browser.set_search_query("alien");
    browser.set_sort(SortKey::RatingDesc);
    browser.settle().await;

    let state = browser.state();
    assert_eq!(state.fetch_mode(), FetchMode::Search);
    assert_eq!(state.visible_set().len(), 1);
    assert_eq!(state.visible_set()[0].title, "Alien");
}

#[tokio::test]
async fn slow_search_does_not_overwrite_newer_trending() {
    let catalog = catalog().with_search_delay("alien", Duration::from_millis(200));
    let mut browser = Browser::mount(Arc::new(catalog), logged_in_session()).unwrap();
    browser.settle().await;

    browser.set_search_query("alien");
    browser.set_search_query("");
    browser.settle().await;

    let state = browser.state();
    assert_eq!(state.fetch_mode(), FetchMode::Trending);
    assert_eq!(state.working_set().len(), 25);
}

#[tokio::test]
async fn closing_detail_before_it_arrives_keeps_it_closed() {
    let mut browser = Browser::mount(Arc::new(catalog()), logged_in_session()).unwrap();
    browser.settle().await;

    browser.select_movie(42);
    browser.close_detail();
    browser.settle().await;

    assert_eq!(browser.state().selected_movie_id(), None);
    assert_eq!(browser.state().detail_visibility(), DetailVisibility::Closed);
}

#[tokio::test]
async fn selected_detail_opens() {
    let mut browser = Browser::mount(Arc::new(catalog()), logged_in_session()).unwrap();
    browser.settle().await;

    browser.select_movie(42);
    browser.settle().await;

    let state = browser.state();
    assert_eq!(state.detail_visibility(), DetailVisibility::Open);
    let detail = state.detail().unwrap();
    assert_eq!(detail.runtime_label().as_deref(), Some("2h 5m"));
    assert_eq!(
        detail.trailer().map(|v| v.embed_url()).as_deref(),
        Some("https://www.youtube.com/embed/abc123")
    );
}

#[tokio::test]
async fn failure_then_retry() {
    let catalog = Arc::new(catalog());
    catalog.set_failure(Some(CatalogError::Transport("connection refused".into())));

    let mut browser = Browser::mount(catalog.clone(), logged_in_session()).unwrap();
    browser.settle().await;
    assert!(browser.state().error().is_some());
    assert!(browser.state().working_set().is_empty());

    catalog.set_failure(None);
    browser.retry();
    browser.settle().await;

    assert_eq!(browser.state().error(), None);
    assert_eq!(browser.state().working_set().len(), 25);
}

#[tokio::test]
async fn filter_sort_and_paging_stay_local() {
    let catalog = Arc::new(catalog());
    let mut browser = Browser::mount(catalog.clone(), logged_in_session()).unwrap();
    browser.settle().await;
    let before = catalog.calls();

    browser.set_filter(ACTION);
    browser.set_sort(SortKey::RatingDesc);
    browser.paginate(2);

    assert_eq!(browser.outstanding(), 0);
    assert_eq!(catalog.calls(), before);
}

/// Delegates to an in-memory catalog but panics on every search.
struct PanickingSearch(InMemoryCatalog);

#[async_trait]
impl CatalogClient for PanickingSearch {
    async fn fetch_trending(&self) -> Result<Vec<Movie>, CatalogError> {
        self.0.fetch_trending().await
    }

    async fn search(&self, _query: &str) -> Result<Vec<Movie>, CatalogError> {
        panic!("search blew up");
    }

    async fn fetch_genres(&self) -> Result<Vec<Genre>, CatalogError> {
        self.0.fetch_genres().await
    }

    async fn fetch_detail(&self, id: u64) -> Result<MovieDetail, CatalogError> {
        self.0.fetch_detail(id).await
    }
}

#[tokio::test]
async fn panicking_fetch_still_settles() {
    let mut browser =
        Browser::mount(Arc::new(PanickingSearch(catalog())), logged_in_session()).unwrap();
    browser.settle().await;

    browser.set_search_query("alien");
    tokio::time::timeout(Duration::from_secs(5), browser.settle())
        .await
        .expect("settle hung on a panicked fetch");

    assert_eq!(browser.outstanding(), 0);
    assert!(browser.state().error().is_some());
    assert_eq!(browser.state().working_set().len(), 25);
}
