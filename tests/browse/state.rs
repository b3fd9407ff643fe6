//! BrowseState driven by hand: every completion is fed explicitly.

use movie_corner::browse::{
    BrowseState, DetailVisibility, Fetch, FetchMode, FetchRequest, GenreFilter, SortKey,
};

use crate::support::{detail, movies, ACTION, DRAMA};

fn loaded(count: u64) -> BrowseState {
    let mut state = BrowseState::new();
    let requests = state.mount();
    let trending = requests
        .iter()
        .find(|r| r.fetch == Fetch::Trending)
        .unwrap();
    assert!(state.on_fetch_succeeded(trending.ticket, movies(count)));
    state
}

fn search(state: &mut BrowseState, query: &str) -> FetchRequest {
    state.set_search_query(query).unwrap()
}

#[test]
fn genre_filter_keeps_only_matching_movies() {
    let mut state = loaded(25);
    state.set_filter(ACTION);

    assert!(!state.visible_set().is_empty());
    assert!(state.visible_set().iter().all(|m| m.has_genre(ACTION)));
    assert!(state.working_set().len() > state.visible_set().len());
}

#[test]
fn all_filter_is_the_sorted_working_set() {
    let mut state = loaded(25);
    state.set_filter(DRAMA);
    state.set_filter(GenreFilter::All);

    let mut expected = state.working_set().to_vec();
    state.active_sort().sort(&mut expected);
    assert_eq!(state.visible_set(), expected.as_slice());
}

#[test]
fn sorting_twice_changes_nothing() {
    for key in SortKey::ALL {
        let mut state = loaded(25);
        state.set_sort(key);
        let once = state.visible_set().to_vec();
        state.set_sort(key);
        assert_eq!(state.visible_set(), once.as_slice(), "{key}");
    }
}

#[test]
fn twenty_five_movies_make_three_pages() {
    let mut state = loaded(25);
    assert_eq!(state.page_count(), 3);

    state.paginate(3);
    assert_eq!(state.visible_page().len(), 1);
    assert_eq!(state.showing_summary(), (1, 25));

    state.paginate(4);
    assert!(state.visible_page().is_empty());
}

#[test]
fn short_queries_do_not_fetch() {
    let mut state = loaded(25);
    let before = state.working_set().to_vec();

    assert_eq!(state.set_search_query("a"), None);
    assert_eq!(state.set_search_query("ab"), None);
    assert_eq!(state.working_set(), before.as_slice());
    assert_eq!(state.search_query(), "ab");

    let request = search(&mut state, "abc");
    assert_eq!(request.fetch, Fetch::Search("abc".into()));
}

#[test]
fn clearing_filters_returns_to_trending() {
    let mut state = loaded(25);
    let request = search(&mut state, "alien");
    assert!(state.on_fetch_succeeded(request.ticket, movies(3)));
    assert_eq!(state.fetch_mode(), FetchMode::Search);
    state.set_filter(ACTION);
    state.paginate(2);

    let request = state.clear_filters();
    assert_eq!(request.fetch, Fetch::Trending);
    assert_eq!(state.search_query(), "");
    assert_eq!(state.active_filter(), GenreFilter::All);
    assert_eq!(state.page_index(), 1);
    assert!(!state.has_active_filters());
}

#[test]
fn closed_detail_is_not_reopened_by_late_result() {
    let mut state = loaded(25);
    let request = state.select_movie(42);
    assert_eq!(state.detail_visibility(), DetailVisibility::Loading);

    state.close_detail();
    assert_eq!(state.selected_movie_id(), None);

    assert!(!state.on_detail_loaded(request.ticket, detail(42, "The Answer")));
    assert_eq!(state.detail_visibility(), DetailVisibility::Closed);
    assert!(state.detail().is_none());
}

#[test]
fn earlier_selection_does_not_replace_later_one() {
    let mut state = loaded(25);
    let first = state.select_movie(42);
    let second = state.select_movie(7);

    assert!(!state.on_detail_loaded(first.ticket, detail(42, "The Answer")));
    assert_eq!(state.detail_visibility(), DetailVisibility::Loading);

    assert!(state.on_detail_loaded(second.ticket, detail(7, "Seven")));
    assert_eq!(state.detail().map(|d| d.id()), Some(7));
}

#[test]
fn stale_failure_leaves_no_banner() {
    let mut state = loaded(25);
    let older = search(&mut state, "ali");
    let newer = search(&mut state, "alien");

    assert!(state.on_fetch_succeeded(newer.ticket, movies(2)));
    assert!(!state.on_fetch_failed(older.ticket, "timeout"));
    assert_eq!(state.error(), None);
}

#[test]
fn failure_sets_banner_and_retry_repeats_search() {
    let mut state = loaded(25);
    let request = search(&mut state, "alien");
    assert!(state.on_fetch_failed(request.ticket, "catalog unavailable"));
    assert_eq!(state.error(), Some("catalog unavailable"));
    assert_eq!(state.working_set().len(), 25);

    let retry = state.retry();
    assert_eq!(retry.fetch, Fetch::Search("alien".into()));
    assert_eq!(state.error(), None);
    assert!(state.on_fetch_succeeded(retry.ticket, movies(4)));
    assert_eq!(state.working_set().len(), 4);
}

#[test]
fn older_search_after_newer_failure_is_dropped() {
    let mut state = loaded(25);
    let older = search(&mut state, "ali");
    let newer = search(&mut state, "alien");

    assert!(state.on_fetch_failed(newer.ticket, "timeout"));
    assert!(!state.on_fetch_succeeded(older.ticket, movies(3)));

    assert_eq!(state.working_set().len(), 25);
    assert_eq!(state.error(), Some("timeout"));
    assert_eq!(state.search_query(), "alien");
}

#[test]
fn genre_failure_shows_no_banner() {
    let mut state = BrowseState::new();
    let requests = state.mount();
    let genres = requests.iter().find(|r| r.fetch == Fetch::Genres).unwrap();

    assert!(!state.on_fetch_failed(genres.ticket, "boom"));
    assert_eq!(state.error(), None);
    assert!(state.genres().is_empty());
}
