//! A tiny axum stand-in for the TMDB v3 API.

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

pub const API_KEY: &str = "test-key";
/// Trending answers 200 with a non-JSON body for this key.
pub const GARBLED_KEY: &str = "garbled";

type Params = Query<HashMap<String, String>>;

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "status_code": 7, "status_message": "Invalid API key: You must be granted a valid key." })),
    )
        .into_response()
}

fn authorized(params: &HashMap<String, String>) -> bool {
    params.get("api_key").map(String::as_str) == Some(API_KEY)
}

async fn trending(Query(params): Params) -> Response {
    if params.get("api_key").map(String::as_str) == Some(GARBLED_KEY) {
        return "not json".into_response();
    }
    if !authorized(&params) {
        return unauthorized();
    }
    Json(json!({
        "page": 1,
        "results": [
            { "id": 1, "title": "Heat", "release_date": "1995-12-15", "popularity": 50.5, "vote_average": 7.9, "genre_ids": [28, 80], "poster_path": "/heat.jpg" },
            { "id": 2, "title": "Untitled", "release_date": "", "popularity": 1.0, "vote_average": 0.0, "genre_ids": [] }
        ]
    }))
    .into_response()
}

async fn search(Query(params): Params) -> Response {
    if !authorized(&params) {
        return unauthorized();
    }
    let query = params.get("query").cloned().unwrap_or_default();
    Json(json!({
        "results": [{ "id": 3, "title": format!("Result for {query}"), "popularity": 2.0, "vote_average": 6.0 }]
    }))
    .into_response()
}

async fn genres(Query(params): Params) -> Response {
    if !authorized(&params) {
        return unauthorized();
    }
    Json(json!({ "genres": [{ "id": 28, "name": "Action" }, { "id": 18, "name": "Drama" }] }))
        .into_response()
}

async fn detail(Path(id): Path<u64>, Query(params): Params) -> Response {
    if !authorized(&params) {
        return unauthorized();
    }
    if id != 603 || params.get("append_to_response").map(String::as_str) != Some("credits,videos") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "status_code": 34, "status_message": "The resource you requested could not be found." })),
        )
            .into_response();
    }
    Json(json!({
        "id": 603,
        "title": "The Matrix",
        "release_date": "1999-03-30",
        "popularity": 80.0,
        "vote_average": 8.2,
        "overview": "",
        "runtime": 136,
        "genres": [{ "id": 28, "name": "Action" }, { "id": 878, "name": "Science Fiction" }],
        "credits": { "cast": [{ "id": 6384, "name": "Keanu Reeves", "character": "Neo", "profile_path": "/keanu.jpg" }] },
        "videos": { "results": [
            { "site": "YouTube", "type": "Teaser", "key": "teaser" },
            { "site": "YouTube", "type": "Trailer", "key": "trailer" }
        ] }
    }))
    .into_response()
}

/// Bind to port 0 and return the base URL.
pub async fn start() -> String {
    let app = Router::new()
        .route("/trending/movie/week", get(trending))
        .route("/search/movie", get(search))
        .route("/genre/movie/list", get(genres))
        .route("/movie/:id", get(detail));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
