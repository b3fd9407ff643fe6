//! TMDB v3 catalog client.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::client::{CatalogClient, CatalogError};
use super::model::{CastMember, Genre, Movie, MovieDetail, Video};
use crate::config::CatalogConfig;

/// Catalog client speaking the TMDB v3 REST API.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct ResultsPage {
    #[serde(default)]
    results: Vec<Movie>,
}

#[derive(Deserialize)]
struct GenreList {
    #[serde(default)]
    genres: Vec<Genre>,
}

#[derive(Deserialize)]
struct StatusBody {
    status_message: String,
}

#[derive(Deserialize, Default)]
struct Credits {
    #[serde(default)]
    cast: Vec<CastMember>,
}

#[derive(Deserialize, Default)]
struct Videos {
    #[serde(default)]
    results: Vec<Video>,
}

/// `/movie/{id}?append_to_response=credits,videos` payload.
#[derive(Deserialize)]
struct DetailBody {
    #[serde(flatten)]
    movie: Movie,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<Genre>,
    #[serde(default)]
    credits: Credits,
    #[serde(default)]
    videos: Videos,
}

impl From<DetailBody> for MovieDetail {
    fn from(body: DetailBody) -> Self {
        let mut movie = body.movie;
        if movie.genre_ids.is_empty() {
            movie.genre_ids = body.genres.iter().map(|g| g.id).collect();
        }
        MovieDetail {
            movie,
            overview: body.overview,
            runtime: body.runtime,
            genres: body.genres,
            cast: body.credits.cast,
            videos: body.videos.results,
        }
    }
}

impl TmdbClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str, extra: &str) -> String {
        format!(
            "{}{}?api_key={}{}",
            self.base_url,
            path,
            urlencoding::encode(&self.api_key),
            extra
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, extra: &str) -> Result<T, CatalogError> {
        debug!(path, "catalog request");
        let response = self
            .client
            .get(self.url(path, extra))
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<StatusBody>(&body)
                .map(|b| b.status_message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                });
            warn!(path, status = status.as_u16(), %message, "catalog request rejected");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CatalogClient for TmdbClient {
    async fn fetch_trending(&self) -> Result<Vec<Movie>, CatalogError> {
        let page: ResultsPage = self.get_json("/trending/movie/week", "").await?;
        Ok(page.results)
    }

    async fn search(&self, query: &str) -> Result<Vec<Movie>, CatalogError> {
        let extra = format!("&query={}", urlencoding::encode(query));
        let page: ResultsPage = self.get_json("/search/movie", &extra).await?;
        Ok(page.results)
    }

    async fn fetch_genres(&self) -> Result<Vec<Genre>, CatalogError> {
        let list: GenreList = self.get_json("/genre/movie/list", "").await?;
        Ok(list.genres)
    }

    async fn fetch_detail(&self, id: u64) -> Result<MovieDetail, CatalogError> {
        let path = format!("/movie/{}", id);
        let body: DetailBody = self
            .get_json(&path, "&append_to_response=credits,videos")
            .await?;
        Ok(body.into())
    }
}
