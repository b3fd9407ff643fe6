//! Catalog data: movies, genres, cast and videos as the catalog returns them.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Base URL for poster and profile images (w500 rendition).
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Number of cast members shown on a detail view.
pub const TOP_CAST: usize = 10;

/// A movie as it appears in trending and search listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl Movie {
    /// A movie with only an id and title set. Handy for fixtures.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            release_date: None,
            poster_path: None,
            popularity: 0.0,
            vote_average: 0.0,
            genre_ids: Vec::new(),
        }
    }

    pub fn has_genre(&self, genre_id: u32) -> bool {
        self.genre_ids.contains(&genre_id)
    }

    pub fn poster_url(&self) -> Option<String> {
        image_url(self.poster_path.as_deref())
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|date| date.year())
    }

    /// Rating with one decimal, e.g. `"7.4"`.
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.vote_average)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

impl Genre {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

impl CastMember {
    pub fn profile_url(&self) -> Option<String> {
        image_url(self.profile_path.as_deref())
    }
}

/// A video reference attached to a movie (trailers, teasers, clips).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub key: String,
}

impl Video {
    pub fn is_youtube_trailer(&self) -> bool {
        self.site == "YouTube" && self.kind == "Trailer"
    }

    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.key)
    }
}

/// A movie fetched in detail mode: listing fields plus overview, runtime,
/// named genres, cast and videos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub movie: Movie,
    pub overview: Option<String>,
    pub runtime: Option<u32>,
    pub genres: Vec<Genre>,
    pub cast: Vec<CastMember>,
    pub videos: Vec<Video>,
}

impl MovieDetail {
    pub fn id(&self) -> u64 {
        self.movie.id
    }

    /// Overview text, or the placeholder shown when the catalog has none.
    pub fn overview_or_default(&self) -> &str {
        match self.overview.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => "No overview available.",
        }
    }

    /// Runtime as `"2h 5m"`.
    pub fn runtime_label(&self) -> Option<String> {
        self.runtime
            .map(|minutes| format!("{}h {}m", minutes / 60, minutes % 60))
    }

    pub fn top_cast(&self) -> &[CastMember] {
        let end = self.cast.len().min(TOP_CAST);
        &self.cast[..end]
    }

    /// First YouTube trailer, if any.
    pub fn trailer(&self) -> Option<&Video> {
        self.videos.iter().find(|video| video.is_youtube_trailer())
    }
}

fn image_url(path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{}{}", IMAGE_BASE_URL, p))
}

/// The catalog sends `""` for unknown release dates; treat that and any
/// unparseable value as absent.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()))
}
