use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::catalog::Movie;

/// Ordering applied to the filtered working set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    PopularityDesc,
    PopularityAsc,
    RatingDesc,
    RatingAsc,
    ReleaseDateDesc,
    ReleaseDateAsc,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::PopularityDesc,
        SortKey::PopularityAsc,
        SortKey::RatingDesc,
        SortKey::RatingAsc,
        SortKey::ReleaseDateDesc,
        SortKey::ReleaseDateAsc,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PopularityDesc => "popularity.desc",
            SortKey::PopularityAsc => "popularity.asc",
            SortKey::RatingDesc => "vote_average.desc",
            SortKey::RatingAsc => "vote_average.asc",
            SortKey::ReleaseDateDesc => "release_date.desc",
            SortKey::ReleaseDateAsc => "release_date.asc",
            SortKey::TitleAsc => "title.asc",
            SortKey::TitleDesc => "title.desc",
        }
    }

    /// Human label for a sort picker.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::PopularityDesc => "Popularity (High to Low)",
            SortKey::PopularityAsc => "Popularity (Low to High)",
            SortKey::RatingDesc => "Rating (High to Low)",
            SortKey::RatingAsc => "Rating (Low to High)",
            SortKey::ReleaseDateDesc => "Release Date (Newest)",
            SortKey::ReleaseDateAsc => "Release Date (Oldest)",
            SortKey::TitleAsc => "Title (A-Z)",
            SortKey::TitleDesc => "Title (Z-A)",
        }
    }

    pub fn compare(&self, a: &Movie, b: &Movie) -> Ordering {
        match self {
            SortKey::PopularityDesc => b.popularity.total_cmp(&a.popularity),
            SortKey::PopularityAsc => a.popularity.total_cmp(&b.popularity),
            SortKey::RatingDesc => b.vote_average.total_cmp(&a.vote_average),
            SortKey::RatingAsc => a.vote_average.total_cmp(&b.vote_average),
            SortKey::ReleaseDateDesc => release_date(b).cmp(&release_date(a)),
            SortKey::ReleaseDateAsc => release_date(a).cmp(&release_date(b)),
            SortKey::TitleAsc => compare_titles(&a.title, &b.title),
            SortKey::TitleDesc => compare_titles(&b.title, &a.title),
        }
    }

    /// Stable sort, so equal keys keep their catalog order.
    pub fn sort(&self, movies: &mut [Movie]) {
        movies.sort_by(|a, b| self.compare(a, b));
    }
}

/// Missing release dates sort as the oldest possible date.
fn release_date(movie: &Movie) -> NaiveDate {
    movie.release_date.unwrap_or(NaiveDate::MIN)
}

/// Case-insensitive first, code points break ties.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortError(pub String);

impl fmt::Display for ParseSortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort key: {:?}", self.0)
    }
}

impl std::error::Error for ParseSortError {}

impl FromStr for SortKey {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseSortError(s.to_string()))
    }
}
