use std::fmt;
use std::str::FromStr;

use crate::catalog::Movie;

/// Genre filter applied to the working set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GenreFilter {
    #[default]
    All,
    Genre(u32),
}

impl GenreFilter {
    pub fn matches(&self, movie: &Movie) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Genre(id) => movie.has_genre(*id),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, GenreFilter::All)
    }
}

impl From<u32> for GenreFilter {
    fn from(id: u32) -> Self {
        GenreFilter::Genre(id)
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreFilter::All => f.write_str("all"),
            GenreFilter::Genre(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFilterError(pub String);

impl fmt::Display for ParseFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a genre filter: {:?}", self.0)
    }
}

impl std::error::Error for ParseFilterError {}

impl FromStr for GenreFilter {
    type Err = ParseFilterError;

    /// `"all"` or a decimal genre id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "all" {
            return Ok(GenreFilter::All);
        }
        s.parse::<u32>()
            .map(GenreFilter::Genre)
            .map_err(|_| ParseFilterError(s.to_string()))
    }
}
