use std::fmt::Display;
use std::str::FromStr;

use crate::error::AppError;

/// Sentinel rendered in place of a missing provider field
pub const NOT_AVAILABLE: &str = "N/A";

/// Fallback title when the provider omits one
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Fallback release year for watchlist entries added without one
pub const UNKNOWN_YEAR: &str = "Unknown";

/// Poster shown when no artwork is available
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/200x300";

/// Genre filter offered on the recommendation form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    SciFi,
    Horror,
}

impl Genre {
    /// Every selectable genre, in form order
    pub const ALL: [Genre; 5] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::SciFi,
        Genre::Horror,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::SciFi => "Sci-Fi",
            Genre::Horror => "Horror",
        }
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = AppError;

    /// Exact match against the form labels
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|genre| genre.as_str() == s)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown genre: {}", s)))
    }
}

/// A fully resolved movie, built per lookup and never persisted as-is
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    pub poster: String,
    /// Average vote, `None` when the provider has none
    pub rating: Option<f64>,
    pub genre: String,
    pub popularity: Option<f64>,
    /// Four-digit year or [`NOT_AVAILABLE`]
    pub release_year: String,
    pub language: String,
    /// Up to five names joined by ", "
    pub cast: String,
    /// YouTube embed URL of the first official trailer
    pub trailer: Option<String>,
}

/// Formats an optional score for display, substituting the sentinel
pub fn display_score(score: Option<f64>) -> String {
    match score {
        Some(value) => value.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}
