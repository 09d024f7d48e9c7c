use serde::Deserialize;

use crate::error::{AppError, AppResult};

use super::movie::{NOT_AVAILABLE, PLACEHOLDER_POSTER, UNKNOWN_TITLE, UNKNOWN_YEAR};

/// A persisted watchlist row
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct WatchlistEntry {
    pub id: i64,
    pub title: String,
    pub poster: String,
    pub rating: Option<f64>,
    pub genre: String,
    pub popularity: f64,
    pub release_year: String,
    pub language: String,
    #[sqlx(rename = "top_cast")]
    pub cast: String,
}

/// A watchlist row before the store assigns its identity
#[derive(Debug, Clone, PartialEq)]
pub struct NewWatchlistEntry {
    pub title: String,
    pub poster: String,
    pub rating: Option<f64>,
    pub genre: String,
    pub popularity: f64,
    pub release_year: String,
    pub language: String,
    pub cast: String,
}

/// JSON value that may arrive as a number or as text
///
/// The browser script posts `data-*` attributes, so numbers usually show up
/// as strings and missing values as "N/A".
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LooseValue {
    Number(f64),
    Text(String),
}

impl LooseValue {
    /// Numeric reading, `None` for non-numeric text
    pub fn as_number(&self) -> Option<f64> {
        match self {
            LooseValue::Number(n) => Some(*n),
            LooseValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Textual reading; whole numbers drop their fractional part
    pub fn into_text(self) -> String {
        match self {
            LooseValue::Number(n) if n.fract() == 0.0 => format!("{}", n as i64),
            LooseValue::Number(n) => n.to_string(),
            LooseValue::Text(s) => s,
        }
    }
}

/// Body of `POST /add_watchlist`; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddWatchlistRequest {
    pub title: Option<String>,
    pub poster: Option<String>,
    pub rating: Option<LooseValue>,
    pub genre: Option<String>,
    pub popularity: Option<LooseValue>,
    pub release_year: Option<LooseValue>,
    pub language: Option<String>,
    pub cast: Option<String>,
}

impl AddWatchlistRequest {
    /// Applies the watchlist defaults and validates the title
    pub fn into_entry(self) -> AppResult<NewWatchlistEntry> {
        // Stored as sent; uniqueness is literal equality
        let title = self.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string());
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Movie title cannot be empty".to_string(),
            ));
        }

        Ok(NewWatchlistEntry {
            title,
            poster: self
                .poster
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| PLACEHOLDER_POSTER.to_string()),
            rating: self.rating.as_ref().and_then(LooseValue::as_number),
            genre: self.genre.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            popularity: self
                .popularity
                .as_ref()
                .and_then(LooseValue::as_number)
                .unwrap_or(0.0),
            release_year: self
                .release_year
                .map(LooseValue::into_text)
                .unwrap_or_else(|| UNKNOWN_YEAR.to_string()),
            language: self.language.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            cast: self.cast.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        })
    }
}
