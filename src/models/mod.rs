use serde::{Deserialize, Serialize};

pub mod movie;
pub mod watchlist;

pub use movie::{
    display_score, Genre, MovieRecord, NOT_AVAILABLE, PLACEHOLDER_POSTER, UNKNOWN_TITLE,
    UNKNOWN_YEAR,
};
pub use watchlist::{AddWatchlistRequest, LooseValue, NewWatchlistEntry, WatchlistEntry};

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from GET /search/movie
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbSearchHit>,
}

/// One search hit; only the fields the record is built from
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchHit {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub popularity: Option<f64>,
}

/// Response from GET /movie/{id}?append_to_response=credits,videos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub credits: Option<TmdbCredits>,
    #[serde(default)]
    pub videos: Option<TmdbVideos>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbVideos {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

// ============================================================================
// Gemini API Types
// ============================================================================

/// Request body for POST /models/{model}:generateContent
#[derive(Debug, Clone, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
}

impl GeminiRequest {
    /// Single-turn request carrying one text prompt
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: Some(prompt.into()),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Response from generateContent
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

impl GeminiResponse {
    /// Text of the first part of the first candidate, if any
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
}
