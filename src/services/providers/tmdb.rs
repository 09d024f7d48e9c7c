/// TMDB metadata provider
///
/// API Flow:
/// 1. Search: /search/movie?query=... → first hit only, no disambiguation
/// 2. Details: /movie/{id}?append_to_response=credits,videos → genres, release
///    date, language, cast and trailer in a single call
///
/// Title, poster, rating and popularity come from the search hit; the rest
/// comes from the detail response.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::{
        MovieRecord, TmdbMovieDetails, TmdbSearchHit, TmdbSearchResponse, NOT_AVAILABLE,
        PLACEHOLDER_POSTER, UNKNOWN_TITLE,
    },
    services::providers::MetadataProvider,
};

const MAX_CAST: usize = 5;
const TRAILER_TYPE: &str = "Trailer";
const TRAILER_SITE: &str = "YouTube";
const YOUTUBE_EMBED_URL: &str = "https://www.youtube.com/embed/";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
}

impl TmdbProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        image_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            image_url,
        })
    }

    /// GET against the TMDB API with the key attached
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    /// Maps a search hit and its details into a movie record
    fn build_record(&self, hit: TmdbSearchHit, details: TmdbMovieDetails) -> MovieRecord {
        let poster = hit
            .poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{}{}", self.image_url, path))
            .unwrap_or_else(|| PLACEHOLDER_POSTER.to_string());

        let genre = if details.genres.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            details
                .genres
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let release_year = details
            .release_date
            .as_deref()
            .filter(|date| !date.is_empty())
            .map(|date| date.chars().take(4).collect())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let language = details
            .original_language
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        MovieRecord {
            title: hit.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            poster,
            rating: hit.vote_average,
            genre,
            popularity: hit.popularity,
            release_year,
            language,
            cast: top_cast(&details),
            trailer: trailer_url(&details),
        }
    }
}

/// First five credited names, or the sentinel
fn top_cast(details: &TmdbMovieDetails) -> String {
    let names: Vec<&str> = details
        .credits
        .iter()
        .flat_map(|credits| credits.cast.iter())
        .take(MAX_CAST)
        .map(|member| member.name.as_str())
        .collect();

    if names.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        names.join(", ")
    }
}

/// Embed link for the first YouTube trailer in provider order
fn trailer_url(details: &TmdbMovieDetails) -> Option<String> {
    details
        .videos
        .iter()
        .flat_map(|videos| videos.results.iter())
        .find(|video| video.video_type == TRAILER_TYPE && video.site == TRAILER_SITE)
        .map(|video| format!("{}{}", YOUTUBE_EMBED_URL, video.key))
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn lookup(&self, title: &str) -> AppResult<Option<MovieRecord>> {
        let search: TmdbSearchResponse = self
            .get_json("/search/movie", &[("query", title)])
            .await?;

        let Some(hit) = search.results.into_iter().next() else {
            tracing::debug!(title = %title, provider = "tmdb", "No search results");
            return Ok(None);
        };

        let details: TmdbMovieDetails = self
            .get_json(
                &format!("/movie/{}", hit.id),
                &[("append_to_response", "credits,videos")],
            )
            .await?;

        let record = self.build_record(hit, details);

        tracing::info!(
            query = %title,
            title = %record.title,
            has_trailer = record.trailer.is_some(),
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(Some(record))
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
