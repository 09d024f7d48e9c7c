/// Gemini recommendation provider
///
/// Sends a single-turn prompt to `generateContent` and turns the free-text
/// reply into a list of candidate titles. The model is asked for plain names
/// separated by ", " and nothing else; whatever comes back is split on that
/// separator without checking the pieces are real movies.
use std::collections::HashSet;
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{GeminiRequest, GeminiResponse, Genre},
    services::providers::RecommendationProvider,
};

/// Number of movies requested per prompt
const RECOMMENDATION_COUNT: usize = 10;

/// Separator the model is instructed to use between titles
const TITLE_SEPARATOR: &str = ", ";

/// Header carrying the API key, kept out of the request URL
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            model,
        })
    }
}

/// Builds the prompt sent to the model
pub fn build_prompt(query: &str, genre: Option<Genre>) -> String {
    let request = match genre {
        Some(genre) => format!("Recommend {} {} movies", RECOMMENDATION_COUNT, genre),
        None => format!("Recommend {} movies", RECOMMENDATION_COUNT),
    };

    format!(
        "{} based on: {}. Provide only movie names, separated by commas.",
        request, query
    )
}

/// Splits a model reply into distinct, trimmed, non-empty titles
///
/// Titles keep the order of their first appearance.
pub fn parse_candidates(reply: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    reply
        .split(TITLE_SEPARATOR)
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .filter(|title| seen.insert(title.to_string()))
        .map(str::to_string)
        .collect()
}

#[async_trait::async_trait]
impl RecommendationProvider for GeminiProvider {
    async fn recommend(&self, query: &str, genre: Option<Genre>) -> AppResult<Vec<String>> {
        let prompt = build_prompt(query, genre);
        let url = format!("{}/models/{}:generateContent", self.api_url, self.model);

        let response = self
            .http_client
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&GeminiRequest::from_prompt(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        let reply: GeminiResponse = response.json().await?;
        let text = reply
            .first_text()
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| AppError::ExternalApi("Gemini returned an empty reply".to_string()))?;

        let candidates = parse_candidates(text);

        tracing::info!(
            query = %query,
            genre = genre.map(|g| g.as_str()).unwrap_or(""),
            candidates = candidates.len(),
            provider = "gemini",
            "Recommendations received"
        );

        Ok(candidates)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
