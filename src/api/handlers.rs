use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Extension, Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{AddWatchlistRequest, Genre},
    services::{recommend_movies, watchlist},
    views,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendForm {
    pub query: Option<String>,
    pub genre: Option<String>,
}

impl RecommendForm {
    /// Selected genre; blank means any, anything outside the fixed set is rejected
    fn genre(&self) -> AppResult<Option<Genre>> {
        self.genre
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::parse::<Genre>)
            .transpose()
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Empty recommendation form
pub async fn index() -> Html<String> {
    Html(views::index_page(&Genre::ALL))
}

/// Recommendations for a submitted query
///
/// Provider failures still render a page; only a missing query or an unknown
/// genre is an error.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(form): Form<RecommendForm>,
) -> AppResult<Html<String>> {
    let query = form
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Query cannot be empty".to_string()))?;
    let genre = form.genre()?;

    tracing::info!(
        request_id = %request_id,
        query = %query,
        genre = genre.map(|g| g.as_str()).unwrap_or(""),
        "Processing recommendation request"
    );

    let batch = recommend_movies(
        state.recommender.clone(),
        state.metadata.clone(),
        query,
        genre,
        state.lookup_concurrency,
    )
    .await;

    tracing::info!(
        request_id = %request_id,
        candidates = batch.candidate_count,
        resolved = batch.movies.len(),
        "Recommendation request completed"
    );

    Ok(Html(views::recommendations_page(&batch, &Genre::ALL)))
}

/// Saved movies page
pub async fn watchlist_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    let entries = watchlist::list_watchlist(&state.watchlist).await?;
    Ok(Html(views::watchlist_page(&entries)))
}

/// Add a movie to the watchlist
pub async fn add_watchlist(
    State(state): State<AppState>,
    Json(request): Json<AddWatchlistRequest>,
) -> AppResult<Json<MessageResponse>> {
    let message = watchlist::add_to_watchlist(&state.watchlist, request).await?;
    Ok(MessageResponse::new(message))
}

/// Remove a movie from the watchlist
pub async fn remove_watchlist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    watchlist::remove_from_watchlist(&state.watchlist, id).await?;
    Ok(MessageResponse::new(watchlist::REMOVED_MESSAGE))
}

/// Browser script for the add/remove buttons
pub async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        views::SCRIPT_JS,
    )
}
