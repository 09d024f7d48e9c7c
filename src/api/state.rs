use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{
    config::Config,
    db::WatchlistRepository,
    error::AppResult,
    services::providers::{GeminiProvider, MetadataProvider, RecommendationProvider, TmdbProvider},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub watchlist: WatchlistRepository,
    pub recommender: Arc<dyn RecommendationProvider>,
    pub metadata: Arc<dyn MetadataProvider>,
    /// Upper bound on concurrent metadata lookups per request
    pub lookup_concurrency: usize,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        recommender: Arc<dyn RecommendationProvider>,
        metadata: Arc<dyn MetadataProvider>,
        lookup_concurrency: usize,
    ) -> Self {
        Self {
            watchlist: WatchlistRepository::new(pool),
            recommender,
            metadata,
            lookup_concurrency: lookup_concurrency.max(1),
        }
    }

    /// Wires the production providers from configuration
    pub fn from_config(config: &Config, pool: SqlitePool) -> AppResult<Self> {
        let recommender = GeminiProvider::new(
            config.gemini_api_key.clone(),
            config.gemini_api_url.clone(),
            config.gemini_model.clone(),
            config.http_timeout(),
        )?;

        let metadata = TmdbProvider::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_url.clone(),
            config.http_timeout(),
        )?;

        Ok(Self::new(
            pool,
            Arc::new(recommender),
            Arc::new(metadata),
            config.lookup_concurrency,
        ))
    }
}
