/// External provider abstractions
///
/// Two collaborators sit behind traits so the orchestration can be exercised
/// without network access: a generative-text service that suggests candidate
/// titles, and a movie database that resolves a title to a full record.
use crate::{
    error::AppResult,
    models::{Genre, MovieRecord},
};

pub mod gemini;
pub mod tmdb;

pub use gemini::GeminiProvider;
pub use tmdb::TmdbProvider;

/// Source of candidate movie titles for a free-text query
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Asks for candidate titles matching `query`, optionally within `genre`
    ///
    /// Returns the parsed, deduplicated list. An error means the provider
    /// could not be reached or gave an unusable reply.
    async fn recommend(&self, query: &str, genre: Option<Genre>) -> AppResult<Vec<String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Resolver from a candidate title to normalized movie metadata
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Looks up a single title
    ///
    /// `Ok(None)` when the search has no hits; `Err` on transport or parse
    /// failures in either the search or the detail call.
    async fn lookup(&self, title: &str) -> AppResult<Option<MovieRecord>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Serves `router` on an ephemeral local port and returns its base URL
#[cfg(test)]
pub(crate) async fn serve_router(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
