use std::sync::Arc;

use tokio::{sync::Semaphore, task::JoinSet};

use crate::{
    error::AppResult,
    models::{Genre, MovieRecord},
    services::providers::{MetadataProvider, RecommendationProvider},
};

/// Why a candidate title did not make it into the results
#[derive(Debug, Clone, PartialEq)]
pub enum LookupFailure {
    /// The metadata search came back empty
    NoMatch,
    /// Transport, status or parse failure
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedCandidate {
    pub title: String,
    pub failure: LookupFailure,
}

/// Outcome of one recommendation request
///
/// Provider failures never fail the request; they are collected here so the
/// page can say how many suggestions were dropped.
#[derive(Debug, Clone, Default)]
pub struct RecommendationBatch {
    pub query: String,
    pub genre: Option<Genre>,
    pub candidate_count: usize,
    /// Resolved records, in candidate order
    pub movies: Vec<MovieRecord>,
    pub unresolved: Vec<UnresolvedCandidate>,
    /// Set when the recommendation provider itself failed
    pub provider_error: Option<String>,
}

impl RecommendationBatch {
    /// Number of suggestions that could not be shown
    pub fn failed_count(&self) -> usize {
        self.unresolved.len()
    }

    pub fn is_degraded(&self) -> bool {
        self.provider_error.is_some() || !self.unresolved.is_empty()
    }
}

/// Generates candidate titles for a query and resolves each to a record
///
/// Lookups run concurrently, at most `concurrency` at a time. One failed
/// lookup only drops that candidate. Dropping the returned future aborts any
/// lookup still in flight.
pub async fn recommend_movies(
    recommender: Arc<dyn RecommendationProvider>,
    metadata: Arc<dyn MetadataProvider>,
    query: &str,
    genre: Option<Genre>,
    concurrency: usize,
) -> RecommendationBatch {
    let mut batch = RecommendationBatch {
        query: query.to_string(),
        genre,
        ..Default::default()
    };

    let candidates = match recommender.recommend(query, genre).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!(
                error = %e,
                provider = recommender.name(),
                "Error fetching recommendations"
            );
            batch.provider_error = Some(e.to_string());
            return batch;
        }
    };

    batch.candidate_count = candidates.len();

    let limiter = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut lookups = JoinSet::new();

    for (index, title) in candidates.iter().enumerate() {
        let provider = Arc::clone(&metadata);
        let limiter = Arc::clone(&limiter);
        let title = title.clone();
        lookups.spawn(async move {
            let _permit = limiter.acquire_owned().await;
            (index, provider.lookup(&title).await)
        });
    }

    // One slot per candidate so completion order does not leak into the output
    let mut results: Vec<Option<AppResult<Option<MovieRecord>>>> =
        std::iter::repeat_with(|| None).take(candidates.len()).collect();

    while let Some(joined) = lookups.join_next().await {
        match joined {
            Ok((index, result)) => results[index] = Some(result),
            Err(e) => tracing::error!(error = %e, "Lookup task join error"),
        }
    }

    for (title, result) in candidates.into_iter().zip(results) {
        let failure = match result {
            Some(Ok(Some(record))) => {
                batch.movies.push(record);
                continue;
            }
            Some(Ok(None)) => LookupFailure::NoMatch,
            Some(Err(e)) => {
                tracing::error!(
                    error = %e,
                    title = %title,
                    provider = metadata.name(),
                    "Error fetching movie details"
                );
                LookupFailure::Failed(e.to_string())
            }
            None => LookupFailure::Failed("Lookup task did not complete".to_string()),
        };
        batch.unresolved.push(UnresolvedCandidate { title, failure });
    }

    if batch.is_degraded() {
        tracing::warn!(
            resolved = batch.movies.len(),
            unresolved = batch.failed_count(),
            "Partial recommendation results"
        );
    }

    batch
}
