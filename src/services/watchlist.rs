use crate::{
    db::{InsertOutcome, WatchlistRepository},
    error::{AppError, AppResult},
    models::{AddWatchlistRequest, WatchlistEntry},
};

pub const ADDED_MESSAGE: &str = "Added to watchlist!";
pub const ALREADY_EXISTS_MESSAGE: &str = "Movie already in watchlist!";
pub const REMOVED_MESSAGE: &str = "Removed from watchlist!";
pub const NOT_FOUND_MESSAGE: &str = "Movie not found";

pub async fn list_watchlist(repo: &WatchlistRepository) -> AppResult<Vec<WatchlistEntry>> {
    repo.list().await
}

/// Stores a movie unless one with the same title is already saved
///
/// Returns the acknowledgement shown to the user; a duplicate is not an error.
pub async fn add_to_watchlist(
    repo: &WatchlistRepository,
    request: AddWatchlistRequest,
) -> AppResult<&'static str> {
    let entry = request.into_entry()?;

    match repo.insert(&entry).await? {
        InsertOutcome::Inserted(id) => {
            tracing::info!(id, title = %entry.title, "Added to watchlist");
            Ok(ADDED_MESSAGE)
        }
        InsertOutcome::AlreadyExists => {
            tracing::info!(title = %entry.title, "Movie already in watchlist");
            Ok(ALREADY_EXISTS_MESSAGE)
        }
    }
}

pub async fn remove_from_watchlist(repo: &WatchlistRepository, id: i64) -> AppResult<()> {
    if repo.delete(id).await? {
        tracing::info!(id, "Removed from watchlist");
        Ok(())
    } else {
        Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))
    }
}
