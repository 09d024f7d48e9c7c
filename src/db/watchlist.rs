use sqlx::SqlitePool;

use crate::{
    error::AppResult,
    models::{NewWatchlistEntry, WatchlistEntry},
};

/// Result of attempting to store a watchlist entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(i64),
    AlreadyExists,
}

/// Data access for the `watchlist` table
#[derive(Clone)]
pub struct WatchlistRepository {
    pool: SqlitePool,
}

impl WatchlistRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All entries in insertion order
    pub async fn list(&self) -> AppResult<Vec<WatchlistEntry>> {
        let entries = sqlx::query_as::<_, WatchlistEntry>(
            r#"
            SELECT id, title, poster, rating, genre, popularity, release_year, language, top_cast
            FROM watchlist
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Inserts an entry, relying on the UNIQUE title constraint for duplicates
    ///
    /// There is no read before the write, so two concurrent adds of the same
    /// title resolve to one row and one `AlreadyExists`.
    pub async fn insert(&self, entry: &NewWatchlistEntry) -> AppResult<InsertOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO watchlist (title, poster, rating, genre, popularity, release_year, language, top_cast)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.title)
        .bind(&entry.poster)
        .bind(entry.rating)
        .bind(&entry.genre)
        .bind(entry.popularity)
        .bind(&entry.release_year)
        .bind(&entry.language)
        .bind(&entry.cast)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(InsertOutcome::Inserted(done.last_insert_rowid())),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Ok(InsertOutcome::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes by identity; `false` when nothing matched
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM watchlist WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM watchlist")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    async fn create_test_repository() -> WatchlistRepository {
        WatchlistRepository::new(create_memory_pool().await.unwrap())
    }

    fn entry(title: &str) -> NewWatchlistEntry {
        NewWatchlistEntry {
            title: title.to_string(),
            poster: "https://image.tmdb.org/t/p/w500/poster.jpg".to_string(),
            rating: Some(8.4),
            genre: "Action, Science Fiction".to_string(),
            popularity: 83.9,
            release_year: "2010".to_string(),
            language: "en".to_string(),
            cast: "Leonardo DiCaprio, Joseph Gordon-Levitt".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let repo = create_test_repository().await;

        let outcome = repo.insert(&entry("Inception")).await.unwrap();
        assert!(matches!(outcome, InsertOutcome::Inserted(_)));

        let entries = repo.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Inception");
        assert_eq!(entries[0].rating, Some(8.4));
        assert_eq!(entries[0].cast, "Leonardo DiCaprio, Joseph Gordon-Levitt");
    }

    #[tokio::test]
    async fn test_duplicate_title_reported_without_write() {
        let repo = create_test_repository().await;

        repo.insert(&entry("Inception")).await.unwrap();
        let second = repo.insert(&entry("Inception")).await.unwrap();

        assert_eq!(second, InsertOutcome::AlreadyExists);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = create_test_repository().await;

        repo.insert(&entry("Dune")).await.unwrap();
        repo.insert(&entry("Alien")).await.unwrap();
        repo.insert(&entry("Heat")).await.unwrap();

        let titles: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Dune", "Alien", "Heat"]);
    }

    #[tokio::test]
    async fn test_missing_rating_stored_as_null() {
        let repo = create_test_repository().await;

        let mut unrated = entry("Unrated");
        unrated.rating = None;
        repo.insert(&unrated).await.unwrap();

        let entries = repo.list().await.unwrap();
        assert_eq!(entries[0].rating, None);
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let repo = create_test_repository().await;

        let InsertOutcome::Inserted(id) = repo.insert(&entry("Inception")).await.unwrap() else {
            panic!("expected insert");
        };

        assert!(repo.delete(id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_leaves_store_unchanged() {
        let repo = create_test_repository().await;
        repo.insert(&entry("Inception")).await.unwrap();

        assert!(!repo.delete(9999).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
