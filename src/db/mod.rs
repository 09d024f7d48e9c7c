pub mod sqlite;
pub mod watchlist;

pub use sqlite::{create_memory_pool, create_pool};
pub use watchlist::{InsertOutcome, WatchlistRepository};
