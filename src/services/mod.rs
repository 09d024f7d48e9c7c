pub mod providers;
pub mod recommendations;
pub mod watchlist;

pub use recommendations::{recommend_movies, RecommendationBatch};
