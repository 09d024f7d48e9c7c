use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Recommendations
        .route("/", get(handlers::index).post(handlers::recommend))
        // Watchlist
        .route("/watchlist", get(handlers::watchlist_page))
        .route("/add_watchlist", post(handlers::add_watchlist))
        .route("/remove_watchlist/:id", post(handlers::remove_watchlist))
        // Assets
        .route("/static/script.js", get(handlers::script))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
