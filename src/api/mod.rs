//! HTTP API over the review service.
//!
//! ```ignore
//! let service = ReviewService::new(Box::new(MemoryStore::new()), Arc::new(SystemClock));
//! let app = vocab_review::api::create_server(AppState::new(service));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod error;
pub mod middleware;
pub mod routes;

pub use error::{ApiError, ApiResult};

use crate::service::ReviewService;
use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReviewService>,
}

impl AppState {
    pub fn new(service: ReviewService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/review", post(routes::submit_review))
        .route("/state/:item_id", get(routes::get_state))
        .route("/due", get(routes::get_due_items))
        .route("/stats", get(routes::get_stats))
        .route("/reset/:item_id", delete(routes::reset_item))
        .route("/export", get(routes::export_states));

    Router::new()
        .route("/health", get(routes::health_check))
        .nest("/api/v1", api)
        .with_state(state)
}

/// Router with CORS, tracing and request logging.
pub fn create_server(state: AppState) -> Router {
    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
