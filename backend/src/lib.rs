use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod config;
pub mod error;
pub mod handlers {
    pub mod waitlist_handlers;
}
pub mod models {
    pub mod waitlist_models;
}
pub mod repositories {
    pub mod waitlist_store;
}
pub mod api {
    pub mod google_sheets;
}

use handlers::waitlist_handlers;
use repositories::waitlist_store::WaitlistStore;

pub struct AppState {
    pub store: Arc<dyn WaitlistStore>,
}

async fn health_check() -> &'static str {
    "OK"
}

/// API routes. Static file serving and CORS are layered on in `main`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/waitlist", post(waitlist_handlers::join_waitlist))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
