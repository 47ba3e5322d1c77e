pub mod health;
pub mod trades;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::snapshot::SnapshotStore;

#[derive(Clone)]
pub struct AppState {
    pub snapshots: Arc<SnapshotStore>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/api/trades", get(trades::get_trades))
        .route("/api/valid-trades", get(trades::get_valid_trades))
        .layer(cors)
        .with_state(state)
}
