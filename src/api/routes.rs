use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower::ServiceBuilder;
use axum::extract::DefaultBodyLimit;

use crate::pipeline::Warper;
use super::handlers::*;

pub fn create_router(warper: Arc<Warper>) -> Router {
    Router::new()
        .route("/api/warp", post(warp_track))
        .route("/api/artworks", get(list_artworks))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB limit
                .layer(CorsLayer::permissive())
        )
        .with_state(warper)
}
