pub mod error;
pub mod handlers;
pub mod types;

use crate::server::handlers::{
    recognize_image_handler, recognize_image_tags_handler, server_status_handler,
};
use crate::server::types::AppState;
use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::get, routing::post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // over-limit bodies fail inside the multipart stream and surface as a JSON 400
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/", get(server_status_handler))
        .route("/recognize-image", post(recognize_image_handler))
        .route("/recognize-image/tags", post(recognize_image_tags_handler))
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
