//! Router assembly.

use axum::{middleware, routing::get, routing::post, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::{analyze, request_id, weather};
use crate::state::AppState;

pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(|| async { "OK" }))
        .route("/weather", get(weather::get_weather))
        .route("/analyze", post(analyze::analyze))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::propagate_request_id))
}

async fn root() -> Json<Value> {
    Json(json!({"message": "Hello World"}))
}
