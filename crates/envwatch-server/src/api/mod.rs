//! HTTP API for envwatch.

mod analyze;
mod request_id;
mod routes;
mod weather;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    routes::create_router()
}

#[cfg(test)]
mod tests;
