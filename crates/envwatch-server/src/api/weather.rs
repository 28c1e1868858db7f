//! Per-location environmental report.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use envwatch_core::{Coordinate, EnvironmentalReport};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub latitude: f64,
    pub longitude: f64,
}

pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<EnvironmentalReport>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let point = Coordinate::new(query.latitude, query.longitude)?;

    tracing::info!(
        "Report requested for {:.4}, {:.4}",
        point.latitude(),
        point.longitude()
    );
    let report = state.assembler.assemble(point).await?;
    Ok(Json(report))
}
