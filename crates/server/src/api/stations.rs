use std::sync::Arc;

use crate::{
    dto::{StationDto, StationsDto},
    state::AppState,
};
use axum::{Json, extract::State, response::IntoResponse};

/// Positions only. Panning or zooming the map needs nothing else.
pub async fn stations(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let repository = &state.repository;
    Json(StationsDto {
        center: repository.center(),
        stations: repository.stations.iter().map(StationDto::from).collect(),
    })
}
