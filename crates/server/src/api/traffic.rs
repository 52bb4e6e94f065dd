use std::{collections::HashMap, sync::Arc};

use crate::{
    dto::{MarkerDto, TimeDto},
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bikeflow::{shared::time::TimeFilter, traffic::RadiusScale};
use tracing::warn;

/// Station markers for the `time` slider value, `-1` or absent for any time.
pub async fn traffic(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let filter = filter_from_params(&params)?;
    let traffic = state.repository.traffic(filter);
    let scale = RadiusScale::for_traffic(filter, &traffic);
    let result: Vec<_> = traffic
        .iter()
        .map(|station| MarkerDto::from(station, &scale))
        .collect();
    Ok(Json(result).into_response())
}

pub async fn time(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, StatusCode> {
    let filter = filter_from_params(&params)?;
    Ok(Json(TimeDto::from(filter)).into_response())
}

fn filter_from_params(params: &HashMap<String, String>) -> Result<TimeFilter, StatusCode> {
    let Some(value) = params.get("time") else {
        return Ok(TimeFilter::Any);
    };
    let value: i32 = value.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
    TimeFilter::try_from(value).map_err(|err| {
        warn!("Rejected filter: {err}");
        StatusCode::BAD_REQUEST
    })
}

#[test]
fn filter_from_params_test() {
    let params = |value: &str| HashMap::from([("time".to_string(), value.to_string())]);
    assert_eq!(filter_from_params(&HashMap::new()), Ok(TimeFilter::Any));
    assert_eq!(filter_from_params(&params("-1")), Ok(TimeFilter::Any));
    assert_eq!(
        filter_from_params(&params("90")),
        Ok(TimeFilter::try_from(90).unwrap())
    );
    assert_eq!(
        filter_from_params(&params("1440")),
        Err(StatusCode::BAD_REQUEST)
    );
    assert_eq!(
        filter_from_params(&params("noon")),
        Err(StatusCode::BAD_REQUEST)
    );
}
