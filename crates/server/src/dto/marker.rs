use bikeflow::traffic::{RadiusScale, StationTraffic};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerDto {
    #[serde(flatten)]
    pub traffic: StationTraffic,
    pub radius: f64,
    /// 0, 0.5 or 1. Null when the station had no traffic.
    pub flow: Option<f64>,
}

impl MarkerDto {
    pub fn from(traffic: &StationTraffic, scale: &RadiusScale) -> Self {
        let radius = scale.radius(traffic.total_traffic);
        let flow = traffic.flow().map(|level| level.as_f64());
        Self {
            traffic: traffic.clone(),
            radius,
            flow,
        }
    }
}

#[test]
fn marker_serialization_test() {
    use bikeflow::{prelude::*, shared::time::TimeFilter};

    let station = Station::new("A32000", Coordinate::new(42.35821, -71.09416));
    let quiet = StationTraffic::new(&station, 0, 0);
    let busy = StationTraffic::new(&station, 3, 1);
    let scale = RadiusScale::new(TimeFilter::Any, 4);

    let json = serde_json::to_value(MarkerDto::from(&quiet, &scale)).unwrap();
    assert_eq!(json["totalTraffic"], 0);
    assert_eq!(json["radius"], 0.0);
    assert!(json["flow"].is_null());

    let json = serde_json::to_value(MarkerDto::from(&busy, &scale)).unwrap();
    assert_eq!(json["id"], "A32000");
    assert_eq!(json["totalTraffic"], 4);
    assert_eq!(json["radius"], 25.0);
    assert_eq!(json["flow"], 1.0);
}
