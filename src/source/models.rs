use serde::{Deserialize, Serialize};

/// Envelope of a GBFS `station_information` feed.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StationFeed {
    pub data: StationFeedData,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StationFeedData {
    pub stations: Vec<SourceStation>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SourceStation {
    pub short_name: String,
    #[serde(default)]
    pub name: Option<String>,
    pub lon: f64,
    pub lat: f64,
}

/// One row of the trip log. Columns not listed here are ignored.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SourceTrip {
    #[serde(default)]
    pub ride_id: Option<String>,
    pub started_at: String,
    pub ended_at: String,
    pub start_station_id: String,
    pub end_station_id: String,
}
