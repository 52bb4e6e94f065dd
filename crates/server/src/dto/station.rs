use bikeflow::{repository::Station, shared::geo::Coordinate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationDto {
    pub id: String,
    pub name: Option<String>,
    pub lon: f64,
    pub lat: f64,
}

impl StationDto {
    pub fn from(station: &Station) -> Self {
        let id = station.id.to_string();
        let name = station.name.as_ref().map(|name| name.to_string());
        let Coordinate {
            latitude: lat,
            longitude: lon,
        } = station.coordinate;
        Self { id, name, lon, lat }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationsDto {
    pub center: Option<Coordinate>,
    pub stations: Vec<StationDto>,
}
