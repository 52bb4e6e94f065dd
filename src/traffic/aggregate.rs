use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt::Display};

use crate::{
    repository::{Station, Trip},
    traffic::FlowLevel,
};

/// Departures and arrivals of one station for the current filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationTraffic {
    pub id: String,
    pub lon: f64,
    pub lat: f64,
    pub departures: u32,
    pub arrivals: u32,
    pub total_traffic: u32,
}

impl StationTraffic {
    pub fn new(station: &Station, departures: u32, arrivals: u32) -> Self {
        Self {
            id: station.id.to_string(),
            lon: station.coordinate.longitude,
            lat: station.coordinate.latitude,
            departures,
            arrivals,
            total_traffic: departures + arrivals,
        }
    }

    pub fn flow(&self) -> Option<FlowLevel> {
        FlowLevel::from_counts(self.departures, self.total_traffic)
    }
}

impl Display for StationTraffic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} trips ({} departures, {} arrivals)",
            self.total_traffic, self.departures, self.arrivals
        )
    }
}

/// Counts selected departures by start station and selected arrivals by end station.
///
/// One entry per station, in the given order, stations without trips included.
/// Station ids are compared exactly and trips pointing at unknown stations are ignored.
pub fn aggregate<'a, D, A>(
    stations: &[Station],
    departures: D,
    arrivals: A,
) -> Vec<StationTraffic>
where
    D: IntoIterator<Item = &'a Trip>,
    A: IntoIterator<Item = &'a Trip>,
{
    let departures = rollup(departures, |trip| &*trip.start_station_id);
    let arrivals = rollup(arrivals, |trip| &*trip.end_station_id);
    stations
        .par_iter()
        .map(|station| {
            let id: &str = &station.id;
            StationTraffic::new(
                station,
                departures.get(id).copied().unwrap_or_default(),
                arrivals.get(id).copied().unwrap_or_default(),
            )
        })
        .collect()
}

fn rollup<'a, I, F>(trips: I, key: F) -> HashMap<&'a str, u32>
where
    I: IntoIterator<Item = &'a Trip>,
    F: Fn(&'a Trip) -> &'a str,
{
    let mut counts: HashMap<&'a str, u32> = HashMap::new();
    trips.into_iter().for_each(|trip| {
        *counts.entry(key(trip)).or_default() += 1;
    });
    counts
}
