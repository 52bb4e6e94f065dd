use std::{collections::HashMap, sync::Arc};

mod entities;
mod loader;
pub use entities::*;

use crate::{
    shared::{geo::Coordinate, time::TimeFilter},
    traffic::{self, Direction, MinuteBuckets, StationTraffic},
};

/// Owns everything loaded from a station directory and a trip log.
/// Read only once built, every query recomputes from the full trip set.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    pub stations: Box<[Station]>,
    pub trips: Box<[Trip]>,

    buckets: MinuteBuckets,
    station_lookup: HashMap<Arc<str>, u32>,
}

impl Repository {
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the station directory. Indexes follow the given order,
    /// the first station wins when an id appears twice.
    pub fn with_stations(mut self, stations: impl IntoIterator<Item = Station>) -> Self {
        let mut station_lookup: HashMap<Arc<str>, u32> = HashMap::new();
        let stations: Box<[Station]> = stations
            .into_iter()
            .enumerate()
            .map(|(i, mut station)| {
                station.index = i as u32;
                station_lookup
                    .entry(station.id.clone())
                    .or_insert(station.index);
                station
            })
            .collect();
        self.stations = stations;
        self.station_lookup = station_lookup;
        self
    }

    /// Replaces the trip log and rebuilds the minute buckets.
    pub fn with_trips(mut self, trips: impl IntoIterator<Item = Trip>) -> Self {
        let trips: Box<[Trip]> = trips
            .into_iter()
            .enumerate()
            .map(|(i, mut trip)| {
                trip.index = i as u32;
                trip
            })
            .collect();
        self.buckets = MinuteBuckets::build(&trips);
        self.trips = trips;
        self
    }

    /// Get a station with the given id.
    /// If no station is found with the given id None is returned.
    pub fn station_by_id(&self, id: &str) -> Option<&Station> {
        let index = self.station_lookup.get(id)?;
        Some(&self.stations[*index as usize])
    }

    pub fn trip_by_idx(&self, index: u32) -> Option<&Trip> {
        self.trips.get(index as usize)
    }

    pub fn buckets(&self) -> &MinuteBuckets {
        &self.buckets
    }

    /// Trips that started inside the filter window, in bucket order.
    pub fn departures(&self, filter: TimeFilter) -> Vec<&Trip> {
        self.select(Direction::Departures, filter)
    }

    /// Trips that ended inside the filter window, in bucket order.
    pub fn arrivals(&self, filter: TimeFilter) -> Vec<&Trip> {
        self.select(Direction::Arrivals, filter)
    }

    fn select(&self, direction: Direction, filter: TimeFilter) -> Vec<&Trip> {
        self.buckets
            .select(direction, filter)
            .into_iter()
            .map(|index| &self.trips[index as usize])
            .collect()
    }

    /// Per station departures and arrivals for the filter.
    /// Every station is present, in directory order.
    pub fn traffic(&self, filter: TimeFilter) -> Vec<StationTraffic> {
        traffic::aggregate(
            &self.stations,
            self.departures(filter),
            self.arrivals(filter),
        )
    }

    /// Mean position of all stations, None when the directory is empty.
    pub fn center(&self) -> Option<Coordinate> {
        if self.stations.is_empty() {
            return None;
        }
        Some(self.stations.iter().map(|station| station.coordinate).sum())
    }
}
