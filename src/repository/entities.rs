use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::{
    shared::{
        geo::Coordinate,
        time::{self, MinuteOfDay},
    },
    source::{self, SourceStation, SourceTrip},
};

/// A dock where bikes are picked up and returned.
#[derive(Debug, Default, Clone)]
pub struct Station {
    /// Position in the station directory.
    pub index: u32,
    /// The directory's `short_name`, which trip logs refer to.
    pub id: Arc<str>,
    pub name: Option<Arc<str>>,
    pub coordinate: Coordinate,
}

impl Station {
    pub fn new(id: impl Into<Arc<str>>, coordinate: Coordinate) -> Self {
        Self {
            index: 0,
            id: id.into(),
            name: None,
            coordinate,
        }
    }
}

impl From<SourceStation> for Station {
    fn from(value: SourceStation) -> Self {
        Self {
            index: 0,
            id: value.short_name.into(),
            name: value.name.map(|name| name.into()),
            coordinate: Coordinate::new(value.lat, value.lon),
        }
    }
}

/// A single ride from one station to another.
#[derive(Debug, Clone)]
pub struct Trip {
    /// Position in the repository's trip list, used by the minute buckets.
    pub index: u32,
    pub ride_id: Option<Arc<str>>,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    pub start_station_id: Arc<str>,
    pub end_station_id: Arc<str>,
    /// Departure bucket, derived from `started_at`.
    pub start_minute: MinuteOfDay,
    /// Arrival bucket, derived from `ended_at`.
    pub end_minute: MinuteOfDay,
}

impl Trip {
    pub fn new(
        started_at: NaiveDateTime,
        ended_at: NaiveDateTime,
        start_station_id: impl Into<Arc<str>>,
        end_station_id: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            index: 0,
            ride_id: None,
            started_at,
            ended_at,
            start_station_id: start_station_id.into(),
            end_station_id: end_station_id.into(),
            start_minute: MinuteOfDay::from_time(&started_at),
            end_minute: MinuteOfDay::from_time(&ended_at),
        }
    }

    /// Validates both timestamps of a trip log row.
    pub fn try_from_source(row: usize, value: SourceTrip) -> Result<Self, source::Error> {
        let started_at = parse_field(row, "started_at", &value.started_at)?;
        let ended_at = parse_field(row, "ended_at", &value.ended_at)?;
        let mut trip = Self::new(
            started_at,
            ended_at,
            value.start_station_id,
            value.end_station_id,
        );
        trip.ride_id = value.ride_id.map(|id| id.into());
        Ok(trip)
    }
}

fn parse_field(
    row: usize,
    field: &'static str,
    value: &str,
) -> Result<NaiveDateTime, source::Error> {
    time::parse_timestamp(value).ok_or_else(|| source::Error::InvalidTimestamp {
        row,
        field,
        value: value.to_string(),
    })
}
