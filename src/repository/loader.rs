use rayon::prelude::*;
use std::{collections::HashSet, sync::Arc, time::Instant};
use tracing::{debug, warn};

use crate::{
    repository::{Repository, Station, Trip},
    source::{self, Source, SourceTrip},
};

impl Repository {
    /// Loads the station directory first, then the trip log.
    /// Depending on the size of the trip log this can be a long blocking function.
    pub fn load_source(self, source: Source) -> Result<Self, source::Error> {
        let repository = self.load_stations(&source)?;
        repository.load_trips(&source)
    }

    fn load_stations(self, source: &Source) -> Result<Self, source::Error> {
        debug!("Loading stations...");
        let now = Instant::now();
        let stations: Vec<Station> = source
            .read_stations()?
            .into_iter()
            .map(Station::from)
            .collect();
        let count = stations.len();
        let repository = self.with_stations(stations);
        debug!("Loading {count} stations took {:?}", now.elapsed());
        Ok(repository)
    }

    fn load_trips(self, source: &Source) -> Result<Self, source::Error> {
        debug!("Loading trips...");
        let now = Instant::now();
        let mut rows: Vec<(usize, SourceTrip)> = Vec::new();
        source.stream_trips(|row| {
            rows.push(row);
            Ok(())
        })?;
        debug!("Reading {} trip records took {:?}", rows.len(), now.elapsed());

        let now = Instant::now();
        let parsed = rows
            .into_par_iter()
            .map(|(row, trip)| Trip::try_from_source(row, trip));
        let mut trips: Vec<Trip> = if source.config().skip_invalid_rows {
            parsed
                .filter_map(|result| match result {
                    Ok(trip) => Some(trip),
                    Err(err) => {
                        warn!("Skipping trip: {err}");
                        None
                    }
                })
                .collect()
        } else {
            parsed.collect::<Result<Vec<_>, _>>()?
        };
        self.share_station_ids(&mut trips);
        debug!("Parsing {} trips took {:?}", trips.len(), now.elapsed());

        let now = Instant::now();
        let repository = self.with_trips(trips);
        debug!("Bucketing trips took {:?}", now.elapsed());
        Ok(repository)
    }

    /// Points trip station ids at the directory's allocations
    /// so millions of trips don't each hold their own copy.
    fn share_station_ids(&self, trips: &mut [Trip]) {
        let mut unknown: HashSet<Arc<str>> = HashSet::new();
        let mut intern = |id: &mut Arc<str>| {
            let shared = if let Some(station) = self.station_by_id(&**id) {
                station.id.clone()
            } else if let Some(known) = unknown.get(&**id) {
                known.clone()
            } else {
                unknown.insert(id.clone());
                return;
            };
            *id = shared;
        };
        trips.iter_mut().for_each(|trip| {
            intern(&mut trip.start_station_id);
            intern(&mut trip.end_station_id);
        });
        if !unknown.is_empty() {
            debug!(
                "{} station ids in the trip log are not in the directory",
                unknown.len()
            );
        }
    }
}
