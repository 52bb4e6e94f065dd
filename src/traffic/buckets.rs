use crate::{
    repository::Trip,
    shared::time::{MINUTES_PER_DAY, MinuteOfDay, TimeFilter},
};

/// Half width of the time filter window in minutes.
pub const WINDOW_RADIUS: i32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Keyed by the minute a trip started.
    Departures,
    /// Keyed by the minute a trip ended.
    Arrivals,
}

/// Trip indexes grouped by minute of day, once per direction.
///
/// Every trip sits in exactly one departure bucket and one arrival bucket.
/// Within a bucket trips keep the order they were given in.
#[derive(Debug, Clone)]
pub struct MinuteBuckets {
    departures: Box<[Vec<u32>]>,
    arrivals: Box<[Vec<u32>]>,
}

impl Default for MinuteBuckets {
    fn default() -> Self {
        Self {
            departures: empty_day(),
            arrivals: empty_day(),
        }
    }
}

fn empty_day() -> Box<[Vec<u32>]> {
    vec![Vec::new(); MINUTES_PER_DAY as usize].into()
}

impl MinuteBuckets {
    /// Trips are referenced by their position in `trips`.
    pub fn build(trips: &[Trip]) -> Self {
        let mut buckets = Self::default();
        trips.iter().enumerate().for_each(|(i, trip)| {
            let index = i as u32;
            buckets.departures[trip.start_minute.as_index()].push(index);
            buckets.arrivals[trip.end_minute.as_index()].push(index);
        });
        buckets
    }

    pub fn bucket(&self, direction: Direction, minute: MinuteOfDay) -> &[u32] {
        &self.by_direction(direction)[minute.as_index()]
    }

    /// Total number of trips held for a direction.
    pub fn len(&self, direction: Direction) -> usize {
        self.by_direction(direction).iter().map(Vec::len).sum()
    }

    /// Trip indexes inside the filter window.
    /// Buckets are visited in the order given by [`window`], or all 1440 in order for
    /// [`TimeFilter::Any`].
    pub fn select(&self, direction: Direction, filter: TimeFilter) -> Vec<u32> {
        let buckets = self.by_direction(direction);
        match filter {
            TimeFilter::Any => buckets.concat(),
            TimeFilter::At(minute) => window(minute)
                .into_iter()
                .flat_map(|bucket| buckets[bucket.as_index()].iter().copied())
                .collect(),
        }
    }

    fn by_direction(&self, direction: Direction) -> &[Vec<u32>] {
        match direction {
            Direction::Departures => &self.departures,
            Direction::Arrivals => &self.arrivals,
        }
    }
}

/// The 120 minutes in `[minute - 60, minute + 60)`, wrapping around midnight.
/// When the window wraps, the minutes before midnight come first.
pub fn window(minute: MinuteOfDay) -> Vec<MinuteOfDay> {
    let lower = minute.wrapping_add(-WINDOW_RADIUS).as_minutes();
    let upper = minute.wrapping_add(WINDOW_RADIUS).as_minutes();
    let minutes: Vec<u16> = if lower > upper {
        (lower..MINUTES_PER_DAY).chain(0..upper).collect()
    } else {
        (lower..upper).collect()
    };
    minutes.into_iter().filter_map(MinuteOfDay::new).collect()
}
