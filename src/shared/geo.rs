use std::{fmt::Display, iter::Sum};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

/// Averages the coordinates. An empty iterator yields NaN on both axes.
impl Sum for Coordinate {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut count: usize = 0;
        let mut lat: f64 = 0.0;
        let mut lon: f64 = 0.0;
        iter.for_each(|coordinate| {
            count += 1;
            lat += coordinate.latitude;
            lon += coordinate.longitude;
        });
        let count = count as f64;
        Self {
            latitude: lat / count,
            longitude: lon / count,
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[test]
fn coordinate_sum_test() {
    let center: Coordinate = [
        Coordinate::new(42.0, -71.0),
        Coordinate::new(43.0, -72.0),
    ]
    .into_iter()
    .sum();
    assert_eq!(center, Coordinate::new(42.5, -71.5));
}

#[test]
fn coordinate_sum_empty_test() {
    let center: Coordinate = std::iter::empty().sum();
    assert!(center.latitude.is_nan());
}

#[test]
fn coordinate_from_tuple_test() {
    let coordinate = Coordinate::from((42.36027, -71.09415));
    assert_eq!(coordinate.latitude, 42.36027);
    assert_eq!(<(f64, f64)>::from(coordinate), (42.36027, -71.09415));
}
