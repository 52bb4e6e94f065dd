use crate::{shared::time::TimeFilter, traffic::StationTraffic};

const ANY_TIME_RANGE: (f64, f64) = (0.0, 25.0);
const FILTERED_RANGE: (f64, f64) = (3.0, 30.0);

/// Square root scale from total traffic to marker radius in pixels.
///
/// The domain runs from 0 to the busiest station. With a time filter the range
/// starts at 3 so quiet stations stay visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    max_traffic: u32,
    range: (f64, f64),
}

impl RadiusScale {
    pub fn new(filter: TimeFilter, max_traffic: u32) -> Self {
        let range = match filter {
            TimeFilter::Any => ANY_TIME_RANGE,
            TimeFilter::At(_) => FILTERED_RANGE,
        };
        Self { max_traffic, range }
    }

    pub fn for_traffic(filter: TimeFilter, traffic: &[StationTraffic]) -> Self {
        let max_traffic = traffic
            .iter()
            .map(|station| station.total_traffic)
            .max()
            .unwrap_or_default();
        Self::new(filter, max_traffic)
    }

    /// Every station gets the smallest radius when nothing moved.
    pub fn radius(&self, total_traffic: u32) -> f64 {
        let (start, end) = self.range;
        if self.max_traffic == 0 {
            return start;
        }
        let t = (total_traffic as f64).sqrt() / (self.max_traffic as f64).sqrt();
        start + (end - start) * t
    }
}

#[test]
fn radius_any_time() {
    let scale = RadiusScale::new(TimeFilter::Any, 100);
    assert_eq!(scale.radius(0), 0.0);
    assert_eq!(scale.radius(25), 12.5);
    assert_eq!(scale.radius(100), 25.0);
}

#[test]
fn radius_filtered() {
    let filter = TimeFilter::try_from(480).unwrap();
    let scale = RadiusScale::new(filter, 16);
    assert_eq!(scale.radius(0), 3.0);
    assert_eq!(scale.radius(4), 16.5);
    assert_eq!(scale.radius(16), 30.0);
}

#[test]
fn radius_without_traffic() {
    let scale = RadiusScale::new(TimeFilter::Any, 0);
    assert_eq!(scale.radius(0), 0.0);
}
