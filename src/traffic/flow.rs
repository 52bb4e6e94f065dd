use serde::{Deserialize, Serialize};

/// Departure share of a station's traffic, quantized into three levels
/// over `[0, 1]` with thresholds at 1/3 and 2/3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowLevel {
    /// Mostly arrivals.
    ArrivalHeavy,
    Balanced,
    /// Mostly departures.
    DepartureHeavy,
}

const LEVELS: [FlowLevel; 3] = [
    FlowLevel::ArrivalHeavy,
    FlowLevel::Balanced,
    FlowLevel::DepartureHeavy,
];

impl FlowLevel {
    /// A ratio sitting exactly on a threshold belongs to the upper level.
    /// Values outside `[0, 1]` clamp to the outer levels.
    pub fn from_ratio(ratio: f64) -> Self {
        let thresholds = [1.0 / 3.0, 2.0 / 3.0];
        let level = thresholds
            .iter()
            .take_while(|threshold| ratio >= **threshold)
            .count();
        LEVELS[level]
    }

    /// None when the station saw no traffic at all, there is no ratio to speak of.
    pub fn from_counts(departures: u32, total_traffic: u32) -> Option<Self> {
        if total_traffic == 0 {
            return None;
        }
        Some(Self::from_ratio(departures as f64 / total_traffic as f64))
    }

    /// The scale output used for styling: 0, 0.5 or 1.
    pub const fn as_f64(&self) -> f64 {
        match self {
            FlowLevel::ArrivalHeavy => 0.0,
            FlowLevel::Balanced => 0.5,
            FlowLevel::DepartureHeavy => 1.0,
        }
    }
}

#[test]
fn flow_level_thresholds() {
    assert_eq!(FlowLevel::from_ratio(0.0), FlowLevel::ArrivalHeavy);
    assert_eq!(FlowLevel::from_ratio(0.33), FlowLevel::ArrivalHeavy);
    assert_eq!(FlowLevel::from_ratio(0.5), FlowLevel::Balanced);
    assert_eq!(FlowLevel::from_ratio(0.66), FlowLevel::Balanced);
    assert_eq!(FlowLevel::from_ratio(0.67), FlowLevel::DepartureHeavy);
    assert_eq!(FlowLevel::from_ratio(1.0), FlowLevel::DepartureHeavy);
}

#[test]
fn flow_level_on_threshold() {
    assert_eq!(FlowLevel::from_counts(1, 3), Some(FlowLevel::Balanced));
    assert_eq!(FlowLevel::from_counts(2, 3), Some(FlowLevel::DepartureHeavy));
}

#[test]
fn flow_level_out_of_domain() {
    assert_eq!(FlowLevel::from_ratio(-0.5), FlowLevel::ArrivalHeavy);
    assert_eq!(FlowLevel::from_ratio(1.5), FlowLevel::DepartureHeavy);
}

#[test]
fn flow_level_without_traffic() {
    assert_eq!(FlowLevel::from_counts(0, 0), None);
}

#[test]
fn flow_level_as_f64() {
    assert_eq!(FlowLevel::from_counts(0, 4).map(|l| l.as_f64()), Some(0.0));
    assert_eq!(FlowLevel::from_counts(2, 4).map(|l| l.as_f64()), Some(0.5));
    assert_eq!(FlowLevel::from_counts(4, 4).map(|l| l.as_f64()), Some(1.0));
}
