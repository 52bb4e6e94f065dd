use std::fmt::Display;

use chrono::{DateTime, NaiveDateTime, Timelike};
use thiserror::Error;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// External value used by the slider for "no time filter".
pub const ANY_TIME: i32 = -1;

const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Time filter {0} is outside of -1..=1439")]
pub struct InvalidFilter(pub i32);

/// Minutes since midnight, always in `0..1440`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    pub const fn new(minutes: u16) -> Option<Self> {
        if minutes < MINUTES_PER_DAY {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Truncates seconds and discards the date.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    pub const fn as_minutes(&self) -> u16 {
        self.0
    }

    pub const fn as_index(&self) -> usize {
        self.0 as usize
    }

    /// Moves the minute by `offset` minutes, wrapping around midnight.
    pub const fn wrapping_add(&self, offset: i32) -> Self {
        let day = MINUTES_PER_DAY as i32;
        Self((self.0 as i32 + offset).rem_euclid(day) as u16)
    }

    pub fn to_hm_string(&self) -> String {
        format!("{:02}:{:02}", self.0 / 60, self.0 % 60)
    }

    /// 12 hour clock label, e.g. `12:05 AM` or `1:30 PM`.
    pub fn to_display_string(&self) -> String {
        let hours = self.0 / 60;
        let minutes = self.0 % 60;
        let suffix = if hours < 12 { "AM" } else { "PM" };
        let hours = match hours % 12 {
            0 => 12,
            h => h,
        };
        format!("{hours}:{minutes:02} {suffix}")
    }
}

impl Display for MinuteOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hm_string())
    }
}

/// Which trips are currently selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeFilter {
    #[default]
    Any,
    At(MinuteOfDay),
}

impl TryFrom<i32> for TimeFilter {
    type Error = InvalidFilter;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if value == ANY_TIME {
            return Ok(Self::Any);
        }
        u16::try_from(value)
            .ok()
            .and_then(MinuteOfDay::new)
            .map(Self::At)
            .ok_or(InvalidFilter(value))
    }
}

impl From<TimeFilter> for i32 {
    fn from(value: TimeFilter) -> Self {
        match value {
            TimeFilter::Any => ANY_TIME,
            TimeFilter::At(minute) => minute.as_minutes() as i32,
        }
    }
}

impl Display for TimeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeFilter::Any => f.write_str("any time"),
            TimeFilter::At(minute) => f.write_str(&minute.to_display_string()),
        }
    }
}

/// Parses a trip log timestamp into wall clock time.
/// Offsets are kept as written, the local time of the record is what counts.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|time| time.naive_local())
        })
}

#[test]
fn minute_from_timestamp() {
    let time = parse_timestamp("2024-03-01 08:05:59.999").unwrap();
    assert_eq!(MinuteOfDay::from_time(&time).as_minutes(), 485);
}

#[test]
fn minute_from_timestamp_without_fraction() {
    let time = parse_timestamp("2024-03-01 23:59:00").unwrap();
    assert_eq!(MinuteOfDay::from_time(&time).as_minutes(), 1439);
}

#[test]
fn minute_from_rfc3339_keeps_local_time() {
    let time = parse_timestamp("2024-03-01T00:30:00-05:00").unwrap();
    assert_eq!(MinuteOfDay::from_time(&time).as_minutes(), 30);
}

#[test]
fn minute_from_short_timestamp() {
    let time = parse_timestamp("2024-03-01 13:07").unwrap();
    assert_eq!(MinuteOfDay::from_time(&time).as_minutes(), 787);
}

#[test]
fn invalid_timestamp_test_1() {
    assert!(parse_timestamp("").is_none());
}

#[test]
fn invalid_timestamp_test_2() {
    assert!(parse_timestamp("2024-03-01 25:00:00").is_none());
}

#[test]
fn invalid_timestamp_test_3() {
    assert!(parse_timestamp("yesterday").is_none());
}

#[test]
fn minute_out_of_range() {
    assert!(MinuteOfDay::new(1440).is_none());
    assert!(MinuteOfDay::new(1439).is_some());
}

#[test]
fn wrapping_add_test() {
    let minute = MinuteOfDay::new(30).unwrap();
    assert_eq!(minute.wrapping_add(-60).as_minutes(), 1410);
    assert_eq!(minute.wrapping_add(60).as_minutes(), 90);
    assert_eq!(MinuteOfDay::new(0).unwrap().wrapping_add(1440).as_minutes(), 0);
}

#[test]
fn filter_from_slider_value() {
    assert_eq!(TimeFilter::try_from(-1), Ok(TimeFilter::Any));
    assert_eq!(
        TimeFilter::try_from(700),
        Ok(TimeFilter::At(MinuteOfDay::new(700).unwrap()))
    );
    assert_eq!(TimeFilter::try_from(1440), Err(InvalidFilter(1440)));
    assert_eq!(TimeFilter::try_from(-2), Err(InvalidFilter(-2)));
}

#[test]
fn filter_to_slider_value() {
    assert_eq!(i32::from(TimeFilter::Any), -1);
    assert_eq!(i32::from(TimeFilter::try_from(15).unwrap()), 15);
}

#[test]
fn display_string_test() {
    assert_eq!(MinuteOfDay::new(5).unwrap().to_display_string(), "12:05 AM");
    assert_eq!(MinuteOfDay::new(720).unwrap().to_display_string(), "12:00 PM");
    assert_eq!(MinuteOfDay::new(810).unwrap().to_display_string(), "1:30 PM");
    assert_eq!(MinuteOfDay::new(1439).unwrap().to_display_string(), "11:59 PM");
    assert_eq!(TimeFilter::Any.to_string(), "any time");
}

#[test]
fn hm_string_test() {
    assert_eq!(MinuteOfDay::new(485).unwrap().to_hm_string(), "08:05");
}
