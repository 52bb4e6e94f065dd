use bikeflow::{
    prelude::*,
    source::Source,
    traffic::{self, window},
};
use chrono::NaiveDateTime;

fn at(time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn minute(value: u16) -> MinuteOfDay {
    MinuteOfDay::new(value).unwrap()
}

fn filter(value: i32) -> TimeFilter {
    TimeFilter::try_from(value).unwrap()
}

fn fixture() -> Repository {
    let root = env!("CARGO_MANIFEST_DIR");
    let source = Source::new(Config::default())
        .stations_from_path(format!("{root}/tests/data/stations.json"))
        .trips_from_path(format!("{root}/tests/data/trips.csv"));
    Repository::new().load_source(source).unwrap()
}

fn counts(traffic: &[StationTraffic], id: &str) -> (u32, u32, u32) {
    let station = traffic.iter().find(|station| station.id == id).unwrap();
    (station.departures, station.arrivals, station.total_traffic)
}

#[test]
fn every_trip_in_one_bucket_per_direction() {
    let repository = fixture();
    let buckets = repository.buckets();
    for trip in repository.trips.iter() {
        for (direction, expected) in [
            (Direction::Departures, trip.start_minute),
            (Direction::Arrivals, trip.end_minute),
        ] {
            let holding: Vec<u16> = (0..1440)
                .map(minute)
                .filter(|m| buckets.bucket(direction, *m).contains(&trip.index))
                .map(|m| m.as_minutes())
                .collect();
            assert_eq!(holding, vec![expected.as_minutes()]);
        }
    }
}

#[test]
fn buckets_reference_trips_by_position() {
    let trips = [
        Trip::new(at("2024-03-01 08:00:00"), at("2024-03-01 08:20:00"), "A", "B"),
        Trip::new(at("2024-03-01 09:00:00"), at("2024-03-01 09:20:00"), "B", "A"),
    ];
    let buckets = MinuteBuckets::build(&trips);
    assert_eq!(buckets.select(Direction::Departures, TimeFilter::Any), vec![0, 1]);
    assert_eq!(buckets.select(Direction::Arrivals, TimeFilter::Any), vec![0, 1]);
    assert_eq!(buckets.bucket(Direction::Departures, minute(540)), &[1]);
    assert_eq!(buckets.bucket(Direction::Arrivals, minute(500)), &[0]);
}

#[test]
fn bucket_index_is_hour_and_minute() {
    let trip = Trip::new(
        at("2024-03-09 17:42:59"),
        at("2024-03-10 18:01:00"),
        "A",
        "B",
    );
    assert_eq!(trip.start_minute.as_minutes(), 17 * 60 + 42);
    assert_eq!(trip.end_minute.as_minutes(), 18 * 60 + 1);
}

#[test]
fn any_time_selects_every_trip() {
    let repository = fixture();
    let buckets = repository.buckets();
    for direction in [Direction::Departures, Direction::Arrivals] {
        let mut selected = buckets.select(direction, TimeFilter::Any);
        assert_eq!(selected.len(), repository.trips.len());
        assert_eq!(buckets.len(direction), repository.trips.len());
        selected.sort_unstable();
        assert_eq!(selected, (0..repository.trips.len() as u32).collect::<Vec<_>>());
    }
}

#[test]
fn any_time_keeps_bucket_order() {
    let repository = fixture();
    let departures: Vec<&str> = repository
        .departures(TimeFilter::Any)
        .into_iter()
        .filter_map(|trip| trip.ride_id.as_deref())
        .collect();
    assert_eq!(departures, vec!["r1", "r2", "r3", "r5", "r6", "r4"]);

    let arrivals: Vec<&str> = repository
        .arrivals(TimeFilter::Any)
        .into_iter()
        .filter_map(|trip| trip.ride_id.as_deref())
        .collect();
    assert_eq!(arrivals, vec!["r4", "r1", "r2", "r3", "r5", "r6"]);
}

#[test]
fn window_wraps_around_midnight() {
    let minutes: Vec<u16> = window(minute(30)).iter().map(|m| m.as_minutes()).collect();
    let expected: Vec<u16> = (1410..1440).chain(0..90).collect();
    assert_eq!(minutes.len(), 120);
    assert_eq!(minutes, expected);
}

#[test]
fn window_without_wrap() {
    let minutes: Vec<u16> = window(minute(700)).iter().map(|m| m.as_minutes()).collect();
    assert_eq!(minutes, (640..760).collect::<Vec<_>>());
}

#[test]
fn window_ending_at_midnight() {
    let minutes: Vec<u16> = window(minute(1380)).iter().map(|m| m.as_minutes()).collect();
    assert_eq!(minutes, (1320..1440).collect::<Vec<_>>());
}

#[test]
fn window_starting_at_midnight() {
    let minutes: Vec<u16> = window(minute(60)).iter().map(|m| m.as_minutes()).collect();
    assert_eq!(minutes, (0..120).collect::<Vec<_>>());
}

#[test]
fn window_is_always_120_minutes() {
    for m in (0..1440).step_by(7).map(minute) {
        assert_eq!(window(m).len(), 120, "window around {m}");
    }
}

#[test]
fn wrapped_selection_starts_before_midnight() {
    let repository = fixture();
    let departures: Vec<&str> = repository
        .departures(filter(30))
        .into_iter()
        .filter_map(|trip| trip.ride_id.as_deref())
        .collect();
    assert_eq!(departures, vec!["r4", "r1"]);
}

#[test]
fn window_upper_bound_is_exclusive() {
    let trips = [
        Trip::new(at("2024-03-01 07:00:00"), at("2024-03-01 07:10:00"), "A", "B"),
        Trip::new(at("2024-03-01 08:59:59"), at("2024-03-01 09:10:00"), "A", "B"),
        Trip::new(at("2024-03-01 09:00:00"), at("2024-03-01 09:10:00"), "A", "B"),
    ];
    let repository = Repository::new().with_trips(trips);
    let selected = repository.buckets().select(Direction::Departures, filter(480));
    assert_eq!(selected, vec![0, 1]);
}

#[test]
fn aggregate_any_time() {
    let traffic = fixture().traffic(TimeFilter::Any);
    let ids: Vec<&str> = traffic.iter().map(|station| station.id.as_str()).collect();
    assert_eq!(ids, vec!["A32000", "B32001", "C32002", "D32003"]);
    assert_eq!(counts(&traffic, "A32000"), (2, 2, 4));
    assert_eq!(counts(&traffic, "B32001"), (1, 2, 3));
    assert_eq!(counts(&traffic, "C32002"), (2, 1, 3));
    assert_eq!(counts(&traffic, "D32003"), (0, 0, 0));
}

#[test]
fn aggregate_wrapped_window() {
    let traffic = fixture().traffic(filter(30));
    assert_eq!(counts(&traffic, "A32000"), (1, 1, 2));
    assert_eq!(counts(&traffic, "B32001"), (0, 1, 1));
    assert_eq!(counts(&traffic, "C32002"), (1, 0, 1));
    assert_eq!(counts(&traffic, "D32003"), (0, 0, 0));
}

#[test]
fn aggregate_morning_window() {
    let traffic = fixture().traffic(filter(500));
    assert_eq!(counts(&traffic, "A32000"), (1, 1, 2));
    assert_eq!(counts(&traffic, "B32001"), (1, 0, 1));
    assert_eq!(counts(&traffic, "C32002"), (0, 1, 1));
}

#[test]
fn aggregate_quiet_window() {
    let traffic = fixture().traffic(filter(240));
    assert_eq!(traffic.len(), 4);
    assert!(traffic.iter().all(|station| station.total_traffic == 0));
    assert!(traffic.iter().all(|station| station.flow().is_none()));
}

#[test]
fn total_traffic_is_twice_the_trips() {
    let stations = [
        Station::new("A", Coordinate::new(42.0, -71.0)),
        Station::new("B", Coordinate::new(42.1, -71.1)),
        Station::new("C", Coordinate::new(42.2, -71.2)),
    ];
    let trips = [
        Trip::new(at("2024-03-01 00:05:00"), at("2024-03-01 00:50:00"), "A", "B"),
        Trip::new(at("2024-03-01 07:15:00"), at("2024-03-01 07:45:00"), "B", "C"),
        Trip::new(at("2024-03-01 23:50:00"), at("2024-03-02 00:10:00"), "C", "A"),
        Trip::new(at("2024-03-01 12:00:00"), at("2024-03-01 12:01:00"), "A", "A"),
    ];
    let trip_count = trips.len() as u32;
    let repository = Repository::new().with_stations(stations).with_trips(trips);
    let total: u32 = repository
        .traffic(TimeFilter::Any)
        .iter()
        .map(|station| station.total_traffic)
        .sum();
    assert_eq!(total, 2 * trip_count);
}

#[test]
fn single_trip_scenario() {
    let stations = [
        Station::new("A", Coordinate::new(42.0, -71.0)),
        Station::new("B", Coordinate::new(42.1, -71.1)),
    ];
    let trips = [Trip::new(
        at("2024-03-01 00:05:00"),
        at("2024-03-01 00:50:00"),
        "A",
        "B",
    )];
    let repository = Repository::new().with_stations(stations).with_trips(trips);
    let traffic = repository.traffic(TimeFilter::Any);
    assert_eq!(counts(&traffic, "A"), (1, 0, 1));
    assert_eq!(counts(&traffic, "B"), (0, 1, 1));
    assert_eq!(traffic[0].flow(), Some(FlowLevel::DepartureHeavy));
    assert_eq!(traffic[1].flow(), Some(FlowLevel::ArrivalHeavy));
}

#[test]
fn station_ids_match_exactly() {
    let stations = [Station::new("A1", Coordinate::default())];
    let trips = [
        Trip::new(at("2024-03-01 10:00:00"), at("2024-03-01 10:10:00"), "a1", "A1 "),
        Trip::new(at("2024-03-01 10:00:00"), at("2024-03-01 10:10:00"), "A1", "A1"),
    ];
    let repository = Repository::new().with_stations(stations).with_trips(trips);
    let traffic = repository.traffic(TimeFilter::Any);
    assert_eq!(counts(&traffic, "A1"), (1, 1, 2));
}

#[test]
fn aggregate_without_repository() {
    let stations = [Station::new("A", Coordinate::default())];
    let trip = Trip::new(at("2024-03-01 10:00:00"), at("2024-03-01 10:10:00"), "A", "Z");
    let traffic = traffic::aggregate(&stations, [&trip], [&trip]);
    assert_eq!(counts(&traffic, "A"), (1, 0, 1));
}

#[test]
fn traffic_summary_text() {
    let traffic = fixture().traffic(TimeFilter::Any);
    assert_eq!(traffic[0].to_string(), "4 trips (2 departures, 2 arrivals)");
}

#[test]
fn traffic_serializes_for_the_map() {
    let station = Station::new("A", Coordinate::new(42.5, -71.5));
    let traffic = StationTraffic::new(&station, 3, 1);
    let json = serde_json::to_value(&traffic).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "A",
            "lon": -71.5,
            "lat": 42.5,
            "departures": 3,
            "arrivals": 1,
            "totalTraffic": 4,
        })
    );
}

#[test]
fn radius_scale_follows_busiest_station() {
    let traffic = fixture().traffic(TimeFilter::Any);
    let scale = RadiusScale::for_traffic(TimeFilter::Any, &traffic);
    assert_eq!(scale.radius(4), 25.0);
    assert_eq!(scale.radius(0), 0.0);
}

#[test]
fn repository_center() {
    let stations = [
        Station::new("A", Coordinate::new(42.0, -71.0)),
        Station::new("B", Coordinate::new(43.0, -72.0)),
    ];
    let repository = Repository::new().with_stations(stations);
    assert_eq!(repository.center(), Some(Coordinate::new(42.5, -71.5)));
    assert_eq!(Repository::new().center(), None);
}
