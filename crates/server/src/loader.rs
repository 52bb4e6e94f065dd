use crate::config::Config;
use bikeflow::{prelude::*, source::Source};
use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::info;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to fetch: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{url} responded with {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read source: {0}")]
    Source(#[from] bikeflow::source::Error),
    #[error("Loading task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Fetches the station directory, then the trip log, then builds the repository.
/// Any failure ends the pipeline, nothing is retried.
pub async fn load(config: &Config) -> Result<Repository, LoadError> {
    let client = reqwest::Client::new();
    let stations = fetch(&client, "stations", &config.stations, &config.data_dir).await?;
    let trips = fetch(&client, "trips", &config.trips, &config.data_dir).await?;

    let source = Source::new(config.source.clone())
        .stations_from_path(stations)
        .trips_from_path(trips);
    let repository =
        tokio::task::spawn_blocking(move || Repository::new().load_source(source)).await??;
    Ok(repository)
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn file_name(url: &str) -> &str {
    url.split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .unwrap_or("download")
}

/// Downloads are prefixed with their role so the two sources never share a file.
fn download_path(data_dir: &Path, role: &str, url: &str) -> PathBuf {
    data_dir.join(format!("{role}-{}", file_name(url)))
}

/// Local paths are used as is, URLs are streamed into `data_dir` first.
async fn fetch(
    client: &reqwest::Client,
    role: &str,
    location: &str,
    data_dir: &Path,
) -> Result<PathBuf, LoadError> {
    if !is_remote(location) {
        return Ok(PathBuf::from(location));
    }

    info!("Fetching {location}");
    let response = client.get(location).send().await?;
    if !response.status().is_success() {
        return Err(LoadError::Status {
            url: location.to_string(),
            status: response.status(),
        });
    }

    tokio::fs::create_dir_all(data_dir).await?;
    let path = download_path(data_dir, role, location);
    let mut file = File::create(&path).await?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?).await?;
    }
    file.flush().await?;
    Ok(path)
}

#[test]
fn file_name_test() {
    assert_eq!(
        file_name("https://dsc106.com/labs/lab07/data/bluebikes-stations.json"),
        "bluebikes-stations.json"
    );
    assert_eq!(
        file_name("https://example.com/trips/202403-tripdata.zip?token=abc"),
        "202403-tripdata.zip"
    );
    assert_eq!(file_name("https://example.com/"), "download");
}

#[test]
fn download_path_test() {
    let data_dir = Path::new("data");
    let stations = download_path(data_dir, "stations", "https://example.com/feed/");
    let trips = download_path(data_dir, "trips", "https://example.com/export/");
    assert_eq!(stations, data_dir.join("stations-download"));
    assert_eq!(trips, data_dir.join("trips-download"));
    assert_ne!(stations, trips);
    assert_eq!(
        download_path(data_dir, "trips", "https://example.com/202403-tripdata.zip"),
        data_dir.join("trips-202403-tripdata.zip")
    );
}

#[test]
fn is_remote_test() {
    assert!(is_remote("https://example.com/stations.json"));
    assert!(!is_remote("./data/stations.json"));
}
