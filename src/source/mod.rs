use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self, BufReader, Cursor, Read, Seek},
    path::PathBuf,
    sync::Arc,
};
use thiserror::Error;
use tracing::warn;
use zip::ZipArchive;

mod config;
pub mod models;
pub use config::*;
pub use models::*;

const ZIP_MAGIC: [u8; 4] = *b"PK\x03\x04";

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Trip record {row} has an invalid {field}: {value:?}")]
    InvalidTimestamp {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
}

#[derive(Debug, Clone, Default)]
pub enum StorageType {
    #[default]
    None,
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

/// Where the station directory and the trip log are read from.
/// The trip log may be a plain CSV or a zip archive holding one.
#[derive(Debug, Clone, Default)]
pub struct Source {
    config: Config,
    stations: StorageType,
    trips: StorageType,
}

impl Source {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            stations: Default::default(),
            trips: Default::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stations_from_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stations = StorageType::Path(path.into());
        self
    }

    pub fn stations_from_bytes(mut self, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.stations = StorageType::Bytes(bytes.into());
        self
    }

    pub fn trips_from_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.trips = StorageType::Path(path.into());
        self
    }

    pub fn trips_from_bytes(mut self, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.trips = StorageType::Bytes(bytes.into());
        self
    }

    pub fn read_stations(&self) -> Result<Vec<SourceStation>, self::Error> {
        let feed: StationFeed = match &self.stations {
            StorageType::None => return Ok(Vec::new()),
            StorageType::Path(path) => {
                serde_json::from_reader(BufReader::new(File::open(path)?))?
            }
            StorageType::Bytes(bytes) => serde_json::from_slice(bytes)?,
        };
        Ok(feed.data.stations)
    }

    /// Streams every trip row together with its record position.
    /// Rows that fail to deserialize abort the stream unless
    /// [`Config::skip_invalid_rows`] is set.
    pub fn stream_trips<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, SourceTrip)) -> Result<(), self::Error>,
    {
        match &self.trips {
            StorageType::None => Ok(()),
            StorageType::Path(path) => stream_trips_from(File::open(path)?, &self.config, f),
            StorageType::Bytes(bytes) => {
                stream_trips_from(Cursor::new(bytes.as_ref()), &self.config, f)
            }
        }
    }
}

fn stream_trips_from<R, F>(mut reader: R, config: &Config, f: F) -> Result<(), self::Error>
where
    R: Read + Seek,
    F: FnMut((usize, SourceTrip)) -> Result<(), self::Error>,
{
    if !is_zip(&mut reader)? {
        return stream_csv(reader, config, f);
    }
    let mut archive = ZipArchive::new(reader)?;
    let index = trips_index(&mut archive, config)?;
    let file = archive.by_index(index)?;
    stream_csv(file, config, f)
}

fn is_zip<R: Read + Seek>(reader: &mut R) -> Result<bool, self::Error> {
    let mut magic = Vec::with_capacity(ZIP_MAGIC.len());
    reader
        .by_ref()
        .take(ZIP_MAGIC.len() as u64)
        .read_to_end(&mut magic)?;
    reader.rewind()?;
    Ok(magic == ZIP_MAGIC)
}

fn trips_index<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    config: &Config,
) -> Result<usize, self::Error> {
    if let Some(name) = &config.trips_file_name {
        return archive
            .index_for_name(name)
            .ok_or(self::Error::FileNotFound(name.clone()));
    }
    for i in 0..archive.len() {
        let file = archive.by_index(i)?;
        let name = file.name();
        if name.ends_with(".csv") && !name.starts_with("__MACOSX") {
            return Ok(i);
        }
    }
    Err(self::Error::FileNotFound("*.csv".into()))
}

fn stream_csv<T, R, F>(reader: R, config: &Config, mut f: F) -> Result<(), self::Error>
where
    T: DeserializeOwned,
    R: Read,
    F: FnMut((usize, T)) -> Result<(), self::Error>,
{
    let mut reader = csv::Reader::from_reader(reader);
    for (row, result) in reader.deserialize().enumerate() {
        match result {
            Ok(record) => f((row, record))?,
            Err(err) if config.skip_invalid_rows => {
                warn!(row, "Skipping unreadable trip record: {err}");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
