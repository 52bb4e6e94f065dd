use bikeflow::source;
use std::{env, num::ParseIntError, path::PathBuf};

const DEFAULT_STATIONS: &str = "https://dsc106.com/labs/lab07/data/bluebikes-stations.json";
const DEFAULT_TRIPS: &str = "https://dsc106.com/labs/lab07/data/bluebikes-traffic-2024-03.csv";
const DEFAULT_PORT: u16 = 3000;

pub struct Config {
    /// URL or local path of the station directory.
    pub stations: String,
    /// URL or local path of the trip log, plain CSV or zipped.
    pub trips: String,
    pub port: u16,
    /// Where downloaded sources are written before loading.
    pub data_dir: PathBuf,
    pub source: source::Config,
}

impl Config {
    /// Reads `BIKEFLOW_*` variables. A first command line argument
    /// replaces the trip log source.
    pub fn from_env() -> Result<Self, ParseIntError> {
        let port = match env::var("BIKEFLOW_PORT") {
            Ok(port) => port.parse()?,
            Err(_) => DEFAULT_PORT,
        };
        let trips = env::args()
            .nth(1)
            .or_else(|| env::var("BIKEFLOW_TRIPS").ok())
            .unwrap_or_else(|| DEFAULT_TRIPS.into());
        let stations = env::var("BIKEFLOW_STATIONS").unwrap_or_else(|_| DEFAULT_STATIONS.into());
        let data_dir = env::var("BIKEFLOW_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir().join("bikeflow"));

        let mut source = source::Config::default()
            .skip_invalid_rows(matches!(
                env::var("BIKEFLOW_SKIP_INVALID_ROWS").as_deref(),
                Ok("1" | "true")
            ));
        if let Ok(name) = env::var("BIKEFLOW_TRIPS_FILE") {
            source = source.with_trips_file_name(name);
        }

        Ok(Self {
            stations,
            trips,
            port,
            data_dir,
            source,
        })
    }
}
