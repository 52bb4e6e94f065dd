#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Name of the trip log inside a zip archive.
    /// When unset the first `.csv` entry outside of `__MACOSX/` is used.
    pub trips_file_name: Option<String>,
    /// Skip trip rows that fail to parse instead of failing the whole load.
    pub skip_invalid_rows: bool,
}

impl Config {
    pub fn with_trips_file_name(mut self, name: impl Into<String>) -> Self {
        self.trips_file_name = Some(name.into());
        self
    }

    pub fn skip_invalid_rows(mut self, skip: bool) -> Self {
        self.skip_invalid_rows = skip;
        self
    }
}
