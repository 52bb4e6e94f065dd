use bikeflow::shared::time::TimeFilter;
use serde::{Deserialize, Serialize};

/// Slider value and the label shown next to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeDto {
    pub time: i32,
    pub label: String,
}

impl TimeDto {
    pub fn from(filter: TimeFilter) -> Self {
        Self {
            time: filter.into(),
            label: filter.to_string(),
        }
    }
}
