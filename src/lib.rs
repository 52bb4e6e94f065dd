pub mod repository;
pub mod shared;
pub mod source;
pub mod traffic;

pub mod prelude {
    pub use crate::repository::{Repository, Station, Trip};
    pub use crate::shared::{Coordinate, MinuteOfDay, TimeFilter};
    pub use crate::source::{self, Config};
    pub use crate::traffic::{Direction, FlowLevel, MinuteBuckets, RadiusScale, StationTraffic};
}
