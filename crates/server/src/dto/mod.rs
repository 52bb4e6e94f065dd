mod marker;
mod station;
mod time;

pub use marker::*;
pub use station::*;
pub use time::*;
