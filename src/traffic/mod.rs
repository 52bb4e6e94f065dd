mod aggregate;
mod buckets;
mod flow;
mod scale;

pub use aggregate::*;
pub use buckets::*;
pub use flow::*;
pub use scale::*;
