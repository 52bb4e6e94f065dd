mod stations;
mod traffic;

pub use stations::*;
pub use traffic::*;
