mod azimuth;
mod coords;
mod distance;

pub use azimuth::*;
pub use coords::*;
pub use distance::*;
