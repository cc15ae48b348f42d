pub mod bounds;
pub mod geometry;
pub mod observation;

pub use bounds::GeoBounds;
pub use geometry::{Geometry, LonLat, Ring};
pub use observation::{MonthlySeries, Observation};
