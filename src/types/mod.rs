pub mod connectivity;
pub mod edge;
pub mod grid;
pub mod point;

pub use connectivity::{Connectivity, Direction};
pub use edge::Edge;
pub use grid::{Grid, IntensityGrid, Mask};
pub use point::Point;

pub type Capacity = f64;

/// Ceiling of the 8-bit intensity range.
pub const MAX_INTENSITY: u8 = 255;

/// Residual capacities at or below this are treated as absent.
pub const CAPACITY_EPSILON: Capacity = 1024.0 * f64::EPSILON * MAX_INTENSITY as f64;
