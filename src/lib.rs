pub mod error;
pub mod graph;
pub mod io;
pub mod options;
pub mod types;

pub use crate::error::{Result, SegmentError};
pub use crate::graph::{segment, MinCutEngine, Segmentation};
pub use crate::options::SegmentOptions;
