pub mod adjacencies;
pub mod augmenting_path;
pub mod builder;
pub mod cut;
pub mod flow;


// The pixel grid is the node index space: a node is the row-major index
// `row * cols + col` of its pixel, so no node objects are ever allocated.
//
// Between every pair of adjacent pixels u, v there are two directed edges,
// u -> v and v -> u, each starting with capacity
//
//     MAX_INTENSITY - |I[u] - I[v]|
//
// Similar pixels are joined by expensive edges, so the minimum cut between
// the two terminals runs along intensity edges of the image.
//
// The engine keeps two adjacency tables with the same layout: the original
// graph, frozen after building, and the residual graph that every
// augmentation mutates. The cut is read off by comparing the two.

pub type Node = usize;

pub use crate::graph::adjacencies::Adjacencies;
pub use crate::graph::augmenting_path::PathFinder;
pub use crate::graph::builder::{build_grid_graph, edge_capacity};
pub use crate::graph::cut::{extract_cut, reachable_from, Segmentation};
pub use crate::graph::flow::{augment, segment, EngineState, FlowSummary, MinCutEngine, ScalingMode};
