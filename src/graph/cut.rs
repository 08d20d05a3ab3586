use std::collections::VecDeque;

use serde::Serialize;

use crate::error::Result;
use crate::graph::{Adjacencies, Node};
use crate::types::{Capacity, Edge, Mask};

/// The minimum cut of a saturated residual graph.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Segmentation {
    /// Pixels at either end of a cut edge.
    pub boundary: Mask,
    /// Pixels still reachable from the source; the source's region.
    pub reachable: Mask,
    /// Original edges leading from the source side to the sink side.
    pub cut_edges: Vec<Edge>,
    /// Sum of the original capacities of `cut_edges`.
    pub cut_value: Capacity,
}

/// Nodes reachable from `source` over edges with positive capacity.
pub fn reachable_from(graph: &Adjacencies, source: Node) -> Vec<bool> {
    let mut visited = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();
    visited[source] = true;
    queue.push_back(source);
    while let Some(node) = queue.pop_front() {
        for (target, capacity) in graph.outgoing(node) {
            if *capacity > 0.0 && !visited[*target] {
                visited[*target] = true;
                queue.push_back(*target);
            }
        }
    }
    visited
}

/// Every original edge from a node reachable in `residual` to one that is
/// not crosses the cut; both of its pixels are marked on the boundary.
pub fn extract_cut(
    original: &Adjacencies,
    residual: &Adjacencies,
    rows: usize,
    cols: usize,
    source: Node,
) -> Result<Segmentation> {
    let reached = reachable_from(residual, source);
    let mut boundary = Mask::filled(rows, cols, false)?;
    let mut cut_edges = Vec::new();
    let mut cut_value = 0.0;
    for (from, to, capacity) in original.edges() {
        if reached[from] && !reached[to] {
            let edge = Edge {
                from: original.point_of(from),
                to: original.point_of(to),
                capacity,
            };
            boundary.set(edge.from, true);
            boundary.set(edge.to, true);
            cut_value += capacity;
            cut_edges.push(edge);
        }
    }
    Ok(Segmentation {
        boundary,
        reachable: Mask::new(rows, cols, reached)?,
        cut_edges,
        cut_value,
    })
}

impl Segmentation {
    pub fn boundary_pixel_count(&self) -> usize {
        self.boundary.count(true)
    }
}
