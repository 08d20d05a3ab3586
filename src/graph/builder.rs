use log::debug;

use crate::graph::Adjacencies;
use crate::types::{Capacity, Connectivity, IntensityGrid, MAX_INTENSITY};

/// Capacity of the edge between pixels of intensity `a` and `b`; higher for
/// more similar pixels.
pub fn edge_capacity(a: u8, b: u8) -> Capacity {
    Capacity::from(MAX_INTENSITY - a.abs_diff(b))
}

/// One directed edge per ordered pair of adjacent pixels, in row-major node
/// order and direction order within a node.
pub fn build_grid_graph(grid: &IntensityGrid, connectivity: Connectivity) -> Adjacencies {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut graph = Adjacencies::new(rows, cols);
    for (index, intensity) in grid.cells().iter().enumerate() {
        let point = grid.point_of(index);
        for neighbour in connectivity
            .neighbours(point, rows, cols)
            .filter_map(|neighbour| grid.index_of(neighbour))
        {
            let adjacent = grid.cells()[neighbour];
            graph.add_edge(index, neighbour, edge_capacity(*intensity, adjacent));
        }
    }
    debug!(
        "Built {rows}x{cols} grid graph with {} edges ({connectivity})",
        graph.edge_count()
    );
    graph
}
