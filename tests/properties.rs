use proptest::prelude::*;

use graphcut::graph::{build_grid_graph, reachable_from, MinCutEngine};
use graphcut::types::{Capacity, Connectivity, IntensityGrid, Point};
use graphcut::SegmentOptions;

fn grid_and_terminals(
    max_side: usize,
) -> impl Strategy<Value = (IntensityGrid, Point, Point)> {
    (1..=max_side, 2..=max_side)
        .prop_flat_map(|(rows, cols)| {
            (
                Just((rows, cols)),
                prop::collection::vec(any::<u8>(), rows * cols),
                0..rows * cols,
                0..rows * cols - 1,
            )
        })
        .prop_map(|((rows, cols), cells, source, sink)| {
            // Shift the sink past the source so the two never coincide.
            let sink = if sink >= source { sink + 1 } else { sink };
            let grid = IntensityGrid::new(rows, cols, cells).unwrap();
            let source = grid.point_of(source);
            let sink = grid.point_of(sink);
            (grid, source, sink)
        })
}

fn connectivity() -> impl Strategy<Value = Connectivity> {
    prop_oneof![Just(Connectivity::Four), Just(Connectivity::Eight)]
}

/// Minimum over all node sets containing the source but not the sink.
fn brute_force_min_cut(
    grid: &IntensityGrid,
    source: Point,
    sink: Point,
    connectivity: Connectivity,
) -> Capacity {
    let graph = build_grid_graph(grid, connectivity);
    let (s, t) = (
        grid.index_of(source).unwrap(),
        grid.index_of(sink).unwrap(),
    );
    let n = grid.len();
    let mut best = Capacity::INFINITY;
    for subset in 0u32..(1 << n) {
        let inside = |node: usize| subset & (1 << node) != 0;
        if !inside(s) || inside(t) {
            continue;
        }
        let value: Capacity = graph
            .edges()
            .filter(|(from, to, _)| inside(*from) && !inside(*to))
            .map(|(_, _, capacity)| capacity)
            .sum();
        best = best.min(value);
    }
    best
}

proptest! {
    #[test]
    fn flow_equals_cut_in_both_modes(
        (grid, source, sink) in grid_and_terminals(5),
        connectivity in connectivity(),
    ) {
        let mut values = Vec::new();
        for scaling in [false, true] {
            let options = SegmentOptions::default()
                .with_connectivity(connectivity)
                .with_capacity_scaling(scaling);
            let mut engine = MinCutEngine::new(&grid, source, sink, options).unwrap();
            let summary = engine.run().unwrap();
            let cut = engine.extract_cut().unwrap();
            prop_assert_eq!(summary.max_flow, cut.cut_value);
            prop_assert_eq!(summary.augmentations, engine.augmentations());
            values.push(cut.cut_value);
        }
        prop_assert_eq!(values[0], values[1]);
    }

    #[test]
    fn cut_is_minimal(
        (grid, source, sink) in grid_and_terminals(3),
        connectivity in connectivity(),
    ) {
        let options = SegmentOptions::default().with_connectivity(connectivity);
        let mut engine = MinCutEngine::new(&grid, source, sink, options).unwrap();
        engine.run().unwrap();
        let cut = engine.extract_cut().unwrap();
        prop_assert_eq!(
            cut.cut_value,
            brute_force_min_cut(&grid, source, sink, connectivity)
        );
    }

    #[test]
    fn partition_is_consistent(
        (grid, source, sink) in grid_and_terminals(6),
        scaling in any::<bool>(),
    ) {
        let options = SegmentOptions::default().with_capacity_scaling(scaling);
        let mut engine = MinCutEngine::new(&grid, source, sink, options).unwrap();
        engine.run().unwrap();
        let first = engine.extract_cut().unwrap();
        let second = engine.extract_cut().unwrap();
        prop_assert_eq!(&first, &second);

        prop_assert_eq!(first.reachable.get(source), Some(true));
        prop_assert_eq!(first.reachable.get(sink), Some(false));
        let reached = reachable_from(engine.residual(), grid.index_of(source).unwrap());
        prop_assert_eq!(first.reachable.cells(), reached.as_slice());

        // Every cut edge leads out of the source region and both ends are marked.
        for edge in &first.cut_edges {
            prop_assert_eq!(first.reachable.get(edge.from), Some(true));
            prop_assert_eq!(first.reachable.get(edge.to), Some(false));
            prop_assert_eq!(first.boundary.get(edge.from), Some(true));
            prop_assert_eq!(first.boundary.get(edge.to), Some(true));
        }
    }
}
