use std::fmt::{Display, Formatter};

use log::{debug, error, info, trace};
use serde::Serialize;

use crate::error::{Result, SegmentError};
use crate::graph::cut::{extract_cut, Segmentation};
use crate::graph::{build_grid_graph, Adjacencies, Node, PathFinder};
use crate::options::SegmentOptions;
use crate::types::{Capacity, IntensityGrid, Point, MAX_INTENSITY};

/// Threshold of plain mode and the last level of scaling mode.
const MIN_THRESHOLD: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingMode {
    Plain,
    Scaling,
}

impl ScalingMode {
    pub fn from_flag(capacity_scaling: bool) -> Self {
        if capacity_scaling {
            ScalingMode::Scaling
        } else {
            ScalingMode::Plain
        }
    }

    /// First capacity threshold of the controller loop.
    pub fn initial_threshold(self) -> u32 {
        match self {
            ScalingMode::Plain => MIN_THRESHOLD,
            ScalingMode::Scaling => (u32::from(MAX_INTENSITY) + 1).next_power_of_two(),
        }
    }
}

impl Display for ScalingMode {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ScalingMode::Plain => write!(f, "plain"),
            ScalingMode::Scaling => write!(f, "capacity scaling"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EngineState {
    Built,
    Searching,
    Augmenting,
    Saturated,
    CutExtracted,
}

impl Display for EngineState {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FlowSummary {
    pub mode: ScalingMode,
    pub augmentations: u64,
    pub max_flow: Capacity,
}

/// Pushes the bottleneck capacity along the path recorded by `finder` and
/// returns it.
///
/// Every forward edge loses the bottleneck and every reverse edge gains it,
/// so later paths can cancel flow pushed here.
pub fn augment(
    graph: &mut Adjacencies,
    finder: &PathFinder,
    source: Node,
    sink: Node,
) -> Result<Capacity> {
    let path = finder.path(source, sink)?;
    let mut bottleneck = Capacity::INFINITY;
    for window in path.windows(2) {
        if let [node, prev] = window {
            let capacity = graph
                .capacity(*prev, *node)
                .ok_or(SegmentError::MissingEdge {
                    from: graph.point_of(*prev),
                    to: graph.point_of(*node),
                })?;
            bottleneck = bottleneck.min(capacity);
        }
    }
    trace!(
        "Augmenting path of {} edges with bottleneck {bottleneck}",
        path.len() - 1
    );
    for window in path.windows(2) {
        if let [node, prev] = window {
            graph.increase_capacity(*node, *prev, bottleneck);
            graph.decrease_capacity(*prev, *node, bottleneck)?;
        }
    }
    Ok(bottleneck)
}

/// Max-flow / min-cut segmentation of one grid between two fixed terminals.
pub struct MinCutEngine {
    rows: usize,
    cols: usize,
    source: Node,
    sink: Node,
    original: Adjacencies,
    residual: Adjacencies,
    finder: PathFinder,
    options: SegmentOptions,
    state: EngineState,
    augmentations: u64,
    total_flow: Capacity,
}

impl MinCutEngine {
    /// Validates the terminals and builds the original and residual graphs.
    pub fn new(
        grid: &IntensityGrid,
        source: Point,
        sink: Point,
        options: SegmentOptions,
    ) -> Result<Self> {
        let node_of = |terminal: Point| {
            grid.index_of(terminal).ok_or(SegmentError::TerminalOutOfBounds {
                    point: terminal,
                    rows: grid.rows(),
                    cols: grid.cols(),
                })
        };
        let (source_node, sink_node) = (node_of(source)?, node_of(sink)?);
        if source == sink {
            return Err(SegmentError::TerminalsCoincide(source));
        }
        let original = build_grid_graph(grid, options.connectivity);
        let residual = original.clone();
        info!(
            "Segmenting {}x{} grid from {source} to {sink} ({}, {} mode)",
            grid.rows(),
            grid.cols(),
            options.connectivity,
            ScalingMode::from_flag(options.capacity_scaling)
        );
        Ok(MinCutEngine {
            rows: grid.rows(),
            cols: grid.cols(),
            source: source_node,
            sink: sink_node,
            finder: PathFinder::new(original.node_count()),
            original,
            residual,
            options,
            state: EngineState::Built,
            augmentations: 0,
            total_flow: 0.0,
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn mode(&self) -> ScalingMode {
        ScalingMode::from_flag(self.options.capacity_scaling)
    }

    pub fn augmentations(&self) -> u64 {
        self.augmentations
    }

    /// Sum of all bottlenecks pushed so far.
    pub fn total_flow(&self) -> Capacity {
        self.total_flow
    }

    pub fn original(&self) -> &Adjacencies {
        &self.original
    }

    pub fn residual(&self) -> &Adjacencies {
        &self.residual
    }

    /// Augments until no path exists under the final threshold.
    pub fn run(&mut self) -> Result<FlowSummary> {
        if self.state != EngineState::Built {
            return Err(SegmentError::InvalidState(self.state.to_string()));
        }
        let mode = self.mode();
        let mut threshold = mode.initial_threshold();
        while threshold >= MIN_THRESHOLD {
            let before = self.augmentations;
            while let Some(bottleneck) = self.augment_once(Capacity::from(threshold))? {
                self.total_flow += bottleneck;
            }
            debug!(
                "Threshold {threshold}: {} augmentations, flow so far {}",
                self.augmentations - before,
                self.total_flow
            );
            threshold /= 2;
        }
        self.state = EngineState::Saturated;
        info!(
            "Max flow: {} after {} augmentations",
            self.total_flow, self.augmentations
        );
        Ok(FlowSummary {
            mode,
            augmentations: self.augmentations,
            max_flow: self.total_flow,
        })
    }

    /// One search and, if a path exists, one augmentation along it.
    fn augment_once(&mut self, threshold: Capacity) -> Result<Option<Capacity>> {
        self.state = EngineState::Searching;
        if !self
            .finder
            .find(&self.residual, self.source, self.sink, threshold)
        {
            return Ok(None);
        }
        if let Some(limit) = self.options.max_augmentations {
            if self.augmentations >= limit {
                return Err(SegmentError::AugmentationLimit(limit));
            }
        }
        self.state = EngineState::Augmenting;
        let bottleneck = augment(&mut self.residual, &self.finder, self.source, self.sink)
            .map_err(|e| {
                error!("Residual graph is inconsistent with the augmenting path: {e}");
                e
            })?;
        self.augmentations += 1;
        debug!(
            "Augmentation {}: pushed {bottleneck} at threshold {threshold}",
            self.augmentations
        );
        Ok(Some(bottleneck))
    }

    /// Reads the minimum cut off the saturated residual graph. May be called
    /// any number of times once `run` has finished.
    pub fn extract_cut(&mut self) -> Result<Segmentation> {
        match self.state {
            EngineState::Saturated | EngineState::CutExtracted => {}
            state => return Err(SegmentError::InvalidState(state.to_string())),
        }
        let segmentation = extract_cut(
            &self.original,
            &self.residual,
            self.rows,
            self.cols,
            self.source,
        )?;
        self.state = EngineState::CutExtracted;
        info!(
            "Cut value {} over {} edges, {} boundary pixels",
            segmentation.cut_value,
            segmentation.cut_edges.len(),
            segmentation.boundary.count(true)
        );
        Ok(segmentation)
    }
}

/// Builds the engine, runs it to saturation and extracts the cut.
pub fn segment(
    grid: &IntensityGrid,
    source: Point,
    sink: Point,
    options: SegmentOptions,
) -> Result<Segmentation> {
    let mut engine = MinCutEngine::new(grid, source, sink, options)?;
    engine.run()?;
    engine.extract_cut()
}
