use crate::error::{Result, SegmentError};
use crate::graph::Node;
use crate::types::{Capacity, Point, CAPACITY_EPSILON};

/// Per-node ordered lists of `(target, capacity)`.
///
/// The list order is the order edges were added, which is the order the path
/// finder explores them in.
#[derive(Clone, Debug, PartialEq)]
pub struct Adjacencies {
    cols: usize,
    nodes: Vec<Vec<(Node, Capacity)>>,
}

impl Adjacencies {
    pub fn new(rows: usize, cols: usize) -> Self {
        Adjacencies {
            cols,
            nodes: vec![Vec::new(); rows * cols],
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|out| out.len()).sum()
    }

    pub fn point_of(&self, node: Node) -> Point {
        Point::new(node / self.cols, node % self.cols)
    }

    pub fn outgoing(&self, from: Node) -> &[(Node, Capacity)] {
        &self.nodes[from]
    }

    pub fn add_edge(&mut self, from: Node, to: Node, capacity: Capacity) {
        self.nodes[from].push((to, capacity));
    }

    pub fn capacity(&self, from: Node, to: Node) -> Option<Capacity> {
        self.nodes[from]
            .iter()
            .find(|(target, _)| *target == to)
            .map(|(_, capacity)| *capacity)
    }

    /// Adds `amount` to `from -> to`, creating the edge if the graph lacks it.
    pub fn increase_capacity(&mut self, from: Node, to: Node, amount: Capacity) {
        let out = &mut self.nodes[from];
        match out.iter_mut().find(|(target, _)| *target == to) {
            Some((_, capacity)) => *capacity += amount,
            None => out.push((to, amount)),
        }
    }

    /// Subtracts `amount` from `from -> to` and drops the edge once it is
    /// effectively empty.
    pub fn decrease_capacity(&mut self, from: Node, to: Node, amount: Capacity) -> Result<()> {
        let from_point = self.point_of(from);
        let to_point = self.point_of(to);
        let out = &mut self.nodes[from];
        let position = out
            .iter()
            .position(|(target, _)| *target == to)
            .ok_or(SegmentError::MissingEdge {
                from: from_point,
                to: to_point,
            })?;
        let remaining = out[position].1 - amount;
        if remaining < -CAPACITY_EPSILON {
            return Err(SegmentError::NegativeCapacity {
                from: from_point,
                to: to_point,
                capacity: remaining,
            });
        }
        if remaining <= CAPACITY_EPSILON {
            // Vec::remove keeps the remaining edges in exploration order.
            out.remove(position);
        } else {
            out[position].1 = remaining;
        }
        Ok(())
    }

    pub fn max_capacity(&self) -> Capacity {
        self.edges()
            .map(|(_, _, capacity)| capacity)
            .fold(0.0, Capacity::max)
    }

    pub fn edges(&self) -> impl Iterator<Item = (Node, Node, Capacity)> + '_ {
        self.nodes.iter().enumerate().flat_map(|(from, out)| {
            out.iter()
                .map(move |(to, capacity)| (from, *to, *capacity))
        })
    }
}
