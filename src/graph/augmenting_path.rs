use std::collections::VecDeque;

use crate::error::{Result, SegmentError};
use crate::graph::{Adjacencies, Node};
use crate::types::Capacity;

/// Breadth-first augmenting path search over the residual graph.
///
/// The visited, predecessor and queue buffers are sized once for the grid and
/// reused by every search.
pub struct PathFinder {
    visited: Vec<bool>,
    parent: Vec<Option<Node>>,
    queue: VecDeque<Node>,
}

impl PathFinder {
    pub fn new(node_count: usize) -> Self {
        PathFinder {
            visited: vec![false; node_count],
            parent: vec![None; node_count],
            queue: VecDeque::new(),
        }
    }

    /// Clears reachability and all predecessors.
    pub fn reset(&mut self) {
        self.visited.fill(false);
        self.parent.fill(None);
        self.queue.clear();
    }

    /// Searches for a path from `source` to `sink` using only edges with
    /// residual capacity of at least `threshold`. Returns whether `sink` was
    /// reached; the predecessors of all visited nodes stay available until
    /// the next search.
    pub fn find(
        &mut self,
        graph: &Adjacencies,
        source: Node,
        sink: Node,
        threshold: Capacity,
    ) -> bool {
        self.reset();
        self.visited[source] = true;
        self.queue.push_back(source);
        while !self.visited[sink] {
            let Some(node) = self.queue.pop_front() else {
                break;
            };
            for (target, capacity) in graph.outgoing(node) {
                if *capacity >= threshold && !self.visited[*target] {
                    self.visited[*target] = true;
                    self.parent[*target] = Some(node);
                    self.queue.push_back(*target);
                }
            }
        }
        self.visited[sink]
    }

    pub fn is_visited(&self, node: Node) -> bool {
        self.visited[node]
    }

    pub fn predecessor(&self, node: Node) -> Option<Node> {
        self.parent[node]
    }

    /// The path found by the last search, listed from `sink` back to `source`.
    pub fn path(&self, source: Node, sink: Node) -> Result<Vec<Node>> {
        let mut t = vec![sink];
        let mut node = sink;
        while node != source {
            node = self.parent[node].ok_or(SegmentError::BrokenPath(node))?;
            t.push(node);
            if t.len() > self.parent.len() {
                return Err(SegmentError::BrokenPath(node));
            }
        }
        Ok(t)
    }
}

#[cfg(test)]
mod test {
    use super::PathFinder;
    use crate::graph::Adjacencies;

    // 0 -> 1 -> 3 and 0 -> 2 -> 3, with a thin edge 1 -> 3.
    fn diamond() -> Adjacencies {
        let mut graph = Adjacencies::new(2, 2);
        graph.add_edge(0, 1, 8.0);
        graph.add_edge(0, 2, 5.0);
        graph.add_edge(1, 3, 2.0);
        graph.add_edge(2, 3, 9.0);
        graph
    }

    #[test]
    fn finds_first_path_in_edge_order() {
        let graph = diamond();
        let mut finder = PathFinder::new(graph.node_count());
        assert!(finder.find(&graph, 0, 3, 1.0));
        assert_eq!(finder.path(0, 3).unwrap(), vec![3, 1, 0]);
        assert_eq!(finder.predecessor(2), Some(0));
        assert_eq!(finder.predecessor(0), None);
    }

    #[test]
    fn threshold_skips_thin_edges() {
        let graph = diamond();
        let mut finder = PathFinder::new(graph.node_count());
        assert!(finder.find(&graph, 0, 3, 4.0));
        assert_eq!(finder.path(0, 3).unwrap(), vec![3, 2, 0]);
        assert!(!finder.find(&graph, 0, 3, 6.0));
        assert!(finder.is_visited(1));
        assert!(!finder.is_visited(3));
    }

    #[test]
    fn search_resets_previous_record() {
        let graph = diamond();
        let mut finder = PathFinder::new(graph.node_count());
        assert!(finder.find(&graph, 0, 3, 1.0));
        assert!(!finder.find(&graph, 3, 0, 1.0));
        assert!(!finder.is_visited(1));
        assert_eq!(finder.predecessor(1), None);
        assert!(finder.path(3, 0).is_err());
    }
}
