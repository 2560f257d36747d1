//! Breadth-first shortest-path search over a [`ConnectivityGraph`]
//!
//! All edges are unweighted, so the first time the target leaves the queue
//! the predecessor chain back to the start is a minimum-edge route. Queue,
//! visited set and predecessor table live in [`PathFinder`] and are reused
//! between queries; one finder must not be shared between threads without
//! external locking, but any number of finders may read the same graph.

use std::collections::VecDeque;

use bitvec::vec::BitVec;
use tracing::trace;

use crate::graph::connectivity::{ConnectivityGraph, NodeId, PathNode};

/// Reusable scratch state for path queries
#[derive(Clone, Debug, Default)]
pub struct PathFinder {
    queue: VecDeque<NodeId>,
    visited: BitVec,
    source: Vec<Option<NodeId>>,
}

impl PathFinder {
    /// Create a finder with empty scratch buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Search for a route from `start` to `end` through walkable nodes
    ///
    /// On success `path` is cleared and refilled with the route, both
    /// endpoints included, and `true` is returned. On failure `path` is left
    /// as it was.
    ///
    /// An unwalkable `end` fails immediately. An unwalkable `start` is still
    /// recorded as visited but never expanded, so the search can only fail.
    pub fn find_path<F>(
        &mut self,
        graph: &ConnectivityGraph,
        start: NodeId,
        end: NodeId,
        mut is_walkable: F,
        path: &mut Vec<NodeId>,
    ) -> bool
    where
        F: FnMut(&PathNode) -> bool,
    {
        let (Some(start_node), Some(end_node)) = (graph.node(start), graph.node(end)) else {
            return false;
        };

        if !is_walkable(end_node) {
            trace!(?start, ?end, "target not walkable");
            return false;
        }

        self.reset(graph.node_count());
        self.mark_visited(start);
        if is_walkable(start_node) {
            self.queue.push_back(start);
        }

        let mut explored = 0_usize;
        while let Some(current) = self.queue.pop_front() {
            explored += 1;
            if current == end {
                self.trace_route(start, end, path);
                trace!(?start, ?end, explored, length = path.len(), "path found");
                return true;
            }

            for &next in graph.neighbors(current) {
                if self.is_visited(next) {
                    continue;
                }
                let Some(node) = graph.node(next) else {
                    continue;
                };
                if is_walkable(node) {
                    self.mark_visited(next);
                    if let Some(slot) = self.source.get_mut(next.0) {
                        *slot = Some(current);
                    }
                    self.queue.push_back(next);
                }
            }
        }

        trace!(?start, ?end, explored, "no path");
        false
    }

    /// Search treating every node as walkable
    pub fn find_path_unfiltered(
        &mut self,
        graph: &ConnectivityGraph,
        start: NodeId,
        end: NodeId,
        path: &mut Vec<NodeId>,
    ) -> bool {
        self.find_path(graph, start, end, |_| true, path)
    }

    fn reset(&mut self, node_count: usize) {
        self.queue.clear();
        self.visited.clear();
        self.visited.resize(node_count, false);
        self.source.clear();
        self.source.resize(node_count, None);
    }

    fn is_visited(&self, id: NodeId) -> bool {
        self.visited.get(id.0).as_deref() == Some(&true)
    }

    fn mark_visited(&mut self, id: NodeId) {
        if let Some(mut bit) = self.visited.get_mut(id.0) {
            *bit = true;
        }
    }

    fn trace_route(&self, start: NodeId, end: NodeId, path: &mut Vec<NodeId>) {
        path.clear();
        let mut current = Some(end);
        while let Some(id) = current {
            path.push(id);
            if id == start {
                break;
            }
            current = self.source.get(id.0).copied().flatten();
        }
        path.reverse();
    }
}
