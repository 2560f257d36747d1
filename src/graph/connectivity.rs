//! Connectivity graph between traversable tiles
//!
//! Nodes live in one table and refer to each other by [`NodeId`], so the
//! graph holds no ownership cycles. The whole table is rebuilt from the tile
//! store on every call to [`ConnectivityGraph::rebuild`]; handles from a
//! previous build must not be reused afterwards.

use std::collections::HashMap;

use tracing::debug;

use crate::spatial::index::Cell;
use crate::spatial::store::TileStore;
use crate::spatial::tiles::TilePayload;

// Neighbour offsets in connection order: +x, -x, +z, -z
const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

// Diagonal offset and the two orthogonal slots (indices into ORTHOGONAL) flanking it
const DIAGONAL: [(i32, i32, usize, usize); 4] = [
    (1, 1, 0, 2),
    (-1, -1, 1, 3),
    (-1, 1, 1, 2),
    (1, -1, 0, 3),
];

/// Handle of a node within one build of a [`ConnectivityGraph`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Which neighbours a traversable tile connects to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyPolicy {
    /// Connect the four diagonal neighbours as well
    pub allow_diagonals: bool,
    /// Connect diagonals even when the flanking orthogonal cells are missing
    pub cut_corners: bool,
}

impl AdjacencyPolicy {
    /// Four-directional movement
    pub const ORTHOGONAL: Self = Self {
        allow_diagonals: false,
        cut_corners: false,
    };

    /// Eight-directional movement that never squeezes past a missing corner
    pub const DIAGONAL: Self = Self {
        allow_diagonals: true,
        cut_corners: false,
    };

    /// Eight-directional movement with free corner cutting
    pub const CUT_CORNERS: Self = Self {
        allow_diagonals: true,
        cut_corners: true,
    };
}

/// Traversable tile and its adjacent nodes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathNode {
    cell: Cell,
    tile_index: usize,
    connections: Vec<NodeId>,
}

impl PathNode {
    /// Cell the node sits on
    pub const fn cell(&self) -> Cell {
        self.cell
    }

    /// Store position of the tile this node belongs to
    pub const fn tile_index(&self) -> usize {
        self.tile_index
    }

    /// Adjacent nodes in connection order
    pub fn connections(&self) -> &[NodeId] {
        &self.connections
    }
}

/// Adjacency lists for every traversable tile
#[derive(Clone, Debug, Default)]
pub struct ConnectivityGraph {
    nodes: Vec<PathNode>,
    by_cell: HashMap<Cell, NodeId>,
}

impl ConnectivityGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from scratch for the given store
    pub fn build<P: TilePayload, I>(store: &TileStore<P, I>, policy: AdjacencyPolicy) -> Self {
        let mut graph = Self::new();
        graph.rebuild(store, policy);
        graph
    }

    /// Recompute every node and connection from the tile store
    ///
    /// Tiles whose payload is not a path node are left out entirely. Each
    /// node collects its own neighbours, so symmetry follows from every node
    /// being visited under the same rules.
    pub fn rebuild<P: TilePayload, I>(&mut self, store: &TileStore<P, I>, policy: AdjacencyPolicy) {
        self.nodes.clear();
        self.by_cell.clear();

        for (tile_index, record) in store.iter().enumerate() {
            if record.payload().is_path_node() {
                let id = NodeId(self.nodes.len());
                self.nodes.push(PathNode {
                    cell: record.cell(),
                    tile_index,
                    connections: Vec::new(),
                });
                self.by_cell.insert(record.cell(), id);
            }
        }

        for position in 0..self.nodes.len() {
            let Some(cell) = self.nodes.get(position).map(PathNode::cell) else {
                continue;
            };
            let connections = self.collect_connections(cell, policy);
            if let Some(node) = self.nodes.get_mut(position) {
                node.connections = connections;
            }
        }

        debug!(
            nodes = self.nodes.len(),
            edges = self.edge_count(),
            allow_diagonals = policy.allow_diagonals,
            cut_corners = policy.cut_corners,
            "rebuilt connectivity graph"
        );
    }

    fn collect_connections(&self, cell: Cell, policy: AdjacencyPolicy) -> Vec<NodeId> {
        let neighbour = |dx: i32, dz: i32| self.by_cell.get(&cell.offset(dx, dz)).copied();

        let orthogonal = ORTHOGONAL.map(|(dx, dz)| neighbour(dx, dz));
        let mut connections: Vec<NodeId> = orthogonal.iter().flatten().copied().collect();

        if policy.allow_diagonals {
            for (dx, dz, first, second) in DIAGONAL {
                let flanked = orthogonal.get(first).is_some_and(Option::is_some)
                    && orthogonal.get(second).is_some_and(Option::is_some);
                if policy.cut_corners || flanked {
                    connections.extend(neighbour(dx, dz));
                }
            }
        }

        connections
    }

    /// Number of nodes
    pub const fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no nodes
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| node.connections.len())
            .sum::<usize>()
            / 2
    }

    /// Node standing on `cell`
    pub fn node_at(&self, cell: Cell) -> Option<NodeId> {
        self.by_cell.get(&cell).copied()
    }

    /// Node data for a handle
    pub fn node(&self, id: NodeId) -> Option<&PathNode> {
        self.nodes.get(id.0)
    }

    /// Adjacent nodes of a handle; empty for unknown handles
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(PathNode::connections)
            .unwrap_or(&[])
    }

    /// Check whether `a` lists `b` as a neighbour
    pub fn is_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// All nodes in handle order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &PathNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (NodeId(position), node))
    }

    /// Every undirected edge once, lower handle first
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes().flat_map(|(id, node)| {
            node.connections
                .iter()
                .filter(move |&&other| other > id)
                .map(move |&other| (id, other))
        })
    }
}
