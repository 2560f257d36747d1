//! Connectivity between traversable tiles and shortest-path queries

/// Node table and adjacency rebuild
pub mod connectivity;
/// Breadth-first path search
pub mod search;

pub use connectivity::{AdjacencyPolicy, ConnectivityGraph, NodeId, PathNode};
pub use search::PathFinder;
