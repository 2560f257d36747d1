//! Sparse tile grids with a derived connectivity graph and shortest-path queries
//!
//! Tiles are placed on integer `(x, z)` cells, hashed into a flat store, and
//! every traversable tile becomes a node connected to its occupied neighbours
//! under a 4- or 8-directional policy. Breadth-first search then answers
//! minimum-step route queries filtered by a caller-supplied predicate.

#![forbid(unsafe_code)]

/// Connectivity graph construction and breadth-first path search
pub mod graph;
/// Input/output operations, configuration and error handling
pub mod io;
/// Tile map facade and world-space conversion
pub mod map;
/// Cell hashing, tile payloads and the tile store
pub mod spatial;

pub use graph::{AdjacencyPolicy, ConnectivityGraph, NodeId, PathFinder, PathNode};
pub use io::configuration::MapConfig;
pub use io::error::{Result, TileMapError};
pub use map::{TileMap, WorldPosition};
pub use spatial::{Cell, NoopHost, Orientation, Prefab, TileHost, TilePayload};
