//! Spatial data structures for placed tiles
//!
//! This module contains:
//! - Integer hashing of cells over a bounded coordinate range
//! - Tile payloads, orientations and the host instance seam
//! - The insertion-ordered tile store

/// Cell hashing and coordinate range checks
pub mod index;
/// Insertion-ordered tile store
pub mod store;
/// Payload, orientation and host traits
pub mod tiles;

pub use index::{Cell, CellHash, SpatialIndex};
pub use store::{TileRecord, TileStore};
pub use tiles::{NoopHost, Orientation, Placement, Prefab, TileHost, TilePayload, TileSet};
