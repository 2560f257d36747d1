//! Tile map facade and world-space conversion

/// Store, graph and search behind one editing and query surface
pub mod tilemap;
/// Conversion between cells and world positions
pub mod world;

pub use tilemap::TileMap;
pub use world::WorldPosition;
