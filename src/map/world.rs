//! Conversion between cells and world-space positions
//!
//! Cells sit on the `y = 0` plane with their centers `tile_size` apart. Only
//! these conversions depend on the tile size; graph topology never does.

use num_traits::ToPrimitive;

use crate::spatial::index::Cell;

/// Point in world units
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPosition {
    /// Horizontal axis matching cell `x`
    pub x: f32,
    /// Vertical axis, zero for every cell center
    pub y: f32,
    /// Horizontal axis matching cell `z`
    pub z: f32,
}

impl WorldPosition {
    /// Create a position from its components
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Straight-line distance to another position
    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dz.mul_add(dz, dx.mul_add(dx, dy * dy)).sqrt()
    }
}

/// Center of a cell in world units
pub fn cell_center(cell: Cell, tile_size: f32) -> WorldPosition {
    WorldPosition {
        x: cell.x as f32 * tile_size,
        y: 0.0,
        z: cell.z as f32 * tile_size,
    }
}

/// Cell whose center is nearest to a world position
///
/// Halfway cases round to the even cell. Returns `None` when the scaled
/// position is not a finite value representable as a cell coordinate.
pub fn cell_containing(position: WorldPosition, tile_size: f32) -> Option<Cell> {
    let x = (position.x / tile_size).round_ties_even().to_i32()?;
    let z = (position.z / tile_size).round_ties_even().to_i32()?;
    Some(Cell::new(x, z))
}
