//! Integer hashing of grid cells into a single linear key
//!
//! Cells are folded into one non-negative integer so the tile store can keep
//! a flat, insertion-ordered list instead of a 2D sparse structure. The hash
//! is injective only inside the configured coordinate range, so every entry
//! point checks the range first.

use crate::io::error::{Result, TileMapError, invalid_parameter};

/// Discrete grid coordinate on the `x`/`z` plane
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Column
    pub x: i32,
    /// Row
    pub z: i32,
}

impl Cell {
    /// Create a cell from its coordinates
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Cell displaced by the given deltas
    #[must_use]
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            z: self.z.wrapping_add(dz),
        }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, z): (i32, i32)) -> Self {
        Self::new(x, z)
    }
}

/// Linear key of a cell within a [`SpatialIndex`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellHash(pub u64);

/// Maps cells in `[-half, full - half)` on both axes to dense hashes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpatialIndex {
    full_range: i32,
    half_range: i32,
}

impl SpatialIndex {
    /// Create an index spanning `max_columns` cells per axis
    ///
    /// # Errors
    ///
    /// Returns an error if `max_columns` is less than 2
    pub fn new(max_columns: i32) -> Result<Self> {
        if max_columns < 2 {
            return Err(invalid_parameter(
                "max_columns",
                &max_columns,
                &"must be at least 2",
            ));
        }

        Ok(Self {
            full_range: max_columns,
            half_range: max_columns / 2,
        })
    }

    /// Smallest valid coordinate (inclusive)
    pub const fn min_coordinate(&self) -> i32 {
        -self.half_range
    }

    /// Largest valid coordinate (inclusive)
    pub const fn max_coordinate(&self) -> i32 {
        self.full_range - self.half_range - 1
    }

    /// Cells per axis
    pub const fn full_range(&self) -> i32 {
        self.full_range
    }

    /// Check whether a cell can be hashed without collision
    pub const fn contains(&self, cell: Cell) -> bool {
        let min = self.min_coordinate();
        let max = self.max_coordinate();
        cell.x >= min && cell.x <= max && cell.z >= min && cell.z <= max
    }

    /// Hash a cell into its linear key
    ///
    /// # Errors
    ///
    /// Returns [`TileMapError::CoordinateOutOfRange`] if either coordinate
    /// lies outside the indexed range
    pub fn hash(&self, cell: Cell) -> Result<CellHash> {
        if !self.contains(cell) {
            return Err(TileMapError::CoordinateOutOfRange {
                cell,
                min: self.min_coordinate(),
                max: self.max_coordinate(),
            });
        }

        // Both shifted terms are non-negative once the range check has passed
        let column = i64::from(cell.x) + i64::from(self.half_range);
        let row = i64::from(cell.z) + i64::from(self.half_range);
        Ok(CellHash((column + row * i64::from(self.full_range)) as u64))
    }

    /// Hash a cell, treating out-of-range cells as absent
    pub fn try_hash(&self, cell: Cell) -> Option<CellHash> {
        self.hash(cell).ok()
    }

    /// Recover the cell a hash was computed from
    pub const fn cell_of(&self, hash: CellHash) -> Cell {
        let full = self.full_range as u64;
        let column = (hash.0 % full) as i64;
        let row = (hash.0 / full) as i64;
        Cell {
            x: (column - self.half_range as i64) as i32,
            z: (row - self.half_range as i64) as i32,
        }
    }
}
