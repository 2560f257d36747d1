//! Map constants and runtime configuration defaults

use crate::graph::connectivity::AdjacencyPolicy;
use crate::io::error::{Result, invalid_parameter};

// Span of the spatial index per axis; hashes of 10_000^2 cells still fit in 32 bits
/// Default number of indexable columns (and rows)
pub const MAX_COLUMNS: i32 = 10_000;

/// Default world units per cell
pub const DEFAULT_TILE_SIZE: f32 = 1.0;

/// Fixed seed for reproducible random orientations
pub const DEFAULT_SEED: u64 = 42;

/// Number of distinct tile orientations (quarter turns)
pub const ORIENTATION_COUNT: u8 = 4;

// Output settings
/// Suffix added to rendered map filenames
pub const OUTPUT_SUFFIX: &str = "_path";
/// Pixel colour marking a placed but non-traversable tile
pub const BLOCKED_COLOR: [u8; 4] = [0, 0, 0, 255];
/// Pixel colour used to paint the route in exported maps
pub const ROUTE_COLOR: [u8; 4] = [255, 0, 0, 255];
/// Alpha below which a map pixel counts as empty
pub const MIN_OPAQUE_ALPHA: u8 = 128;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// Runtime configuration for a tile map
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapConfig {
    /// World units per cell; affects only coordinate conversion
    pub tile_size: f32,
    /// Connect diagonal neighbours as well as orthogonal ones
    pub allow_diagonals: bool,
    /// Allow diagonal moves past missing orthogonal neighbours
    pub cut_corners: bool,
    /// Columns (and rows) covered by the spatial index
    pub max_columns: i32,
    /// Seed for the orientation RNG
    pub seed: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            allow_diagonals: false,
            cut_corners: false,
            max_columns: MAX_COLUMNS,
            seed: DEFAULT_SEED,
        }
    }
}

impl MapConfig {
    /// Adjacency rules derived from the diagonal flags
    pub const fn adjacency(&self) -> AdjacencyPolicy {
        AdjacencyPolicy {
            allow_diagonals: self.allow_diagonals,
            cut_corners: self.cut_corners,
        }
    }

    /// Check that every option is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the tile size is not a positive finite number or
    /// the column count is too small to index any cell pair
    pub fn validate(&self) -> Result<()> {
        validate_tile_size(self.tile_size)?;
        if self.max_columns < 2 {
            return Err(invalid_parameter(
                "max_columns",
                &self.max_columns,
                &"must be at least 2",
            ));
        }
        Ok(())
    }
}

/// Check a tile size on its own
///
/// # Errors
///
/// Returns an error if `tile_size` is zero, negative, NaN or infinite
pub fn validate_tile_size(tile_size: f32) -> Result<()> {
    if tile_size.is_finite() && tile_size > 0.0 {
        Ok(())
    } else {
        Err(invalid_parameter(
            "tile_size",
            &tile_size,
            &"must be a positive finite number",
        ))
    }
}
