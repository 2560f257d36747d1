//! Error types for tile map operations

use std::fmt;
use std::path::PathBuf;

use crate::spatial::index::Cell;

/// Main error type for all tile map operations
#[derive(Debug)]
pub enum TileMapError {
    /// Cell lies outside the coordinate range covered by the spatial index
    ///
    /// Hashing such a cell would collide with an in-range cell, so it is
    /// rejected before it can reach the tile store.
    CoordinateOutOfRange {
        /// The rejected cell
        cell: Cell,
        /// Smallest valid coordinate on either axis (inclusive)
        min: i32,
        /// Largest valid coordinate on either axis (inclusive)
        max: i32,
    },

    /// Configuration or argument validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Input map cannot be turned into tiles
    InvalidMapData {
        /// Description of what's wrong with the map
        reason: String,
    },

    /// Failed to load a map image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered map to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for TileMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoordinateOutOfRange { cell, min, max } => {
                write!(
                    f,
                    "Cell ({}, {}) is outside the indexed range [{min}, {max}]",
                    cell.x, cell.z
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidMapData { reason } => {
                write!(f, "Invalid map data: {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for TileMapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for tile map results
pub type Result<T> = std::result::Result<T, TileMapError>;

impl From<std::io::Error> for TileMapError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TileMapError {
    TileMapError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid map data error
pub fn invalid_map(reason: &impl ToString) -> TileMapError {
    TileMapError::InvalidMapData {
        reason: reason.to_string(),
    }
}
