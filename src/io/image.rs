//! PNG maps: loading pixels as tiles and exporting routes
//!
//! Each opaque pixel at column `c`, row `r` becomes a tile at cell `(c, r)`
//! carrying the pixel colour. Pixels in the blocked colour are placed too,
//! but never join the connectivity graph.

use std::path::Path;

use image::{ImageBuffer, Rgba};
use ndarray::Array2;

use crate::io::configuration::{MIN_OPAQUE_ALPHA, ROUTE_COLOR};
use crate::io::error::{Result, TileMapError, invalid_map};
use crate::map::tilemap::TileMap;
use crate::spatial::index::Cell;
use crate::spatial::tiles::{TileHost, TilePayload};

/// Raster of optional pixel colours, indexed `[row, col]`
pub type MapRaster = Array2<Option<[u8; 4]>>;

/// Payload of a tile loaded from a map image
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelTile {
    /// Source pixel colour
    pub color: [u8; 4],
    /// Whether the tile joins the connectivity graph
    pub walkable: bool,
}

impl TilePayload for PixelTile {
    fn is_path_node(&self) -> bool {
        self.walkable
    }
}

/// Load a PNG into a raster, dropping mostly transparent pixels
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_raster(path: &Path) -> Result<MapRaster> {
    let decoded = image::open(path)
        .map_err(|source| TileMapError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    let (width, height) = decoded.dimensions();
    let mut raster = Array2::from_elem((height as usize, width as usize), None);
    for (col, row, pixel) in decoded.enumerate_pixels() {
        let [.., alpha] = pixel.0;
        if alpha < MIN_OPAQUE_ALPHA {
            continue;
        }
        if let Some(slot) = raster.get_mut([row as usize, col as usize]) {
            *slot = Some(pixel.0);
        }
    }
    Ok(raster)
}

/// Place one tile per filled raster pixel
///
/// Orientations are drawn from the map's seeded generator. Returns the
/// number of tiles placed.
///
/// # Errors
///
/// Returns an error if the raster has no filled pixel or does not fit the
/// map's coordinate range
pub fn populate_map<H>(map: &mut TileMap<H>, raster: &MapRaster, blocked: [u8; 4]) -> Result<usize>
where
    H: TileHost<Payload = PixelTile>,
{
    let mut placed = 0;
    for ((row, col), pixel) in raster.indexed_iter() {
        let Some(color) = *pixel else {
            continue;
        };
        let cell = Cell::new(
            i32::try_from(col).map_err(|e| invalid_map(&format!("map too wide: {e}")))?,
            i32::try_from(row).map_err(|e| invalid_map(&format!("map too tall: {e}")))?,
        );
        let tile = PixelTile {
            color,
            walkable: color != blocked,
        };
        map.set_tile(cell, Some(tile), None)?;
        placed += 1;
    }

    if placed == 0 {
        return Err(invalid_map(&"map contains no opaque pixels"));
    }
    Ok(placed)
}

/// Rectangle of cells a rendered raster covers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderFrame {
    /// Cell drawn at raster `[0, 0]`
    pub origin: Cell,
    /// Raster height in cells
    pub rows: usize,
    /// Raster width in cells
    pub cols: usize,
}

impl RenderFrame {
    /// Frame matching a source raster, anchored at cell `(0, 0)`
    ///
    /// Maps built by [`populate_map`] render back onto the same pixel grid.
    pub fn of_raster(raster: &MapRaster) -> Self {
        let (rows, cols) = raster.dim();
        Self {
            origin: Cell::new(0, 0),
            rows,
            cols,
        }
    }

    /// Smallest frame containing every stored tile, `None` for an empty map
    pub fn bounding<H: TileHost>(map: &TileMap<H>) -> Option<Self> {
        let (min, max) = map.store().iter().map(|record| record.cell()).fold(None, |bounds: Option<(Cell, Cell)>, cell| {
            Some(match bounds {
                None => (cell, cell),
                Some((min, max)) => (
                    Cell::new(min.x.min(cell.x), min.z.min(cell.z)),
                    Cell::new(max.x.max(cell.x), max.z.max(cell.z)),
                ),
            })
        })?;

        Some(Self {
            origin: min,
            rows: (i64::from(max.z) - i64::from(min.z) + 1) as usize,
            cols: (i64::from(max.x) - i64::from(min.x) + 1) as usize,
        })
    }

    // Raster index of a cell, `None` outside the frame
    fn slot(&self, cell: Cell) -> Option<[usize; 2]> {
        let row = usize::try_from(i64::from(cell.z) - i64::from(self.origin.z)).ok()?;
        let col = usize::try_from(i64::from(cell.x) - i64::from(self.origin.x)).ok()?;
        (row < self.rows && col < self.cols).then_some([row, col])
    }
}

/// Render a map and a route over it into a raster covering `frame`
///
/// Tiles and route cells outside the frame are not drawn.
pub fn render_route<H>(map: &TileMap<H>, route: &[Cell], frame: RenderFrame) -> MapRaster
where
    H: TileHost<Payload = PixelTile>,
{
    let mut raster = Array2::from_elem((frame.rows, frame.cols), None);
    let painted = map
        .store()
        .iter()
        .map(|record| (record.cell(), record.payload().color))
        .chain(route.iter().map(|&cell| (cell, ROUTE_COLOR)));
    for (cell, color) in painted {
        let Some(at) = frame.slot(cell) else {
            continue;
        };
        if let Some(pixel) = raster.get_mut(at) {
            *pixel = Some(color);
        }
    }
    raster
}

/// Save a raster as a PNG with a transparent background
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn save_raster(raster: &MapRaster, output_path: &Path) -> Result<()> {
    let (rows, cols) = raster.dim();
    let mut img = ImageBuffer::new(cols as u32, rows as u32);

    for ((row, col), pixel) in raster.indexed_iter() {
        let rgba = pixel.unwrap_or([0, 0, 0, 0]);
        img.put_pixel(col as u32, row as u32, Rgba(rgba));
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| TileMapError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| TileMapError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
