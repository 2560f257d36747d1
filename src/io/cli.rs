//! Command-line interface for batch path queries over PNG maps

use crate::io::configuration::{BLOCKED_COLOR, DEFAULT_SEED, DEFAULT_TILE_SIZE, MAX_COLUMNS, MapConfig, OUTPUT_SUFFIX};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{PixelTile, RenderFrame, load_raster, populate_map, render_route, save_raster};
use crate::io::progress::ProgressManager;
use crate::map::tilemap::TileMap;
use crate::map::world::WorldPosition;
use crate::spatial::index::Cell;
use crate::spatial::tiles::NoopHost;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "tilepath")]
#[command(
    author,
    version,
    about = "Find shortest tile paths across PNG maps"
)]
/// Command-line arguments for the path query tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Start cell as `x,z` (column, row of the image)
    #[arg(short, long, value_parser = parse_cell, allow_hyphen_values = true)]
    pub from: Cell,

    /// End cell as `x,z` (column, row of the image)
    #[arg(short, long, value_parser = parse_cell, allow_hyphen_values = true)]
    pub to: Cell,

    /// Connect diagonal neighbours
    #[arg(short, long)]
    pub diagonals: bool,

    /// Allow diagonal moves past missing corners (implies --diagonals)
    #[arg(short, long)]
    pub cut_corners: bool,

    /// World units per cell, used for reported waypoints
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: f32,

    /// Cells per axis covered by the spatial index
    #[arg(long, default_value_t = MAX_COLUMNS)]
    pub max_columns: i32,

    /// Random seed for tile orientations
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Map configuration assembled from the flags
    pub const fn map_config(&self) -> MapConfig {
        MapConfig {
            tile_size: self.tile_size,
            allow_diagonals: self.diagonals || self.cut_corners,
            cut_corners: self.cut_corners,
            max_columns: self.max_columns,
            seed: self.seed,
        }
    }
}

/// Parse a cell written as `x,z`
///
/// # Errors
///
/// Returns a message if the text is not two comma-separated integers
pub fn parse_cell(text: &str) -> std::result::Result<Cell, String> {
    let (x, z) = text
        .split_once(',')
        .ok_or_else(|| format!("expected `x,z`, got `{text}`"))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid x coordinate `{x}`: {e}"))?;
    let z = z
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid z coordinate `{z}`: {e}"))?;
    Ok(Cell::new(x, z))
}

/// Result of one map query
#[derive(Clone, Debug, PartialEq)]
pub struct MapOutcome {
    /// Map that was processed
    pub input: PathBuf,
    /// Rendered output image
    pub output: PathBuf,
    /// Tiles placed from the image
    pub tiles: usize,
    /// Path nodes in the connectivity graph
    pub nodes: usize,
    /// Undirected connections in the graph
    pub edges: usize,
    /// Cells of the route, empty when no route exists
    pub route: Vec<Cell>,
    /// Route cell centers scaled by the tile size
    pub waypoints: Vec<WorldPosition>,
}

impl MapOutcome {
    /// Whether a route was found
    pub fn found(&self) -> bool {
        !self.route.is_empty()
    }
}

/// Orchestrates batch processing of PNG maps with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<Vec<MapOutcome>> {
        self.cli.map_config().validate()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut outcomes = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            outcomes.push(self.process_file(file, index)?);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(outcomes)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &self.cli.target.display(),
                    &"target file must be a PNG image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && !Self::is_output_file(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            info!(input = %input_path.display(), "skipping map, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<MapOutcome> {
        let output_path = Self::get_output_path(input_path);
        self.start_file(index, input_path);

        let raster = load_raster(input_path)?;
        self.finish_stage(index, 0);

        let mut map = TileMap::new(self.cli.map_config(), NoopHost::<PixelTile>::new())?;
        let tiles = populate_map(&mut map, &raster, BLOCKED_COLOR)?;
        self.finish_stage(index, 1);

        map.rebuild_connections();
        let nodes = map.graph().node_count();
        let edges = map.graph().edge_count();
        self.finish_stage(index, 2);

        let mut path = Vec::new();
        let found = map.find_path_unfiltered(self.cli.from, self.cli.to, &mut path);
        if !found {
            warn!(
                input = %input_path.display(),
                from = ?self.cli.from,
                to = ?self.cli.to,
                "no path between requested cells"
            );
            path.clear();
        }
        let route = map.path_cells(&path);
        let waypoints = map.waypoints(&path);
        self.finish_stage(index, 3);

        let rendered = render_route(&map, &route, RenderFrame::of_raster(&raster));
        save_raster(&rendered, &output_path)?;

        let outcome_message = if route.is_empty() {
            "no path".to_string()
        } else {
            format!("{} steps", route.len() - 1)
        };
        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, &outcome_message);
        }
        info!(
            input = %input_path.display(),
            tiles,
            nodes,
            edges,
            outcome = %outcome_message,
            ?waypoints,
            "processed map"
        );

        Ok(MapOutcome {
            input: input_path.to_path_buf(),
            output: output_path,
            tiles,
            nodes,
            edges,
            route,
            waypoints,
        })
    }

    fn start_file(&mut self, index: usize, input_path: &Path) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }
    }

    fn finish_stage(&mut self, index: usize, stage: usize) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.finish_stage(index, stage);
        }
    }

    fn is_output_file(path: &Path) -> bool {
        path.file_stem()
            .is_some_and(|stem| stem.to_string_lossy().ends_with(OUTPUT_SUFFIX))
    }

    /// Path of the rendered map for an input map
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
