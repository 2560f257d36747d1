//! Tile map facade over the store, connectivity graph and path finder
//!
//! Every placement or removal marks the connectivity graph dirty. Cell and
//! world-position queries rebuild a dirty graph before searching, so callers
//! never observe connections from before their last edit. Queries that take
//! [`NodeId`] handles run against the graph as it is, because a rebuild would
//! invalidate the very handles they were given.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::graph::connectivity::{AdjacencyPolicy, ConnectivityGraph, NodeId, PathNode};
use crate::graph::search::PathFinder;
use crate::io::configuration::{MapConfig, validate_tile_size};
use crate::io::error::{Result, invalid_parameter};
use crate::map::world::{WorldPosition, cell_center, cell_containing};
use crate::spatial::index::{Cell, SpatialIndex};
use crate::spatial::store::{TileRecord, TileStore};
use crate::spatial::tiles::{Orientation, Placement, TileHost};

/// Sparse grid of placed tiles with path queries
pub struct TileMap<H: TileHost> {
    config: MapConfig,
    host: H,
    store: TileStore<H::Payload, H::Instance>,
    graph: ConnectivityGraph,
    finder: PathFinder,
    rng: StdRng,
    dirty: bool,
}

impl<H: TileHost> TileMap<H> {
    /// Create an empty map
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation
    pub fn new(config: MapConfig, host: H) -> Result<Self> {
        config.validate()?;
        let index = SpatialIndex::new(config.max_columns)?;

        Ok(Self {
            config,
            host,
            store: TileStore::new(index),
            graph: ConnectivityGraph::new(),
            finder: PathFinder::new(),
            rng: StdRng::seed_from_u64(config.seed),
            dirty: false,
        })
    }

    /// Active configuration
    pub const fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Host that realizes tile instances
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host
    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Underlying tile store
    pub const fn store(&self) -> &TileStore<H::Payload, H::Instance> {
        &self.store
    }

    /// Number of placed tiles
    pub const fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if no tile is placed
    pub const fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Whether the graph is out of date with respect to the store
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Store position of the tile at `cell`
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        self.store.index_of(cell)
    }

    /// Cell of the tile at store position `index`
    pub fn cell_of(&self, index: usize) -> Option<Cell> {
        self.store.cell_at(index)
    }

    /// Record occupying `cell`
    pub fn tile(&self, cell: Cell) -> Option<&TileRecord<H::Payload, H::Instance>> {
        self.store.get_at(cell)
    }

    /// World position of the tile at store position `index`
    pub fn world_position(&self, index: usize) -> Option<WorldPosition> {
        self.cell_of(index)
            .map(|cell| cell_center(cell, self.config.tile_size))
    }

    /// Center of any cell in world units
    pub fn cell_center(&self, cell: Cell) -> WorldPosition {
        cell_center(cell, self.config.tile_size)
    }

    /// Cell nearest to a world position
    pub fn cell_at_position(&self, position: WorldPosition) -> Option<Cell> {
        cell_containing(position, self.config.tile_size)
    }

    /// Place, replace or clear the tile at `cell`
    ///
    /// A `None` payload clears the cell; a `None` orientation picks one of the
    /// four at random. Returns whether a realized instance now exists there.
    ///
    /// # Errors
    ///
    /// Returns an error if `cell` is outside the indexed range
    pub fn set_tile(
        &mut self,
        cell: Cell,
        payload: Option<H::Payload>,
        orientation: Option<Orientation>,
    ) -> Result<bool> {
        self.store.spatial_index().hash(cell)?;

        match (self.store.index_of(cell), payload) {
            (Some(index), Some(payload)) => {
                let orientation = self.pick_orientation(orientation);
                self.release_instance(index);
                self.store.overwrite(index, payload, orientation);
                self.dirty = true;
                Ok(self.realize(index))
            }
            (Some(index), None) => {
                // A clear consumes an orientation draw just like a replace
                self.pick_orientation(orientation);
                self.release_instance(index);
                self.store.remove(index);
                self.dirty = true;
                Ok(false)
            }
            (None, Some(payload)) => {
                let orientation = self.pick_orientation(orientation);
                let index = self.store.insert(cell, payload, orientation)?;
                self.dirty = true;
                Ok(self.realize(index))
            }
            (None, None) => Ok(false),
        }
    }

    /// Apply [`TileMap::set_tile`] to every cell of a rectangle
    ///
    /// Cells are visited column by column starting at `origin`. The first
    /// error stops the fill with earlier cells already applied. Returns how
    /// many cells hold a realized instance afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if a size does not fit a coordinate or any cell of
    /// the rectangle is outside the indexed range
    pub fn set_rect(
        &mut self,
        origin: Cell,
        size_x: u32,
        size_z: u32,
        payload: Option<&H::Payload>,
        orientation: Option<Orientation>,
    ) -> Result<usize> {
        let width = i32::try_from(size_x)
            .map_err(|e| invalid_parameter("size_x", &size_x, &e))?;
        let depth = i32::try_from(size_z)
            .map_err(|e| invalid_parameter("size_z", &size_z, &e))?;

        let mut realized = 0;
        for dx in 0..width {
            for dz in 0..depth {
                if self.set_tile(origin.offset(dx, dz), payload.cloned(), orientation)? {
                    realized += 1;
                }
            }
        }
        Ok(realized)
    }

    /// Remove every tile, releasing all instances
    pub fn clear_all(&mut self) {
        let mut cleared = 0_usize;
        for record in self.store.drain() {
            if let Some(instance) = record.into_instance() {
                self.host.release(instance);
            }
            cleared += 1;
        }
        if cleared > 0 {
            self.dirty = true;
        }
        debug!(cleared, "cleared tile map");
    }

    /// Re-create the instance of every tile from its stored payload
    ///
    /// Returns how many tiles hold a realized instance afterwards.
    pub fn refresh_all(&mut self) -> usize {
        let mut realized = 0;
        for index in 0..self.store.len() {
            self.release_instance(index);
            if self.realize(index) {
                realized += 1;
            }
        }
        self.dirty = true;
        realized
    }

    /// Change the world size of a cell and move every instance to match
    ///
    /// # Errors
    ///
    /// Returns an error if `tile_size` is not a positive finite number
    pub fn set_tile_size(&mut self, tile_size: f32) -> Result<()> {
        validate_tile_size(tile_size)?;
        self.config.tile_size = tile_size;

        for index in 0..self.store.len() {
            let Some(placement) = self.placement(index) else {
                continue;
            };
            if let Some(instance) = self.store.instance_mut(index) {
                self.host.reposition(instance, &placement);
            }
        }
        Ok(())
    }

    /// Change the adjacency rules; the graph is rebuilt on next use
    pub const fn set_adjacency(&mut self, policy: AdjacencyPolicy) {
        self.config.allow_diagonals = policy.allow_diagonals;
        self.config.cut_corners = policy.cut_corners;
        self.dirty = true;
    }

    /// Recompute all connections from the current tiles
    pub fn rebuild_connections(&mut self) {
        self.graph.rebuild(&self.store, self.config.adjacency());
        self.dirty = false;
    }

    /// Connectivity graph, rebuilt first if any tile changed
    pub fn connections(&mut self) -> &ConnectivityGraph {
        self.ensure_connections();
        &self.graph
    }

    /// Connectivity graph as last built, possibly stale
    pub const fn graph(&self) -> &ConnectivityGraph {
        &self.graph
    }

    /// Node standing on `cell`
    pub fn node_at(&mut self, cell: Cell) -> Option<NodeId> {
        self.ensure_connections();
        self.graph.node_at(cell)
    }

    /// Node nearest to a world position
    pub fn node_at_position(&mut self, position: WorldPosition) -> Option<NodeId> {
        let cell = self.cell_at_position(position)?;
        self.node_at(cell)
    }

    /// Shortest walkable route between two nodes of the current graph
    pub fn find_node_path<F>(
        &mut self,
        start: NodeId,
        end: NodeId,
        is_walkable: F,
        path: &mut Vec<NodeId>,
    ) -> bool
    where
        F: FnMut(&PathNode) -> bool,
    {
        self.finder
            .find_path(&self.graph, start, end, is_walkable, path)
    }

    /// Shortest walkable route between two cells
    ///
    /// Fails if either cell holds no path node.
    pub fn find_path<F>(
        &mut self,
        start: Cell,
        end: Cell,
        is_walkable: F,
        path: &mut Vec<NodeId>,
    ) -> bool
    where
        F: FnMut(&PathNode) -> bool,
    {
        self.ensure_connections();
        let (Some(start), Some(end)) = (self.graph.node_at(start), self.graph.node_at(end)) else {
            return false;
        };
        self.finder
            .find_path(&self.graph, start, end, is_walkable, path)
    }

    /// Shortest route between two cells with every node walkable
    pub fn find_path_unfiltered(&mut self, start: Cell, end: Cell, path: &mut Vec<NodeId>) -> bool {
        self.find_path(start, end, |_| true, path)
    }

    /// Shortest walkable route between the cells nearest two world positions
    pub fn find_path_between<F>(
        &mut self,
        start: WorldPosition,
        end: WorldPosition,
        is_walkable: F,
        path: &mut Vec<NodeId>,
    ) -> bool
    where
        F: FnMut(&PathNode) -> bool,
    {
        let (Some(start), Some(end)) = (self.cell_at_position(start), self.cell_at_position(end))
        else {
            return false;
        };
        self.find_path(start, end, is_walkable, path)
    }

    /// Shortest route between two world positions with every node walkable
    pub fn find_path_between_unfiltered(
        &mut self,
        start: WorldPosition,
        end: WorldPosition,
        path: &mut Vec<NodeId>,
    ) -> bool {
        self.find_path_between(start, end, |_| true, path)
    }

    /// Cells visited by a node path
    pub fn path_cells(&self, path: &[NodeId]) -> Vec<Cell> {
        path.iter()
            .filter_map(|&id| self.graph.node(id).map(PathNode::cell))
            .collect()
    }

    /// World-space cell centers along a node path
    pub fn waypoints(&self, path: &[NodeId]) -> Vec<WorldPosition> {
        self.path_cells(path)
            .into_iter()
            .map(|cell| cell_center(cell, self.config.tile_size))
            .collect()
    }

    /// Route between two world positions as waypoints, if one exists
    pub fn route(&mut self, start: WorldPosition, end: WorldPosition) -> Option<Vec<WorldPosition>> {
        let mut path = Vec::new();
        self.find_path_between_unfiltered(start, end, &mut path)
            .then(|| self.waypoints(&path))
    }

    fn ensure_connections(&mut self) {
        if self.dirty {
            self.rebuild_connections();
        }
    }

    fn pick_orientation(&mut self, orientation: Option<Orientation>) -> Orientation {
        orientation.unwrap_or_else(|| Orientation::random(&mut self.rng))
    }

    fn placement(&self, index: usize) -> Option<Placement> {
        self.store.get(index).map(|record| Placement {
            cell: record.cell(),
            position: cell_center(record.cell(), self.config.tile_size),
            orientation: record.orientation(),
        })
    }

    fn release_instance(&mut self, index: usize) {
        if let Some(instance) = self.store.take_instance(index) {
            self.host.release(instance);
        }
    }

    fn realize(&mut self, index: usize) -> bool {
        let Some(placement) = self.placement(index) else {
            return false;
        };
        let Some(record) = self.store.get(index) else {
            return false;
        };

        let instance = self.host.realize(record.payload(), &placement);
        let realized = instance.is_some();
        if let Some(previous) = self.store.set_instance(index, instance) {
            self.host.release(previous);
        }
        realized
    }
}
