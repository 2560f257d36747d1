//! Tile payloads, orientations and the host seam that realizes placed tiles
//!
//! The core never owns what a tile looks like in the host: it stores an
//! opaque payload and asks a [`TileHost`] to create or drop the matching
//! realized instance whenever a cell changes.

use std::marker::PhantomData;

use rand::Rng;

use crate::io::configuration::ORIENTATION_COUNT;
use crate::io::error::{Result, invalid_parameter};
use crate::map::world::WorldPosition;
use crate::spatial::index::Cell;

/// One of four quarter-turn rotations about the vertical axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// No rotation
    #[default]
    North,
    /// 90 degrees
    East,
    /// 180 degrees
    South,
    /// 270 degrees
    West,
}

impl Orientation {
    /// All orientations in index order
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Orientation for a quarter-turn count in `0..4`
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::North),
            1 => Some(Self::East),
            2 => Some(Self::South),
            3 => Some(Self::West),
            _ => None,
        }
    }

    /// Number of quarter turns
    pub const fn index(self) -> u8 {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Rotation in degrees
    pub const fn degrees(self) -> u16 {
        self.index() as u16 * 90
    }

    /// Uniformly random orientation
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        match Self::from_index(rng.random_range(0..ORIENTATION_COUNT)) {
            Some(orientation) => orientation,
            None => Self::North,
        }
    }
}

/// Anything that can be placed in a cell
pub trait TilePayload: Clone {
    /// Whether tiles carrying this payload take part in the connectivity graph
    fn is_path_node(&self) -> bool;
}

/// Where and how a tile instance should appear in the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Occupied cell
    pub cell: Cell,
    /// Cell center in world units
    pub position: WorldPosition,
    /// Rotation of the tile
    pub orientation: Orientation,
}

/// Creates and destroys the realized instances of placed tiles
pub trait TileHost {
    /// Payload type stored per tile
    type Payload: TilePayload;
    /// Handle to whatever the host creates for a tile
    type Instance;

    /// Create an instance for a payload at a placement
    ///
    /// Returning `None` leaves the tile stored but unrealized.
    fn realize(&mut self, payload: &Self::Payload, placement: &Placement)
    -> Option<Self::Instance>;

    /// Destroy an instance previously returned by [`TileHost::realize`]
    fn release(&mut self, instance: Self::Instance);

    /// Move an existing instance after the tile size changed
    fn reposition(&mut self, _instance: &mut Self::Instance, _placement: &Placement) {}
}

/// Host that realizes every tile as a unit instance
#[derive(Debug)]
pub struct NoopHost<P> {
    payload: PhantomData<P>,
}

impl<P> NoopHost<P> {
    /// Create a host with no side effects
    pub const fn new() -> Self {
        Self {
            payload: PhantomData,
        }
    }
}

impl<P> Default for NoopHost<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: TilePayload> TileHost for NoopHost<P> {
    type Payload = P;
    type Instance = ();

    fn realize(&mut self, _payload: &P, _placement: &Placement) -> Option<()> {
        Some(())
    }

    fn release(&mut self, _instance: ()) {}
}

/// Named tile template, the simplest useful payload
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Prefab {
    /// Display name
    pub name: String,
    /// Whether placed copies are traversable
    pub path_node: bool,
}

impl Prefab {
    /// Prefab whose tiles join the connectivity graph
    pub fn walkable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path_node: true,
        }
    }

    /// Prefab whose tiles occupy a cell without joining the graph
    pub fn solid(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path_node: false,
        }
    }
}

impl TilePayload for Prefab {
    fn is_path_node(&self) -> bool {
        self.path_node
    }
}

/// Ordered palette of payloads with one current selection
#[derive(Clone, Debug)]
pub struct TileSet<P> {
    payloads: Vec<P>,
    selected: Option<usize>,
}

impl<P> Default for TileSet<P> {
    fn default() -> Self {
        Self {
            payloads: Vec::new(),
            selected: None,
        }
    }
}

impl<P> TileSet<P> {
    /// Create a palette; the first payload starts selected
    pub fn new(payloads: Vec<P>) -> Self {
        let selected = (!payloads.is_empty()).then_some(0);
        Self { payloads, selected }
    }

    /// All payloads in palette order
    pub fn payloads(&self) -> &[P] {
        &self.payloads
    }

    /// Select the payload at `index`
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is past the end of the palette
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.payloads.len() {
            return Err(invalid_parameter(
                "index",
                &index,
                &format!("palette holds {} payloads", self.payloads.len()),
            ));
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Currently selected payload, if any
    pub fn selected(&self) -> Option<&P> {
        self.selected.and_then(|index| self.payloads.get(index))
    }
}
