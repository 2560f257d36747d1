//! Insertion-ordered store of placed tiles
//!
//! One record per occupied cell, kept in placement order. A hash table from
//! [`CellHash`] to store position gives constant-time lookup; removing a
//! record shifts every later record down by one and the table is patched to
//! match, so positions stay dense.

use std::collections::HashMap;

use crate::io::error::Result;
use crate::spatial::index::{Cell, CellHash, SpatialIndex};
use crate::spatial::tiles::Orientation;

/// Everything stored about one occupied cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileRecord<P, I> {
    cell: Cell,
    hash: CellHash,
    payload: P,
    orientation: Orientation,
    instance: Option<I>,
}

impl<P, I> TileRecord<P, I> {
    /// Occupied cell
    pub const fn cell(&self) -> Cell {
        self.cell
    }

    /// Linear key of the occupied cell
    pub const fn hash(&self) -> CellHash {
        self.hash
    }

    /// Placed payload
    pub const fn payload(&self) -> &P {
        &self.payload
    }

    /// Placed rotation
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Realized instance, if the host created one
    pub const fn instance(&self) -> Option<&I> {
        self.instance.as_ref()
    }

    /// Consume the record, keeping only its realized instance
    pub fn into_instance(self) -> Option<I> {
        self.instance
    }
}

/// Single source of truth for what occupies which cell
#[derive(Clone, Debug)]
pub struct TileStore<P, I> {
    index: SpatialIndex,
    records: Vec<TileRecord<P, I>>,
    positions: HashMap<CellHash, usize>,
}

impl<P, I> TileStore<P, I> {
    /// Create an empty store over the given index
    pub fn new(index: SpatialIndex) -> Self {
        Self {
            index,
            records: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Spatial index used to hash cells
    pub const fn spatial_index(&self) -> &SpatialIndex {
        &self.index
    }

    /// Number of stored tiles
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no tile is stored
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Store position of the tile at `cell`
    ///
    /// Cells outside the index range are never occupied.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        let hash = self.index.try_hash(cell)?;
        self.positions.get(&hash).copied()
    }

    /// Cell of the tile at store position `index`
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        self.records.get(index).map(TileRecord::cell)
    }

    /// Record at store position `index`
    pub fn get(&self, index: usize) -> Option<&TileRecord<P, I>> {
        self.records.get(index)
    }

    /// Record occupying `cell`
    pub fn get_at(&self, cell: Cell) -> Option<&TileRecord<P, I>> {
        self.index_of(cell).and_then(|index| self.records.get(index))
    }

    /// All records in store order
    pub fn iter(&self) -> impl Iterator<Item = &TileRecord<P, I>> {
        self.records.iter()
    }

    /// Append a tile for an unoccupied cell and return its store position
    ///
    /// If the cell is already occupied its payload and orientation are
    /// overwritten in place instead, so no cell is ever stored twice.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell is outside the index range
    pub fn insert(&mut self, cell: Cell, payload: P, orientation: Orientation) -> Result<usize> {
        let hash = self.index.hash(cell)?;
        if let Some(&index) = self.positions.get(&hash) {
            self.overwrite(index, payload, orientation);
            return Ok(index);
        }

        let index = self.records.len();
        self.records.push(TileRecord {
            cell,
            hash,
            payload,
            orientation,
            instance: None,
        });
        self.positions.insert(hash, index);
        Ok(index)
    }

    /// Replace payload and orientation of an existing record
    ///
    /// Returns `false` if `index` is past the end of the store.
    pub fn overwrite(&mut self, index: usize, payload: P, orientation: Orientation) -> bool {
        match self.records.get_mut(index) {
            Some(record) => {
                record.payload = payload;
                record.orientation = orientation;
                true
            }
            None => false,
        }
    }

    /// Remove the record at `index`, shifting later records down
    pub fn remove(&mut self, index: usize) -> Option<TileRecord<P, I>> {
        if index >= self.records.len() {
            return None;
        }

        let record = self.records.remove(index);
        self.positions.remove(&record.hash);
        for (position, later) in self.records.iter().enumerate().skip(index) {
            self.positions.insert(later.hash, position);
        }
        Some(record)
    }

    /// Remove every record, yielding them in store order
    ///
    /// Equivalent to removing position 0 until the store is empty.
    pub fn drain(&mut self) -> impl Iterator<Item = TileRecord<P, I>> + '_ {
        self.positions.clear();
        self.records.drain(..)
    }

    /// Detach the realized instance of a record
    pub fn take_instance(&mut self, index: usize) -> Option<I> {
        self.records
            .get_mut(index)
            .and_then(|record| record.instance.take())
    }

    /// Attach a realized instance to a record, returning the previous one
    pub fn set_instance(&mut self, index: usize, instance: Option<I>) -> Option<I> {
        self.records
            .get_mut(index)
            .and_then(|record| std::mem::replace(&mut record.instance, instance))
    }

    /// Mutable access to the realized instance of a record
    pub fn instance_mut(&mut self, index: usize) -> Option<&mut I> {
        self.records
            .get_mut(index)
            .and_then(|record| record.instance.as_mut())
    }
}
