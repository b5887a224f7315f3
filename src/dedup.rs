use std::collections::HashSet;

use crate::{
    grid::TileGrid,
    tile::{Cell, Tile, TileKey},
};

/// Identities of every tile already placed in the pool during one pack run.
///
/// Owned by the caller and threaded through successive [`dedupe`] calls so a
/// tile shared between two levels is only kept the first time it is seen.
#[derive(Debug, Default, Clone)]
pub struct SeenSet {
    keys: HashSet<TileKey>,
}

impl SeenSet {
    pub fn new() -> Self {
        return Self::default();
    }

    pub fn len(&self) -> usize {
        return self.keys.len();
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, tile: &Tile) -> bool {
        return self.keys.contains(tile.bytes());
    }

    /// Returns true if the tile had not been seen before
    pub fn insert(&mut self, tile: &Tile) -> bool {
        if self.contains(tile) {
            return false;
        }
        return self.keys.insert(tile.key());
    }
}

/// Keep the first occurrence of every tile, row-major, and empty out repeats.
///
/// Tiles already in `seen` (from this grid or an earlier one) become
/// [`Cell::Empty`]; new ones are kept and recorded in `seen`. The output has
/// the same shape as `grid`.
pub fn dedupe(grid: &TileGrid, seen: &mut SeenSet) -> TileGrid {
    let mut kept = 0;
    let deduped: Vec<Vec<Cell>> = grid
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Cell::Tile(tile) if seen.insert(tile) => {
                        kept += 1;
                        cell.clone()
                    }
                    _ => Cell::Empty,
                })
                .collect()
        })
        .collect();
    log::debug!("dedupe kept {kept} new tiles, {} seen so far", seen.len());
    return TileGrid(deduped);
}
