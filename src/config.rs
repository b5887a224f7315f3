use crate::error::{Error, Result};
use crate::{TILE_SIZE_DEFAULT, TILE_SIZE_MAX};

/// Settings shared by a whole pack or unpack run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackConfig {
    /// Side length of a tile in pixels
    pub tile_size: u32,
    /// Drop redundant columns from each deduplicated grid before it joins the pool
    pub compact: bool,
    /// Treat all-zero tiles as empty cells instead of packing them
    pub blank_as_empty: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        return Self {
            tile_size: TILE_SIZE_DEFAULT,
            compact: true,
            blank_as_empty: true,
        };
    }
}

impl PackConfig {
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        return self;
    }

    pub fn with_compaction(mut self, compact: bool) -> Self {
        self.compact = compact;
        return self;
    }

    pub fn with_blank_as_empty(mut self, blank_as_empty: bool) -> Self {
        self.blank_as_empty = blank_as_empty;
        return self;
    }

    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 || self.tile_size > TILE_SIZE_MAX {
            return Err(Error::InvalidTileSize(self.tile_size));
        }
        return Ok(());
    }
}
