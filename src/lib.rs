//! Pack tile-based level images into one deduplicated tilesheet plus a
//! coordinate map per level, and rebuild the levels from those two.
//!
//! Packing: slice each level into tiles ([`TileGrid::slice`]), drop tiles
//! already seen in this run ([`dedupe`]), optionally drop redundant columns
//! ([`compact`]), stack what is left into the pool, then map every level
//! against the pool ([`to_map`]) and paint the pool ([`render`]).
//! [`Packer`] runs the whole thing.
//!
//! Unpacking: crop each mapped cell out of the tilesheet ([`from_map`]) and
//! paint the result ([`unpack`]).

pub mod compact;
pub mod config;
pub mod dedup;
pub mod error;
pub mod files;
pub mod grid;
pub mod mapper;
pub mod packer;
pub mod sheet;
pub mod tile;

pub use compact::compact;
pub use config::PackConfig;
pub use dedup::{dedupe, SeenSet};
pub use error::{Error, Result};
pub use grid::TileGrid;
pub use mapper::{from_map, to_map, CoordinateMap, MapCell};
pub use packer::{unpack, Packed, Packer};
pub use sheet::{hconcat, render};
pub use tile::{Cell, Tile, TileKey};

pub const TILE_SIZE_DEFAULT: u32 = 16;
pub const TILE_SIZE_MAX: u32 = 4096;
