use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while packing or unpacking a tilesheet.
#[derive(Debug, Error)]
pub enum Error {
    #[error("tile size must be between 1 and {max}, got {0}", max = crate::TILE_SIZE_MAX)]
    InvalidTileSize(u32),

    /// A source tile has no counterpart in the assembled pool. This means
    /// dedupe or compaction dropped a tile it should have kept.
    #[error("tile at row {row}, column {column} has no entry in the packed sheet")]
    TileNotInPool { row: usize, column: usize },

    #[error("coordinate [{x}, {y}] lies outside the {width}x{height} pixel tilesheet")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("cannot derive an output name from {0:?}")]
    MissingFileStem(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("malformed coordinate map: {0}")]
    Map(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
