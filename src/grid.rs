use std::ops::Index;

use derive_more::{Deref, DerefMut, From};
use glam::UVec2;
use image::RgbaImage;

use crate::{
    error::{Error, Result},
    tile::{Cell, Tile},
    TILE_SIZE_MAX,
};

/// Rows of cells, top to bottom, each row left to right.
///
/// Rows may have different lengths. Anything past the end of a short row
/// reads as [`Cell::Empty`].
#[derive(Deref, DerefMut, From, Clone, Debug, Default, PartialEq, Eq)]
pub struct TileGrid(pub Vec<Vec<Cell>>);

static EMPTY: Cell = Cell::Empty;

impl TileGrid {
    /// Cut `image` into `tile_size` squares, row-major from (0, 0).
    ///
    /// The last row and column are cut even when the image is not a multiple
    /// of `tile_size`; pixels past the image edge are `[0, 0, 0, 0]`.
    pub fn slice(image: &RgbaImage, tile_size: u32) -> Result<Self> {
        if tile_size == 0 || tile_size > TILE_SIZE_MAX {
            return Err(Error::InvalidTileSize(tile_size));
        }
        let dims: UVec2 = image.dimensions().into();
        let cells = grid_dims(dims, tile_size);
        let mut rows = Vec::with_capacity(cells.y as usize);
        for loc in tile_locs(dims, tile_size) {
            if loc.x == 0 {
                rows.push(Vec::with_capacity(cells.x as usize));
            }
            let tile = tile_at(image, loc, tile_size);
            // first push above guarantees a row
            if let Some(row) = rows.last_mut() {
                row.push(Cell::Tile(tile));
            }
        }
        log::trace!("sliced {}x{} image into {} rows of {}", dims.x, dims.y, cells.y, cells.x);
        return Ok(Self(rows));
    }

    /// Replace every all-zero tile with [`Cell::Empty`]
    pub fn clear_blank(&mut self) {
        for cell in self.iter_mut().flatten() {
            if cell.tile().map_or(false, Tile::is_blank) {
                *cell = Cell::Empty;
            }
        }
    }

    /// Length of the longest row
    pub fn width(&self) -> usize {
        return self.iter().map(Vec::len).max().unwrap_or(0);
    }

    pub fn height(&self) -> usize {
        return self.len();
    }

    /// Cell at `loc` (x = column, y = row), `Empty` if past the end of a row.
    /// `None` only if the row itself does not exist.
    pub fn cell_at(&self, loc: UVec2) -> Option<&Cell> {
        let row = self.0.get(loc.y as usize)?;
        return Some(row.get(loc.x as usize).unwrap_or(&EMPTY));
    }

    /// Tiles paired with their cell location, row-major, empty cells skipped
    pub fn tiles(&self) -> impl Iterator<Item = (UVec2, &Tile)> + '_ {
        return self.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().filter_map(move |(x, cell)| {
                cell.tile().map(|tile| (UVec2::new(x as u32, y as u32), tile))
            })
        });
    }
}

impl Index<UVec2> for TileGrid {
    type Output = Cell;
    fn index(&self, index: UVec2) -> &Self::Output {
        return &self.0[index.y as usize][index.x as usize];
    }
}

/// Number of tile columns and rows needed to cover `image_dims`
pub fn grid_dims(image_dims: UVec2, tile_size: u32) -> UVec2 {
    return UVec2::new(
        image_dims.x.div_ceil(tile_size),
        image_dims.y.div_ceil(tile_size),
    );
}

/// Pixel origins of every tile covering `image_dims`, row-major.
/// Partial tiles at the right and bottom edges are included.
pub fn tile_locs<U: Into<UVec2>>(image_dims: U, tile_size: u32) -> Vec<UVec2> {
    let image_dims: UVec2 = image_dims.into();
    let cells = grid_dims(image_dims, tile_size);
    let mut locs = Vec::with_capacity((cells.x * cells.y) as usize);

    for y in (0..image_dims.y).step_by(tile_size as usize) {
        for x in (0..image_dims.x).step_by(tile_size as usize) {
            locs.push(UVec2 { x, y });
        }
    }

    return locs;
}

fn tile_at(image: &RgbaImage, loc: UVec2, tile_size: u32) -> Tile {
    let (width, height) = image.dimensions();
    let mut pixels = RgbaImage::new(tile_size, tile_size);
    for (x, y, pixel) in pixels.enumerate_pixels_mut() {
        let src = loc + UVec2 { x, y };
        if src.x < width && src.y < height {
            *pixel = *image.get_pixel(src.x, src.y);
        }
    }
    return Tile::new(pixels);
}
