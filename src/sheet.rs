use image::{GenericImage, RgbaImage};

use crate::{error::Result, grid::TileGrid};

/// Paint `grid` into one image, `tile_size` pixels per cell.
///
/// The canvas is as wide as the longest row. Empty cells, and cells past the
/// end of a short row, stay transparent black.
pub fn render(grid: &TileGrid, tile_size: u32) -> Result<RgbaImage> {
    let width = grid.width() as u32 * tile_size;
    let height = grid.height() as u32 * tile_size;
    let mut image = RgbaImage::new(width, height);

    for (loc, tile) in grid.tiles() {
        let origin = loc * tile_size;
        image.copy_from(tile.pixels(), origin.x, origin.y)?;
    }

    return Ok(image);
}

/// Lay `images` out left to right along the top edge of one canvas
pub fn hconcat(images: &[RgbaImage]) -> Result<RgbaImage> {
    let width = images.iter().map(RgbaImage::width).sum();
    let height = images.iter().map(RgbaImage::height).max().unwrap_or(0);
    let mut canvas = RgbaImage::new(width, height);

    let mut x = 0;
    for image in images {
        canvas.copy_from(image, x, 0)?;
        x += image.width();
    }

    return Ok(canvas);
}
