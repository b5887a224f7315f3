use image::RgbaImage;

use crate::{
    compact::compact,
    config::PackConfig,
    dedup::{dedupe, SeenSet},
    error::Result,
    grid::TileGrid,
    mapper::{from_map, to_map, CoordinateMap},
    sheet::render,
};

/// Result of a pack run
#[derive(Debug, Clone)]
pub struct Packed {
    /// Every distinct tile once, as laid out in the tilesheet
    pub pool: TileGrid,
    /// One map per source, in the order the sources were added
    pub maps: Vec<CoordinateMap>,
    pub tilesheet: RgbaImage,
}

/// Packs levels into a shared tilesheet.
///
/// Sources are processed strictly in the order they are added: which copy of
/// a repeated tile is kept, and so every coordinate, depends on it. Each
/// source's deduplicated (and optionally compacted) rows are stacked below
/// the previous source's.
#[derive(Debug)]
pub struct Packer {
    config: PackConfig,
    seen: SeenSet,
    pool: TileGrid,
    sources: Vec<TileGrid>,
}

impl Packer {
    pub fn new(config: PackConfig) -> Result<Self> {
        config.validate()?;
        return Ok(Self {
            config,
            seen: SeenSet::new(),
            pool: TileGrid::default(),
            sources: Vec::new(),
        });
    }

    pub fn add_image(&mut self, image: &RgbaImage) -> Result<()> {
        let mut grid = TileGrid::slice(image, self.config.tile_size)?;
        if self.config.blank_as_empty {
            grid.clear_blank();
        }
        self.add_grid(grid);
        return Ok(());
    }

    /// Add an already sliced source
    pub fn add_grid(&mut self, grid: TileGrid) {
        let mut deduped = dedupe(&grid, &mut self.seen);
        if self.config.compact {
            deduped = compact(&deduped);
        }
        log::debug!(
            "source {} adds {} rows to the pool",
            self.sources.len(),
            deduped.height()
        );
        self.pool.extend(deduped.0);
        self.sources.push(grid);
    }

    /// Map every source against the finished pool and render the tilesheet
    pub fn finish(self) -> Result<Packed> {
        let maps = self
            .sources
            .iter()
            .map(|source| to_map(source, &self.pool))
            .collect::<Result<Vec<_>>>()?;
        let mut tilesheet = render(&self.pool, self.config.tile_size)?;
        if tilesheet.width() == 0 || tilesheet.height() == 0 {
            // Image encoders reject zero-sized images, and every map of an
            // all-blank run is sentinels only, so one transparent tile will do.
            tilesheet = RgbaImage::new(self.config.tile_size, self.config.tile_size);
        }
        log::info!(
            "packed {} sources into {} unique tiles, tilesheet {}x{}",
            maps.len(),
            self.seen.len(),
            tilesheet.width(),
            tilesheet.height()
        );
        return Ok(Packed {
            pool: self.pool,
            maps,
            tilesheet,
        });
    }
}

/// Rebuild one level image from its map and the tilesheet
pub fn unpack(map: &CoordinateMap, tilesheet: &RgbaImage, tile_size: u32) -> Result<RgbaImage> {
    let grid = from_map(map, tilesheet, tile_size)?;
    return render(&grid, tile_size);
}
