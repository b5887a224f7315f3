use std::collections::HashMap;

use derive_more::{Deref, DerefMut, From, IsVariant};
use glam::UVec2;
use image::{imageops, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    grid::TileGrid,
    tile::{Cell, Tile, TileKey},
};

/// Written in place of a coordinate for cells without a tile
pub const EMPTY_SENTINEL: i64 = -1;

/// Where a cell's tile lives in the packed sheet, counted in whole tiles
#[derive(Clone, Copy, Debug, PartialEq, Eq, IsVariant, Serialize, Deserialize)]
#[serde(into = "RawCell", try_from = "RawCell")]
pub enum MapCell {
    Empty,
    At(UVec2),
}

/// On-disk form of a [`MapCell`]: `[x, y]` or `-1`
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawCell {
    At([u32; 2]),
    Sentinel(i64),
}

impl From<MapCell> for RawCell {
    fn from(cell: MapCell) -> Self {
        return match cell {
            MapCell::Empty => RawCell::Sentinel(EMPTY_SENTINEL),
            MapCell::At(loc) => RawCell::At([loc.x, loc.y]),
        };
    }
}

impl TryFrom<RawCell> for MapCell {
    type Error = String;

    fn try_from(raw: RawCell) -> std::result::Result<Self, Self::Error> {
        return match raw {
            RawCell::At(loc) => Ok(MapCell::At(UVec2::from(loc))),
            RawCell::Sentinel(EMPTY_SENTINEL) => Ok(MapCell::Empty),
            RawCell::Sentinel(other) => Err(format!(
                "expected [x, y] or {EMPTY_SENTINEL}, found {other}"
            )),
        };
    }
}

/// A level expressed as references into the packed sheet.
/// Same shape as the level's [`TileGrid`].
#[derive(Deref, DerefMut, From, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoordinateMap(pub Vec<Vec<MapCell>>);

impl CoordinateMap {
    pub fn to_json(&self) -> Result<String> {
        return Ok(serde_json::to_string(self)?);
    }

    pub fn from_json(json: &str) -> Result<Self> {
        return Ok(serde_json::from_str(json)?);
    }
}

/// Tile identity -> cell location in `pool`. First occurrence wins.
fn pool_locs(pool: &TileGrid) -> HashMap<TileKey, UVec2> {
    let mut locs = HashMap::new();
    for (loc, tile) in pool.tiles() {
        locs.entry(tile.key()).or_insert(loc);
    }
    return locs;
}

/// Express `source` as coordinates into `pool`.
///
/// Empty cells map to [`MapCell::Empty`]. A tile missing from the pool is an
/// [`Error::TileNotInPool`]; it is never mapped to some other coordinate.
pub fn to_map(source: &TileGrid, pool: &TileGrid) -> Result<CoordinateMap> {
    let locs = pool_locs(pool);
    let mut mapped = Vec::with_capacity(source.height());

    for (y, row) in source.iter().enumerate() {
        let mut mapped_row = Vec::with_capacity(row.len());
        for (x, cell) in row.iter().enumerate() {
            let mapped_cell = match cell {
                Cell::Empty => MapCell::Empty,
                Cell::Tile(tile) => match locs.get(tile.bytes()) {
                    Some(&loc) => MapCell::At(loc),
                    None => return Err(Error::TileNotInPool { row: y, column: x }),
                },
            };
            mapped_row.push(mapped_cell);
        }
        mapped.push(mapped_row);
    }

    return Ok(CoordinateMap(mapped));
}

/// Rebuild a level's tiles by cropping them out of `tilesheet`.
///
/// Every coordinate must name a whole tile inside the sheet, otherwise the
/// map is rejected with [`Error::OutOfBounds`].
pub fn from_map(map: &CoordinateMap, tilesheet: &RgbaImage, tile_size: u32) -> Result<TileGrid> {
    if tile_size == 0 {
        return Err(Error::InvalidTileSize(tile_size));
    }
    let (width, height) = tilesheet.dimensions();
    let mut grid = Vec::with_capacity(map.len());

    for row in map.iter() {
        let mut cells = Vec::with_capacity(row.len());
        for cell in row {
            let cell = match *cell {
                MapCell::Empty => Cell::Empty,
                MapCell::At(loc) => {
                    let origin = cell_origin(loc, tile_size, (width, height)).ok_or(
                        Error::OutOfBounds {
                            x: loc.x,
                            y: loc.y,
                            width,
                            height,
                        },
                    )?;
                    let pixels =
                        imageops::crop_imm(tilesheet, origin.x, origin.y, tile_size, tile_size)
                            .to_image();
                    Cell::Tile(Tile::new(pixels))
                }
            };
            cells.push(cell);
        }
        grid.push(cells);
    }

    return Ok(TileGrid(grid));
}

/// Pixel origin of sheet cell `loc`, if the whole tile fits inside `dims`
fn cell_origin(loc: UVec2, tile_size: u32, dims: (u32, u32)) -> Option<UVec2> {
    let x = loc.x.checked_mul(tile_size)?;
    let y = loc.y.checked_mul(tile_size)?;
    let fits = x.checked_add(tile_size)? <= dims.0 && y.checked_add(tile_size)? <= dims.1;
    return fits.then(|| UVec2::new(x, y));
}
