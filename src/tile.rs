use std::borrow::Borrow;

use derive_more::{Deref, From, IsVariant};
use image::RgbaImage;

/// A square block of RGBA pixels cut from a source image.
///
/// Two tiles are equal iff their raw pixel bytes are equal, alpha included.
/// There is no tolerance: a fully transparent red pixel and a fully
/// transparent blue pixel are different.
#[derive(Clone, Debug)]
pub struct Tile {
    pixels: RgbaImage,
}

impl Tile {
    pub fn new(pixels: RgbaImage) -> Self {
        return Self { pixels };
    }

    pub fn pixels(&self) -> &RgbaImage {
        return &self.pixels;
    }

    pub fn bytes(&self) -> &[u8] {
        return self.pixels.as_raw();
    }

    /// Side length in pixels
    pub fn size(&self) -> u32 {
        return self.pixels.width();
    }

    pub fn key(&self) -> TileKey {
        return TileKey(self.bytes().to_vec());
    }

    /// Every byte zero, i.e. transparent black. This is also what the
    /// out-of-bounds part of an edge tile is filled with.
    pub fn is_blank(&self) -> bool {
        return self.bytes().iter().all(|&b| b == 0);
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        return self.bytes() == other.bytes();
    }
}

impl Eq for Tile {}

/// Content identity of a tile: its exact pixel bytes.
///
/// Hashes like the underlying byte slice, so sets and maps keyed by
/// `TileKey` can be queried with `tile.bytes()` without allocating.
#[derive(Deref, From, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileKey(pub Vec<u8>);

impl Borrow<[u8]> for TileKey {
    fn borrow(&self) -> &[u8] {
        return &self.0;
    }
}

/// One cell of a [`TileGrid`](crate::grid::TileGrid)
#[derive(Clone, Debug, PartialEq, Eq, IsVariant)]
pub enum Cell {
    /// No tile here: a repeat removed by dedupe, a blank tile, or padding
    /// past the end of a short row.
    Empty,
    Tile(Tile),
}

impl Cell {
    pub fn tile(&self) -> Option<&Tile> {
        return match self {
            Cell::Empty => None,
            Cell::Tile(tile) => Some(tile),
        };
    }
}

impl From<Tile> for Cell {
    fn from(tile: Tile) -> Self {
        return Cell::Tile(tile);
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use std::collections::HashSet;

    pub fn solid(size: u32, rgba: [u8; 4]) -> Tile {
        return Tile::new(RgbaImage::from_pixel(size, size, image::Rgba(rgba)));
    }

    #[test]
    fn equal_pixels_equal_keys() {
        let a = solid(4, [10, 20, 30, 255]);
        let b = solid(4, [10, 20, 30, 255]);
        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn transparent_pixels_still_differ_by_color() {
        let red = solid(4, [255, 0, 0, 0]);
        let blue = solid(4, [0, 0, 255, 0]);
        assert_ne!(red, blue);
        assert_ne!(red.key(), blue.key());
        assert!(!red.is_blank());
    }

    #[test]
    fn single_pixel_difference_changes_key() {
        let a = solid(4, [1, 1, 1, 1]);
        let mut pixels = a.pixels().clone();
        pixels.put_pixel(3, 3, image::Rgba([1, 1, 1, 2]));
        let b = Tile::new(pixels);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn key_lookup_by_borrowed_bytes() {
        let tile = solid(2, [9, 9, 9, 9]);
        let mut set = HashSet::new();
        set.insert(tile.key());
        assert!(set.contains(tile.bytes()));
        assert!(!set.contains(solid(2, [9, 9, 9, 8]).bytes()));
    }

    #[test]
    fn blank_is_all_zero() {
        assert!(solid(3, [0, 0, 0, 0]).is_blank());
        assert!(!solid(3, [0, 0, 0, 1]).is_blank());
    }

    #[test]
    fn cell_variants() {
        let cell: Cell = solid(2, [1, 2, 3, 4]).into();
        assert!(cell.is_tile());
        assert!(Cell::Empty.is_empty());
        assert_eq!(Cell::Empty.tile(), None);
        assert_ne!(cell, Cell::Empty);
    }
}
