use std::collections::HashSet;

use image::{GenericImage, Rgba, RgbaImage};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tilepack::{unpack, Cell, PackConfig, Packer, TileGrid};

const TILE: u32 = 4;

/// `count` random tiles, the first one always blank
fn palette(rng: &mut StdRng, count: usize) -> Vec<RgbaImage> {
    let mut tiles = vec![RgbaImage::new(TILE, TILE)];
    while tiles.len() < count {
        tiles.push(RgbaImage::from_fn(TILE, TILE, |_, _| {
            Rgba([rng.gen(), rng.gen(), rng.gen(), rng.gen()])
        }));
    }
    return tiles;
}

/// A level of `cols` x `rows` tiles drawn from `tiles`
fn level(rng: &mut StdRng, tiles: &[RgbaImage], cols: u32, rows: u32) -> RgbaImage {
    let mut image = RgbaImage::new(cols * TILE, rows * TILE);
    for y in 0..rows {
        for x in 0..cols {
            let tile = &tiles[rng.gen_range(0..tiles.len())];
            image.copy_from(tile, x * TILE, y * TILE).unwrap();
        }
    }
    return image;
}

fn levels(seed: u64) -> Vec<RgbaImage> {
    let mut rng = StdRng::seed_from_u64(seed);
    let tiles = palette(&mut rng, 12);
    return (0..4)
        .map(|_| {
            let cols = rng.gen_range(1..9);
            let rows = rng.gen_range(1..7);
            level(&mut rng, &tiles, cols, rows)
        })
        .collect();
}

fn pack(levels: &[RgbaImage], config: PackConfig) -> tilepack::Packed {
    let mut packer = Packer::new(config.with_tile_size(TILE)).unwrap();
    for level in levels {
        packer.add_image(level).unwrap();
    }
    return packer.finish().unwrap();
}

fn configs() -> Vec<PackConfig> {
    let mut configs = Vec::new();
    for compact in [true, false] {
        for blank_as_empty in [true, false] {
            configs.push(
                PackConfig::default()
                    .with_compaction(compact)
                    .with_blank_as_empty(blank_as_empty),
            );
        }
    }
    return configs;
}

#[test]
fn pack_then_unpack_is_exact() {
    for seed in 0..8 {
        let levels = levels(seed);
        for config in configs() {
            let packed = pack(&levels, config);
            for (level, map) in levels.iter().zip(&packed.maps) {
                let rebuilt = unpack(map, &packed.tilesheet, TILE).unwrap();
                assert_eq!(&rebuilt, level, "seed {seed}, {config:?}");
            }
        }
    }
}

#[test]
fn pool_holds_each_distinct_tile_once() {
    for seed in 0..8 {
        let levels = levels(seed);
        for config in configs() {
            let packed = pack(&levels, config);

            let mut distinct = HashSet::new();
            for level in &levels {
                let mut grid = TileGrid::slice(level, TILE).unwrap();
                if config.blank_as_empty {
                    grid.clear_blank();
                }
                distinct.extend(grid.tiles().map(|(_, tile)| tile.key()));
            }

            let pooled: Vec<_> = packed.pool.tiles().map(|(_, tile)| tile.key()).collect();
            let unique: HashSet<_> = pooled.iter().cloned().collect();
            assert_eq!(pooled.len(), unique.len(), "duplicate in pool, seed {seed}");
            assert_eq!(unique, distinct, "seed {seed}, {config:?}");
        }
    }
}

#[test]
fn compaction_never_changes_the_rebuild() {
    for seed in 0..8 {
        let levels = levels(seed);
        let compacted = pack(&levels, PackConfig::default().with_compaction(true));
        let loose = pack(&levels, PackConfig::default().with_compaction(false));
        assert!(compacted.pool.width() <= loose.pool.width());
        assert_eq!(compacted.pool.height(), loose.pool.height());
        for i in 0..levels.len() {
            assert_eq!(
                unpack(&compacted.maps[i], &compacted.tilesheet, TILE).unwrap(),
                unpack(&loose.maps[i], &loose.tilesheet, TILE).unwrap()
            );
        }
    }
}

#[test]
fn packing_is_deterministic() {
    let levels = levels(42);
    let first = pack(&levels, PackConfig::default());
    let second = pack(&levels, PackConfig::default());
    for (a, b) in first.maps.iter().zip(&second.maps) {
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    }
    assert_eq!(first.tilesheet.as_raw(), second.tilesheet.as_raw());
}

#[test]
fn unaligned_levels_rebuild_padded() {
    let image = RgbaImage::from_fn(6, 5, |x, y| Rgba([x as u8 + 1, y as u8 + 1, 3, 255]));
    let packed = pack(std::slice::from_ref(&image), PackConfig::default());
    let rebuilt = unpack(&packed.maps[0], &packed.tilesheet, TILE).unwrap();
    assert_eq!(rebuilt.dimensions(), (8, 8));
    for (x, y, pixel) in rebuilt.enumerate_pixels() {
        if x < 6 && y < 5 {
            assert_eq!(pixel, image.get_pixel(x, y));
        } else {
            assert_eq!(pixel, &Rgba([0, 0, 0, 0]));
        }
    }
}

#[test]
fn blank_cells_stay_empty_everywhere() {
    let mut rng = StdRng::seed_from_u64(7);
    let tiles = palette(&mut rng, 3);
    let image = level(&mut rng, &tiles, 6, 6);
    let packed = pack(std::slice::from_ref(&image), PackConfig::default());

    assert!(packed.pool.iter().flatten().all(|cell| match cell {
        Cell::Empty => true,
        Cell::Tile(tile) => !tile.is_blank(),
    }));
    let grid = TileGrid::slice(&image, TILE).unwrap();
    for (row, mapped) in grid.iter().zip(packed.maps[0].iter()) {
        for (cell, mapped) in row.iter().zip(mapped) {
            let blank = cell.tile().map_or(false, |tile| tile.is_blank());
            assert_eq!(blank, mapped.is_empty());
        }
    }
}
