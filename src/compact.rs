use glam::UVec2;

use crate::{grid::TileGrid, tile::Cell};

/// Drop columns that add nothing to the sheet.
///
/// Columns are scanned left to right, each top to bottom, comparing every
/// cell to the one visited just before it. The comparison carries over
/// between columns, so the top of a column is compared to the bottom of the
/// previous one and the very first cell never matches. A column is dropped
/// when every one of its cells matched, or when it is entirely empty.
///
/// Kept columns stay in their original order and the row count is unchanged.
/// Ragged input is read as if short rows were padded with empty cells.
pub fn compact(grid: &TileGrid) -> TileGrid {
    let height = grid.height();
    let mut compacted = TileGrid(vec![Vec::new(); height]);
    let mut last: Option<&Cell> = None;
    let mut dropped = 0;

    for x in 0..grid.width() {
        let column: Vec<&Cell> = (0..height)
            .filter_map(|y| grid.cell_at(UVec2::new(x as u32, y as u32)))
            .collect();

        let mut repeats = 0;
        for &cell in &column {
            if last == Some(cell) {
                repeats += 1;
            }
            last = Some(cell);
        }

        if repeats == height || column.iter().all(|cell| cell.is_empty()) {
            log::trace!("dropping column {x}");
            dropped += 1;
            continue;
        }
        for (row, cell) in compacted.iter_mut().zip(column) {
            row.push(cell.clone());
        }
    }

    log::debug!("compaction dropped {dropped} of {} columns", grid.width());
    return compacted;
}
