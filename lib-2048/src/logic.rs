use log::trace;
use rand::Rng;

use crate::{direction::Direction, metrics, Grid, Row, Tile};

/// Result of sliding a grid in one direction, before any tile is spawned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shift {
    pub grid: Grid,
    /// Sum of every tile produced by a merge.
    pub score: u32,
    /// Largest tile produced by a merge, zero when nothing merged.
    pub max_merged: Tile,
    pub changed: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowMerge {
    pub changed: bool,
    pub score: u32,
    pub max_merged: Tile,
}

/// Slides every non-empty tile towards index 0, keeping their order.
pub fn compress_row(row: &mut Row) -> bool {
    let original = *row;
    let mut next = 0;

    for tile in original.into_iter().filter(|&tile| tile != 0) {
        row[next] = tile;
        next += 1;
    }

    row[next..].fill(0);

    *row != original
}

/// The tile two neighbours merge into. A pair whose double would not fit in a
/// `Tile` stays apart.
fn merged_tile(left: Tile, right: Tile) -> Option<Tile> {
    if left == right && left != 0 {
        left.checked_mul(2)
    } else {
        None
    }
}

/// Merges equal neighbours left to right. The row must already be compressed.
///
/// After each merge the row is compressed again and scanning resumes with the
/// tile that slid into the freed cell, so a doubled tile never merges twice.
pub fn merge_row(row: &mut Row) -> RowMerge {
    let mut merge = RowMerge::default();
    let mut value = row[0];

    for i in 1..row.len() {
        let next = row[i];

        if let Some(merged) = merged_tile(value, next) {
            row[i - 1] = merged;
            row[i] = 0;

            merge.changed = true;
            merge.score = merge.score.saturating_add(merged);
            merge.max_merged = merge.max_merged.max(merged);

            compress_row(row);
            value = row[i];
        } else {
            value = next;
        }
    }

    merge
}

pub fn shift_left(mut grid: Grid) -> Shift {
    let total = grid
        .rows_mut()
        .iter_mut()
        .fold(RowMerge::default(), |total, row| {
            let compressed = compress_row(row);
            let merge = merge_row(row);

            RowMerge {
                changed: total.changed | compressed | merge.changed,
                score: total.score.saturating_add(merge.score),
                max_merged: total.max_merged.max(merge.max_merged),
            }
        });

    Shift {
        grid,
        score: total.score,
        max_merged: total.max_merged,
        changed: total.changed,
    }
}

pub fn shift(grid: Grid, direction: Direction) -> Shift {
    let (before, after) = direction.quarter_turns();

    let mut shift = shift_left(grid.rotated(before));
    shift.grid = shift.grid.rotated(after);

    shift
}

/// Shifts in every direction in `Direction::iter` order, leaving `grid` untouched.
pub fn try_all_moves(grid: &Grid) -> [Shift; 4] {
    Direction::ALL.map(|direction| shift(*grid, direction))
}

/// Places a 2 (90%) or a 4 (10%) on a uniformly chosen empty cell.
///
/// Returns the cell that was filled, or `None` on a full grid.
pub fn spawn_tile(rng: &mut impl Rng, grid: &mut Grid) -> Option<(usize, usize)> {
    let slot_count = metrics::empty_count(grid);

    if slot_count == 0 {
        return None;
    }

    let rand = rng.gen_range(0..(slot_count * 10));

    let slot_idx = rand / 10;
    let tile = if rand % 10 == 0 { 4 } else { 2 };

    let (i, j) = metrics::empty_cells(grid).nth(slot_idx as usize)?;
    grid.set(i, j, tile);

    trace!("spawned {tile} at ({i}, {j})");

    Some((i, j))
}

/// True when the grid has an empty cell or two mergeable neighbours in a row
/// or column.
///
/// Every cell is checked against its left neighbour and the one above,
/// column 0 included, so this is exact: it returns true iff some direction
/// changes the grid. It does not reproduce the older approximation that
/// skipped column 0 apart from the row above.
pub fn can_move(grid: &Grid) -> bool {
    let rows = grid.rows();

    rows.iter().enumerate().any(|(i, row)| {
        row.iter().enumerate().any(|(j, &tile)| {
            tile == 0
                || (j > 0 && merged_tile(row[j - 1], tile).is_some())
                || (i > 0 && merged_tile(rows[i - 1][j], tile).is_some())
        })
    })
}
