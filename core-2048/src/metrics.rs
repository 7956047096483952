use crate::{Grid, Row, Tile, SIZE};

pub fn row_empty_count(row: &Row) -> u32 {
    row.iter().filter(|&&tile| tile == 0).count() as u32
}

pub fn empty_count(grid: &Grid) -> u32 {
    grid.rows().iter().map(row_empty_count).sum()
}

/// Positions of all empty cells in row-major order.
pub fn empty_cells(grid: &Grid) -> impl Iterator<Item = (usize, usize)> + '_ {
    (0..SIZE)
        .flat_map(|i| (0..SIZE).map(move |j| (i, j)))
        .filter(move |&(i, j)| grid.get(i, j) == 0)
}

pub fn tile_sum(grid: &Grid) -> u32 {
    grid.rows().iter().flatten().sum()
}

pub fn highest_tile(grid: &Grid) -> Tile {
    grid.rows().iter().flatten().copied().max().unwrap_or(0)
}
