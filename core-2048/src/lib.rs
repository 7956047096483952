use std::fmt;

pub mod metrics;

pub const SIZE: usize = 4;

/// A single cell. Zero is empty, anything else is a power of two.
pub type Tile = u32;

pub type Row = [Tile; SIZE];

/// Rotates an `M`x`N` array a quarter turn clockwise into a new `N`x`M` array.
///
/// Cell `(i, j)` of the source ends up at `(j, M - 1 - i)`.
pub fn rotate_clockwise<T, const M: usize, const N: usize>(cells: &[[T; N]; M]) -> [[T; M]; N]
where
    T: Copy + Default,
{
    let mut rotated = [[T::default(); M]; N];

    for (i, row) in cells.iter().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            rotated[j][M - 1 - i] = cell;
        }
    }

    rotated
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Grid([Row; SIZE]);

impl Grid {
    pub const EMPTY: Self = Self([[0; SIZE]; SIZE]);

    pub const fn from_rows(rows: [Row; SIZE]) -> Self {
        Self(rows)
    }

    pub const fn rows(&self) -> &[Row; SIZE] {
        &self.0
    }

    pub fn rows_mut(&mut self) -> &mut [Row; SIZE] {
        &mut self.0
    }

    pub const fn get(&self, row: usize, col: usize) -> Tile {
        self.0[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, tile: Tile) {
        self.0[row][col] = tile;
    }

    /// Returns a copy of the grid turned clockwise `quarter_turns` times.
    pub fn rotated(self, quarter_turns: u32) -> Self {
        (0..quarter_turns % 4).fold(self, |grid, _| Self(rotate_clockwise(&grid.0)))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            for (j, tile) in row.iter().enumerate() {
                if j != 0 {
                    f.write_str(" ")?;
                }

                write!(f, "{tile:>5}")?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_moves_cells_clockwise() {
        let grid = Grid::from_rows([
            [1, 2, 3, 4],
            [5, 6, 7, 8],
            [9, 10, 11, 12],
            [13, 14, 15, 16],
        ]);

        let expected = Grid::from_rows([
            [13, 9, 5, 1],
            [14, 10, 6, 2],
            [15, 11, 7, 3],
            [16, 12, 8, 4],
        ]);

        assert_eq!(grid.rotated(1), expected);
    }

    #[test]
    fn four_rotations_are_identity_for_rectangles() {
        let cells = [[1u32, 2, 3], [4, 5, 6]];

        let once = rotate_clockwise(&cells);
        assert_eq!(once, [[4, 1], [5, 2], [6, 3]]);

        let twice = rotate_clockwise(&once);
        let thrice = rotate_clockwise(&twice);
        let back = rotate_clockwise(&thrice);

        assert_eq!(back, cells);
    }

    #[test]
    fn rotation_leaves_source_untouched() {
        let grid = Grid::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let rotated = grid.rotated(3);

        assert_eq!(grid.get(0, 0), 2);
        assert_eq!(rotated.get(3, 0), 2);
        assert_eq!(grid.rotated(4), grid);
    }

    #[test]
    fn displays_rows_right_aligned() {
        let grid = Grid::from_rows([[2, 0, 0, 2048], [0; 4], [0; 4], [0; 4]]);

        let text = grid.to_string();

        assert_eq!(text.lines().next(), Some("    2     0     0  2048"));
        assert_eq!(text.lines().count(), 4);
    }
}
