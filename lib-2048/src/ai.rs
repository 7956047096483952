use log::trace;

use crate::{direction::Direction, logic, metrics, Grid};

/// How good a move looks: more empty cells first, then a higher score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveEfficiency {
    pub empty_count: i32,
    pub score: u32,
    pub direction: Direction,
}

impl MoveEfficiency {
    /// Ranks below every move that changes the grid.
    pub const fn unchanged(direction: Direction) -> Self {
        Self {
            empty_count: -1,
            score: 0,
            direction,
        }
    }

    /// Lexicographic rank, higher is better.
    pub const fn rank(&self) -> (i32, u32) {
        (self.empty_count, self.score)
    }
}

/// Scores all four directions on scratch copies of `grid`.
///
/// `score` is the running game score; each entry holds what the score would
/// be after that move.
pub fn rank_moves(grid: &Grid, score: u32) -> [MoveEfficiency; 4] {
    let shifts = logic::try_all_moves(grid);

    let mut ranked = Direction::ALL.map(MoveEfficiency::unchanged);

    for (efficiency, shift) in ranked.iter_mut().zip(shifts) {
        if shift.changed {
            efficiency.empty_count = metrics::empty_count(&shift.grid) as i32;
            efficiency.score = score.saturating_add(shift.score);
        }

        trace!("simulated {efficiency:?}");
    }

    ranked
}

/// Picks the highest ranked direction. Ties go to the earlier direction in
/// `Direction::iter` order.
pub fn best_move(grid: &Grid, score: u32) -> Direction {
    rank_moves(grid, score)
        .into_iter()
        .reduce(|best, efficiency| {
            if efficiency.rank() > best.rank() {
                efficiency
            } else {
                best
            }
        })
        .map_or(Direction::Left, |efficiency| efficiency.direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_moves_rank_lowest() {
        let grid = Grid::from_rows([[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]]);

        let ranked = rank_moves(&grid, 10);

        assert_eq!(ranked[Direction::Left as usize], MoveEfficiency::unchanged(Direction::Left));
        assert_eq!(ranked[Direction::Up as usize], MoveEfficiency::unchanged(Direction::Up));
        assert_eq!(ranked[Direction::Down as usize].empty_count, 12);
        assert_eq!(ranked[Direction::Down as usize].score, 10);
    }

    #[test]
    fn prefers_the_move_that_frees_most_cells() {
        let grid = Grid::from_rows([[2, 2, 4, 4], [8, 16, 32, 64], [2, 4, 8, 16], [4, 8, 16, 32]]);

        let ranked = rank_moves(&grid, 0);
        assert_eq!(ranked[Direction::Left as usize].empty_count, 2);
        assert_eq!(ranked[Direction::Left as usize].score, 12);

        assert_eq!(best_move(&grid, 0), Direction::Left);
    }

    #[test]
    fn ties_go_to_the_earlier_direction() {
        let grid = Grid::from_rows([[0; 4], [0, 2, 0, 0], [0; 4], [0; 4]]);

        assert_eq!(best_move(&grid, 0), Direction::Left);

        let locked = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);

        assert_eq!(best_move(&locked, 0), Direction::Left);
    }

    #[test]
    fn score_breaks_empty_count_ties() {
        // Every move leaves 13 empty cells; Up and Down merge the 8s, Left and Right the 2s.
        let grid = Grid::from_rows([[8, 0, 0, 0], [8, 0, 0, 0], [0; 4], [0, 0, 2, 2]]);

        let ranked = rank_moves(&grid, 0);
        assert_eq!(ranked[Direction::Up as usize].rank(), (13, 16));
        assert_eq!(ranked[Direction::Left as usize].rank(), (13, 4));

        assert_eq!(best_move(&grid, 0), Direction::Up);
    }
}
