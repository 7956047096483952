use log::{debug, trace};
use rand::Rng;

use crate::{ai, direction::Direction, logic, metrics, Grid, Tile, WINNING_TILE};

/// Everything a rollback restores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub grid: Grid,
    pub score: u32,
    pub max_tile: Tile,
}

/// One game session: the live grid, its score and the undo history.
///
/// All mutation goes through `&mut self`, so callers sharing a model across
/// threads have to put it behind a single lock.
pub struct Model<R> {
    grid: Grid,
    score: u32,
    max_tile: Tile,
    history: Vec<Snapshot>,
    rng: R,
}

impl<R> Model<R>
where
    R: Rng,
{
    /// Starts a fresh game with two spawned tiles.
    pub fn new(rng: R) -> Self {
        let mut model = Self::from_grid(rng, Grid::EMPTY);
        model.reset();

        model
    }

    /// Starts from a given position with zero score and an empty history.
    pub fn from_grid(rng: R, grid: Grid) -> Self {
        Self {
            grid,
            score: 0,
            max_tile: metrics::highest_tile(&grid),
            history: Vec::new(),
            rng,
        }
    }

    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub const fn max_tile(&self) -> Tile {
        self.max_tile
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid,
            score: self.score,
            max_tile: self.max_tile,
        }
    }

    /// Slides the grid in `direction`, spawning a tile if anything moved.
    ///
    /// Always pushes exactly one history entry, even when the grid is unchanged.
    /// Returns whether the grid changed.
    pub fn make_move(&mut self, direction: Direction) -> bool {
        self.history.push(self.snapshot());

        let shift = logic::shift(self.grid, direction);

        self.grid = shift.grid;
        self.score = self.score.saturating_add(shift.score);
        self.max_tile = self.max_tile.max(shift.max_merged);

        if shift.changed {
            logic::spawn_tile(&mut self.rng, &mut self.grid);
        }

        debug!(
            "moved {direction}: changed {}, score {}, max tile {}",
            shift.changed, self.score, self.max_tile
        );

        shift.changed
    }

    /// Moves in a uniformly chosen direction, whether or not it changes the grid.
    pub fn random_move(&mut self) -> Direction {
        let direction = Direction::random(&mut self.rng);
        self.make_move(direction);

        direction
    }

    /// Applies the direction that leaves the most empty cells, then the highest
    /// score. Candidates are simulated on copies, so only the chosen move is
    /// recorded in the history.
    pub fn auto_move(&mut self) -> Direction {
        let direction = ai::best_move(&self.grid, self.score);
        self.make_move(direction);

        direction
    }

    /// Restores the state before the most recent move. Returns false when
    /// there is nothing to undo.
    pub fn rollback(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            trace!("rollback on empty history");
            return false;
        };

        self.grid = snapshot.grid;
        self.score = snapshot.score;
        self.max_tile = snapshot.max_tile;

        debug!("rolled back to score {}", self.score);

        true
    }

    pub fn can_move(&self) -> bool {
        logic::can_move(&self.grid)
    }

    pub const fn has_won(&self) -> bool {
        self.max_tile >= WINNING_TILE
    }

    /// Clears grid, score, max tile and history, then spawns two tiles.
    pub fn reset(&mut self) {
        self.grid = Grid::EMPTY;
        self.score = 0;
        self.max_tile = 0;
        self.history.clear();

        logic::spawn_tile(&mut self.rng, &mut self.grid);
        logic::spawn_tile(&mut self.rng, &mut self.grid);

        debug!("new game\n{}", self.grid);
    }
}
