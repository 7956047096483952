pub use core_2048::*;

pub mod ai;
pub mod direction;
pub mod logic;
pub mod model;

pub use direction::Direction;
pub use model::{Model, Snapshot};

/// Reaching this tile wins the game.
pub const WINNING_TILE: Tile = 2048;
