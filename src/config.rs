use std::path::PathBuf;

use clap::Parser;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Interactive,
    Auto,
    Random,
}

#[derive(Parser, Debug)]
#[command(name = "play-2048", about = "2048 in the terminal, with undo and an auto-move heuristic")]
pub struct Config {
    /// Let the heuristic play until the game is won or lost
    #[arg(short = 'a', long, conflicts_with = "random")]
    pub auto: bool,

    /// Play uniformly random moves until the game is won or lost
    #[arg(short = 'r', long)]
    pub random: bool,

    /// Seed for tile spawns and random moves
    #[arg(short = 's', long)]
    pub seed: Option<u64>,

    /// Stop unattended play after this many moves
    #[arg(short = 'm', long)]
    pub max_moves: Option<u64>,

    /// Directory for log files; the level comes from RUST_LOG
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,
}

impl Config {
    pub fn mode(&self) -> Mode {
        if self.auto {
            Mode::Auto
        } else if self.random {
            Mode::Random
        } else {
            Mode::Interactive
        }
    }
}
