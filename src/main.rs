use std::{
    io::{self, Read, Write},
    os::fd::AsRawFd,
};

use clap::Parser;
use flexi_logger::{FileSpec, Logger};
use lib_2048::Model;
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    config::{Config, Mode},
    controller::{Command, Outcome},
    error::PlayError,
};

mod config;
mod controller;
mod error;
mod render;

fn announce(out: &mut impl Write, outcome: Outcome, score: u32) -> io::Result<()> {
    match outcome {
        Outcome::Won => writeln!(out, "You won! Final score {score}"),
        Outcome::Lost => writeln!(out, "Game over. Final score {score}"),
        Outcome::Playing => Ok(()),
    }
}

fn play_interactive<R: Rng>(
    out: &mut (impl AsRawFd + Write),
    input: &mut impl Read,
    model: &mut Model<R>,
) -> Result<(), PlayError> {
    let matcher = controller::key_matcher()?;

    let mut buf = [0u8; 128];
    let mut buf_len = 0;

    let _raw_terminal = render::RawTerminal::enable(out)?;
    render::draw_board(out, &model.snapshot())?;

    loop {
        let read = input.read(&mut buf[buf_len..])?;

        if read == 0 {
            return Ok(());
        }

        buf_len += read;

        for command in controller::parse_keys(&matcher, &buf[..buf_len]) {
            if command == Command::Quit {
                return Ok(());
            }

            let before = model.snapshot();
            controller::apply(model, command);
            render::redraw_board(out, &before, &model.snapshot())?;

            let score = model.score();
            let outcome = controller::settle(model);

            if outcome != Outcome::Playing {
                announce(out, outcome, score)?;
                render::draw_board(out, &model.snapshot())?;
            }
        }

        // Keep a partial escape sequence for the next read.
        buf_len = match &buf[..buf_len] {
            [.., 0x1b, b'['] => {
                buf[..2].copy_from_slice(b"\x1b[");
                2
            }
            [.., 0x1b] => {
                buf[0] = 0x1b;
                1
            }
            _ => 0,
        }
    }
}

fn play_unattended<R: Rng>(
    out: &mut impl Write,
    model: &mut Model<R>,
    command: Command,
    max_moves: Option<u64>,
) -> Result<(), PlayError> {
    render::draw_board(out, &model.snapshot())?;

    let mut moves = 0;

    while controller::outcome(model) == Outcome::Playing && max_moves.map_or(true, |max| moves < max)
    {
        let before = model.snapshot();
        controller::apply(model, command);
        render::redraw_board(out, &before, &model.snapshot())?;

        moves += 1;
    }

    let outcome = controller::outcome(model);
    info!("{command:?} play stopped after {moves} moves: {outcome:?}");

    match outcome {
        Outcome::Playing => writeln!(out, "Stopped after {moves} moves. Score {}", model.score())?,
        _ => announce(out, outcome, model.score())?,
    }

    Ok(())
}

fn main() -> Result<(), PlayError> {
    let config = Config::parse();

    let _logger = Logger::try_with_env_or_str("warn")?
        .log_to_file(FileSpec::default().directory(&config.log_dir))
        .format(flexi_logger::detailed_format)
        .start()?;

    let rng = config
        .seed
        .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);

    let mut model = Model::new(rng);

    let mut stdout = io::stdout().lock();
    let mut stdin = io::stdin().lock();

    info!("starting {:?} game", config.mode());

    match config.mode() {
        Mode::Interactive => {
            play_interactive(&mut stdout, &mut stdin, &mut model)?;
            writeln!(stdout)?;
        }
        Mode::Auto => play_unattended(&mut stdout, &mut model, Command::AutoMove, config.max_moves)?,
        Mode::Random => {
            play_unattended(&mut stdout, &mut model, Command::RandomMove, config.max_moves)?
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use lib_2048::Grid;

    use super::*;

    #[test]
    fn unattended_play_respects_move_limit() {
        let mut model = Model::new(ChaCha8Rng::seed_from_u64(1));
        let mut out = Vec::new();

        play_unattended(&mut out, &mut model, Command::AutoMove, Some(5)).unwrap();

        assert_eq!(model.history_len(), 5);
        assert!(String::from_utf8(out).unwrap().contains("Stopped after 5 moves"));
    }

    #[test]
    fn unattended_play_ends_on_locked_grid() {
        let locked = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let mut model = Model::from_grid(ChaCha8Rng::seed_from_u64(1), locked);
        let mut out = Vec::new();

        play_unattended(&mut out, &mut model, Command::RandomMove, None).unwrap();

        assert_eq!(model.history_len(), 0);
        assert!(String::from_utf8(out).unwrap().contains("Game over"));
    }
}
