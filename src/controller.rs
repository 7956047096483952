use aho_corasick::{AhoCorasick, BuildError, MatchKind};
use lib_2048::{Direction, Model};
use log::info;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Undo,
    AutoMove,
    RandomMove,
    Reset,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Playing,
    Won,
    Lost,
}

const KEY_PATTERNS: [&[u8]; 9] = [
    b"\x1b[A", b"\x1b[B", b"\x1b[C", b"\x1b[D", b"z", b"a", b"r", b"n", b"q",
];

/// Indexed by the pattern id of a match against `KEY_PATTERNS`.
pub const KEY_COMMANDS: [Command; 9] = [
    Command::Move(Direction::Up),
    Command::Move(Direction::Down),
    Command::Move(Direction::Right),
    Command::Move(Direction::Left),
    Command::Undo,
    Command::AutoMove,
    Command::RandomMove,
    Command::Reset,
    Command::Quit,
];

pub fn key_matcher() -> Result<AhoCorasick, BuildError> {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostFirst)
        .ascii_case_insensitive(true)
        .build(KEY_PATTERNS)
}

/// Turns raw terminal input into commands, in the order they were typed.
pub fn parse_keys(matcher: &AhoCorasick, input: &[u8]) -> Vec<Command> {
    matcher
        .find_iter(input)
        .map(|m| KEY_COMMANDS[m.pattern().as_usize()])
        .collect()
}

/// Runs the single engine call behind `command`. `Quit` is left to the caller.
pub fn apply<R>(model: &mut Model<R>, command: Command)
where
    R: Rng,
{
    match command {
        Command::Move(direction) => {
            model.make_move(direction);
        }
        Command::Undo => {
            model.rollback();
        }
        Command::AutoMove => {
            model.auto_move();
        }
        Command::RandomMove => {
            model.random_move();
        }
        Command::Reset => model.reset(),
        Command::Quit => {}
    }
}

pub fn outcome<R>(model: &Model<R>) -> Outcome
where
    R: Rng,
{
    if model.has_won() {
        Outcome::Won
    } else if !model.can_move() {
        Outcome::Lost
    } else {
        Outcome::Playing
    }
}

/// Starts a new game once the current one is decided.
pub fn settle<R>(model: &mut Model<R>) -> Outcome
where
    R: Rng,
{
    let outcome = outcome(model);

    if outcome != Outcome::Playing {
        info!(
            "game {outcome:?} with score {} and max tile {}",
            model.score(),
            model.max_tile()
        );

        model.reset();
    }

    outcome
}

#[cfg(test)]
mod tests {
    use lib_2048::Grid;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn model(rows: [[u32; 4]; 4]) -> Model<ChaCha8Rng> {
        Model::from_grid(ChaCha8Rng::seed_from_u64(0), Grid::from_rows(rows))
    }

    #[test]
    fn parses_arrows_and_letters() {
        let matcher = key_matcher().unwrap();

        let commands = parse_keys(&matcher, b"\x1b[D\x1b[AzZaRnq");

        assert_eq!(
            commands,
            [
                Command::Move(Direction::Left),
                Command::Move(Direction::Up),
                Command::Undo,
                Command::Undo,
                Command::AutoMove,
                Command::RandomMove,
                Command::Reset,
                Command::Quit,
            ]
        );
    }

    #[test]
    fn ignores_unbound_keys() {
        let matcher = key_matcher().unwrap();

        assert!(parse_keys(&matcher, b"xyw\x1b[").is_empty());
    }

    #[test]
    fn each_command_is_one_engine_call() {
        let mut model = model([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);

        apply(&mut model, Command::Move(Direction::Left));
        assert_eq!(model.history_len(), 1);
        assert_eq!(model.score(), 4);

        apply(&mut model, Command::Undo);
        assert_eq!(model.history_len(), 0);
        assert_eq!(model.score(), 0);

        apply(&mut model, Command::AutoMove);
        apply(&mut model, Command::RandomMove);
        assert_eq!(model.history_len(), 2);

        apply(&mut model, Command::Reset);
        assert_eq!(model.history_len(), 0);
        assert_eq!(model.score(), 0);
    }

    #[test]
    fn settles_won_and_lost_games() {
        let mut won = model([[2048, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(settle(&mut won), Outcome::Won);
        assert_eq!(won.max_tile(), 0);

        let mut lost = model([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert_eq!(settle(&mut lost), Outcome::Lost);
        assert!(lost.can_move());

        let mut playing = model([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(settle(&mut playing), Outcome::Playing);
        assert_eq!(playing.grid().get(0, 0), 2);
    }
}
