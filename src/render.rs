use std::{
    io::{self, Write},
    mem::MaybeUninit,
    os::fd::{AsRawFd, RawFd},
};

use lib_2048::{Row, Snapshot, SIZE};

use crate::error::PlayError;

const SQUARE_HEIGHT: usize = 3;
const TOP_ROW: &[u8] = "┏━━━━━━━┳━━━━━━━┳━━━━━━━┳━━━━━━━┓\n".as_bytes();
const SEPERATOR_ROW: &[u8] = "┣━━━━━━━╋━━━━━━━╋━━━━━━━╋━━━━━━━┫\n".as_bytes();
const BOTTOM_ROW: &[u8] = "┗━━━━━━━┻━━━━━━━┻━━━━━━━┻━━━━━━━┛\n".as_bytes();
const EMPTY_ROW: &[u8] = "┃       ┃       ┃       ┃       ┃\n".as_bytes();
const EMPTY_CELL: &[u8] = "┃       ".as_bytes();
const COLOUR_TABLE: [u8; 7] = [90, 33, 31, 32, 33, 36, 35];

/// Lines between the status line and the line below the board.
const STATUS_LINE: usize = SQUARE_HEIGHT * SIZE + SIZE + 2;

fn tile_colour(tile: u32) -> Option<u8> {
    (tile != 0).then(|| COLOUR_TABLE[(tile.trailing_zeros() as usize - 1) % COLOUR_TABLE.len()])
}

fn draw_padding_line(out: &mut impl Write, row: &Row) -> io::Result<()> {
    for &tile in row {
        if let Some(colour) = tile_colour(tile) {
            write!(out, "┃\x1b[{}m       \x1b[m", colour + 10)?;
        } else {
            out.write_all(EMPTY_CELL)?;
        }
    }

    Ok(())
}

fn draw_board_row(out: &mut impl Write, row: &Row) -> io::Result<()> {
    for _ in 0..((SQUARE_HEIGHT - 1) / 2) {
        draw_padding_line(out, row)?;
    }

    out.write_all(b"\x1b[E")?;

    for &tile in row {
        if let Some(colour) = tile_colour(tile) {
            write!(out, "┃\x1b[7m\x1b[{colour}m{tile:^7}\x1b[m")?;
        } else {
            out.write_all(EMPTY_CELL)?;
        }
    }

    out.write_all(b"\x1b[E")?;

    for _ in 0..((SQUARE_HEIGHT - 1).div_ceil(2)) {
        draw_padding_line(out, row)?;
    }

    Ok(())
}

fn write_status(out: &mut impl Write, state: &Snapshot) -> io::Result<()> {
    write!(
        out,
        "Score: {}  Max tile: {}\x1b[K",
        state.score, state.max_tile
    )
}

/// Draws a whole board below the cursor, leaving the cursor on the line after it.
pub fn draw_board(out: &mut impl Write, state: &Snapshot) -> io::Result<()> {
    out.write_all(b"\n")?;
    write_status(out, state)?;
    out.write_all(b"\n")?;
    out.write_all(TOP_ROW)?;

    for i in 0..SIZE {
        if i != 0 {
            out.write_all(SEPERATOR_ROW)?;
        }

        for _ in 0..SQUARE_HEIGHT {
            out.write_all(EMPTY_ROW)?;
        }
    }

    out.write_all(BOTTOM_ROW)?;

    let blank = Snapshot {
        grid: Default::default(),
        ..*state
    };

    redraw_board(out, &blank, state)
}

/// Repaints only the rows and status that differ between `old` and `new`.
///
/// Expects the cursor on the line after the board and leaves it there.
pub fn redraw_board(out: &mut impl Write, old: &Snapshot, new: &Snapshot) -> io::Result<()> {
    let mut current_line = if (new.score, new.max_tile) != (old.score, old.max_tile) {
        write!(out, "\x1b[{STATUS_LINE}F")?;
        write_status(out, new)?;

        STATUS_LINE
    } else {
        0
    };

    let changed_rows = (0..SIZE).filter(|&i| new.grid.rows()[i] != old.grid.rows()[i]);

    for row in changed_rows {
        let final_row_to_end = (SQUARE_HEIGHT - 1).div_ceil(2) + 2;
        let between_rows = SQUARE_HEIGHT + 1;
        let target_line = final_row_to_end + between_rows * (SIZE - 1 - row) + 1;

        if target_line > current_line {
            write!(out, "\x1b[{}F", target_line - current_line)?;
        } else {
            write!(out, "\x1b[{}E", current_line - target_line)?;
        }

        draw_board_row(out, &new.grid.rows()[row])?;
        current_line = target_line - 2;
    }

    if current_line != 0 {
        write!(out, "\x1b[{current_line}E")?;
    }

    out.flush()
}

/// Switches off echo and line buffering until dropped.
pub struct RawTerminal {
    fd: RawFd,
    original: libc::termios,
}

impl RawTerminal {
    pub fn enable(fd: &impl AsRawFd) -> Result<Self, PlayError> {
        let fd = fd.as_raw_fd();
        let mut termios = MaybeUninit::uninit();

        let original = unsafe {
            if libc::tcgetattr(fd, termios.as_mut_ptr()) != 0 {
                return Err(PlayError::Terminal {
                    call: "tcgetattr",
                    source: io::Error::last_os_error(),
                });
            }

            termios.assume_init()
        };

        let mut raw = original;
        raw.c_lflag &= !(libc::ECHO | libc::ICANON);

        unsafe {
            if libc::tcsetattr(fd, libc::TCSADRAIN, &raw) != 0 {
                return Err(PlayError::Terminal {
                    call: "tcsetattr",
                    source: io::Error::last_os_error(),
                });
            }
        }

        Ok(Self { fd, original })
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        unsafe {
            libc::tcsetattr(self.fd, libc::TCSADRAIN, &self.original);
        }
    }
}
