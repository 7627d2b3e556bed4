//! Keypad scan-code decoding.
//!
//! The TCA8418 keypad controller delivers one byte per key edge
//! (datasheet page 15, Table 1): bit 7 is the press flag, bits 6..0 are a
//! 1-based composite index `row * 10 + col + 1`.  This module turns that
//! raw byte into a logical [`KeyEvent`] against the fixed 4×4 keymap.
//!
//! The keymap lookup is `KEYMAP[col][row]` — column-major, transposed
//! relative to the printed layout, matching how the matrix is wired on
//! the carrier board.

use crate::error::KeypadError;

/// One raw byte from the keypad controller FIFO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawScanCode(pub u8);

/// Press or release edge of a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    Press,
    Release,
}

/// A decoded key event.  Carries no history — exactly one raw scan code
/// maps to one `KeyEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub row: u8,
    pub col: u8,
    pub edge: KeyEdge,
    pub symbol: char,
}

const ROWS: usize = 4;
const COLS: usize = 4;

/// Symbols as printed on the keypad, row-major.
pub const KEYMAP: [[char; COLS]; ROWS] = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

const PRESS_BIT: u8 = 0x80;

/// Decode one raw scan code into a [`KeyEvent`].
///
/// Any index that lands outside the 4×4 matrix after the 1-based
/// decrement is rejected with [`KeypadError::MalformedScanCode`]; the
/// control loop logs it and moves on.
pub fn decode(raw: RawScanCode) -> Result<KeyEvent, KeypadError> {
    let edge = if raw.0 & PRESS_BIT != 0 {
        KeyEdge::Press
    } else {
        KeyEdge::Release
    };

    let index = raw.0 & !PRESS_BIT;
    if index == 0 {
        return Err(KeypadError::MalformedScanCode(raw.0));
    }
    let index = index - 1;
    let row = index / 10;
    let col = index % 10;
    if row as usize >= ROWS || col as usize >= COLS {
        return Err(KeypadError::MalformedScanCode(raw.0));
    }

    Ok(KeyEvent {
        row,
        col,
        edge,
        // Column-major: the matrix rows/columns are swapped relative to
        // the printed layout.
        symbol: KEYMAP[col as usize][row as usize],
    })
}

/// Build the raw scan code for a physical (row, col, edge) triple.
/// Inverse of [`decode`]; used by tests and the host-side simulator.
pub fn encode(row: u8, col: u8, edge: KeyEdge) -> RawScanCode {
    let index = row * 10 + col + 1;
    let press = match edge {
        KeyEdge::Press => PRESS_BIT,
        KeyEdge::Release => 0,
    };
    RawScanCode(index | press)
}

/// Sanity-check the keymap at startup: 4×4, all symbols distinct.
pub fn validate_keymap() -> bool {
    let mut seen = [false; 128];
    for row in &KEYMAP {
        for &sym in row {
            let i = sym as usize;
            if i >= seen.len() || seen[i] {
                return false;
            }
            seen[i] = true;
        }
    }
    true
}
