//! Cursor motions.
//!
//! Motions never fail: a request that would leave the buffer is clamped to
//! the nearest valid position. The column is recomputed on every vertical
//! move rather than remembered across lines.

use crate::buffer::{Position, TextBuffer};
use crate::cursor::Cursor;
use crate::mode::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
}

/// Apply `motion` to `cursor` within `buffer`, using the column bound of `mode`.
pub fn apply_motion(motion: Motion, cursor: Cursor, buffer: &TextBuffer, mode: Mode) -> Cursor {
    let cursor = cursor.reclamp(buffer, mode);
    let (line, column) = (cursor.line(), cursor.column());

    let target = match motion {
        Motion::Left => Position::new(line, column.saturating_sub(1)),
        Motion::Right => Position::new(line, column + 1),
        Motion::Up => Position::new(line.saturating_sub(1), column),
        Motion::Down => Position::new(line + 1, column),
        Motion::LineStart => Position::new(line, 0),
        Motion::LineEnd => Position::new(line, usize::MAX),
    };

    Cursor::clamped(target, buffer, mode)
}
