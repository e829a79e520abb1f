use crate::buffer::{Position, TextBuffer};
use crate::mode::Mode;

/// The editing cursor.
///
/// A cursor is always derived from a buffer: [`Cursor::clamped`] bounds a
/// requested position to the buffer's current shape and the mode's column
/// limit, so a cursor obtained that way is valid until the buffer changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    position: Position,
}

impl Cursor {
    /// Cursor at (0, 0), valid for every buffer
    pub const fn origin() -> Self {
        Self {
            position: Position::new(0, 0),
        }
    }

    /// Nearest valid cursor to `requested` in `buffer` under `mode`
    pub fn clamped(requested: Position, buffer: &TextBuffer, mode: Mode) -> Self {
        let line = requested.line.min(buffer.line_count() - 1);
        let max_column = mode.max_column(buffer.clamped_line_len(line));
        Self {
            position: Position::new(line, requested.column.min(max_column)),
        }
    }

    /// Re-derive this cursor after `buffer` changed shape or the mode changed
    pub fn reclamp(self, buffer: &TextBuffer, mode: Mode) -> Self {
        Self::clamped(self.position, buffer, mode)
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Whether the cursor satisfies the bounds of `mode` in `buffer`
    pub fn is_valid_in(&self, buffer: &TextBuffer, mode: Mode) -> bool {
        self.line() < buffer.line_count()
            && buffer
                .line_len(self.line())
                .is_ok_and(|len| self.column() <= mode.max_column(len))
    }
}
