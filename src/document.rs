use crate::buffer::{Position, TextBuffer};
use crate::cursor::Cursor;
use crate::mode::Mode;
use crate::motion::{apply_motion, Motion};
use std::path::{Path, PathBuf};

/// The single open document: text, cursor, mode, file path and dirty flag.
///
/// Every change to the text goes through the methods here so the cursor is
/// re-derived from the new buffer shape and the dirty flag is kept honest.
#[derive(Debug, Clone, Default)]
pub struct Document {
    buffer: TextBuffer,
    cursor: Cursor,
    mode: Mode,
    path: Option<PathBuf>,
    /// Has the buffer been modified since the last load or save?
    dirty: bool,
}

impl Document {
    /// Create an empty, unnamed document
    pub fn new() -> Self {
        Self::default()
    }

    /// Document over already loaded text; starts clean, in Normal mode at (0, 0)
    pub fn with_buffer(buffer: TextBuffer, path: Option<PathBuf>) -> Self {
        Self {
            buffer,
            cursor: Cursor::origin(),
            mode: Mode::Normal,
            path,
            dirty: false,
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    /// File name shown to the user (last path component)
    pub fn file_name(&self) -> Option<String> {
        let path = self.path.as_deref()?;
        let name = path.file_name().map_or_else(
            || path.to_string_lossy(),
            |name| name.to_string_lossy(),
        );
        Some(name.into_owned())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record that the buffer now matches what is on disk
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Move the cursor as close to `position` as the buffer and mode allow
    pub fn place_cursor(&mut self, position: Position) {
        self.cursor = Cursor::clamped(position, &self.buffer, self.mode);
    }

    /// Read-only snapshot for rendering
    pub fn view(&self) -> DocumentView<'_> {
        DocumentView {
            buffer: &self.buffer,
            cursor: self.cursor.position(),
            mode: self.mode,
            file_name: self.file_name(),
            dirty: self.dirty,
        }
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            tracing::debug!(from = %self.mode, to = %mode, "mode change");
        }
        self.mode = mode;
        self.cursor = self.cursor.reclamp(&self.buffer, mode);
    }

    pub(crate) fn move_cursor(&mut self, motion: Motion) {
        self.cursor = apply_motion(motion, self.cursor, &self.buffer, self.mode);
    }

    /// Insert at the cursor and leave the cursor just past the new text
    pub(crate) fn insert_at_cursor(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let end = self.buffer.insert(self.cursor.position(), text);
        self.cursor = Cursor::clamped(end, &self.buffer, self.mode);
        self.dirty = true;
    }

    /// Delete the cluster before the cursor, joining onto the previous line at
    /// column 0. Returns false at the start of the buffer.
    pub(crate) fn delete_before_cursor(&mut self) -> bool {
        let Position { line, column } = self.cursor.position();
        let target = if column > 0 {
            Position::new(line, column - 1)
        } else if line > 0 {
            Position::new(line - 1, self.buffer.clamped_line_len(line - 1))
        } else {
            return false;
        };

        self.buffer.delete(target, 1);
        self.cursor = Cursor::clamped(target, &self.buffer, self.mode);
        self.dirty = true;
        true
    }
}

/// What the renderer gets to see after every event
#[derive(Debug, Clone)]
pub struct DocumentView<'a> {
    buffer: &'a TextBuffer,
    pub cursor: Position,
    pub mode: Mode,
    pub file_name: Option<String>,
    pub dirty: bool,
}

impl<'a> DocumentView<'a> {
    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn lines(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.buffer.lines()
    }

    /// Lines from `start` onwards, for drawing a scrolled viewport
    pub fn lines_from(&self, start: usize) -> impl Iterator<Item = &'a str> + 'a {
        self.buffer.lines_from(start)
    }
}
