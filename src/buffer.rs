use crate::chunk_tree::{ChunkTree, ChunkTreeConfig};
use crate::error::{EditorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// Default configuration for the line tree
const DEFAULT_CONFIG: ChunkTreeConfig = ChunkTreeConfig::new(64, 16);

/// A location in the buffer: line index and grapheme column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Line terminator written back when the buffer is serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Style of the first line break in `text`, if it has one
    pub fn detect(text: &str) -> Option<Self> {
        let newline = text.find('\n')?;
        if text[..newline].ends_with('\r') {
            Some(LineEnding::CrLf)
        } else {
            Some(LineEnding::Lf)
        }
    }
}

/// One line of text, without its terminator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Line {
    text: String,
    /// Cached number of grapheme clusters in `text`
    graphemes: usize,
    /// Terminator written after this line; unused on the last line
    ending: LineEnding,
}

impl Line {
    fn new(text: String, ending: LineEnding) -> Self {
        let graphemes = text.graphemes(true).count();
        Self {
            text,
            graphemes,
            ending,
        }
    }

    /// Byte offset of the grapheme at `column`, or the line's byte length past the end
    fn byte_offset(&self, column: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(column)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    fn recount(&mut self) {
        self.graphemes = self.text.graphemes(true).count();
    }
}

/// Splits on `\n` and `\r\n`, pairing each segment with the terminator that
/// followed it. A `\r` not followed by `\n` stays part of the text.
fn split_lines(text: &str) -> Vec<(&str, LineEnding)> {
    let count = text.split('\n').count();
    text.split('\n')
        .enumerate()
        .map(|(i, segment)| {
            if i + 1 == count {
                return (segment, LineEnding::Lf);
            }
            match segment.strip_suffix('\r') {
                Some(stripped) => (stripped, LineEnding::CrLf),
                None => (segment, LineEnding::Lf),
            }
        })
        .collect()
}

/// The editable text: a tree of lines, each indexed by grapheme cluster.
///
/// There is always at least one line. Positions handed to [`TextBuffer::insert`]
/// and [`TextBuffer::delete`] are clamped to the buffer; line queries outside
/// the buffer fail with [`EditorError::IndexOutOfRange`].
#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: ChunkTree<Line>,
    line_ending: LineEnding,
}

impl TextBuffer {
    /// Create a new buffer holding one empty line
    pub fn new() -> Self {
        Self::with_line_ending(LineEnding::default())
    }

    pub fn with_line_ending(line_ending: LineEnding) -> Self {
        Self {
            lines: ChunkTree::from_vec(vec![Line::default()], DEFAULT_CONFIG),
            line_ending,
        }
    }

    /// Create a buffer from text, keeping its line ending style (`\n` if it has no line break)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        let lines = split_lines(text)
            .into_iter()
            .map(|(line, ending)| Line::new(line.to_string(), ending))
            .collect();
        Self {
            lines: ChunkTree::from_vec(lines, DEFAULT_CONFIG),
            line_ending: LineEnding::detect(text).unwrap_or_default(),
        }
    }

    /// Like [`TextBuffer::from_str`], rejecting bytes that are not UTF-8
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_str(text))
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Style used for line breaks added by editing; existing breaks keep theirs
    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    /// Number of lines; never zero
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of grapheme clusters on `line`
    pub fn line_len(&self, line: usize) -> Result<usize> {
        self.line(line).map(|l| l.graphemes)
    }

    pub fn line_text(&self, line: usize) -> Result<&str> {
        self.line(line).map(|l| l.text.as_str())
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines_from(0)
    }

    /// Lines starting at `start`; empty past the end
    pub fn lines_from(&self, start: usize) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter_from(start).map(|l| l.text.as_str())
    }

    /// Total number of grapheme clusters, counting each line break as one
    pub fn grapheme_count(&self) -> usize {
        let text: usize = self.lines.iter().map(|l| l.graphemes).sum();
        text + self.line_count() - 1
    }

    /// True when the buffer is a single empty line
    pub fn is_empty(&self) -> bool {
        self.line_count() == 1 && self.lines.get(0).is_some_and(|l| l.text.is_empty())
    }

    /// Nearest position that exists in the buffer
    pub fn clamp_position(&self, position: Position) -> Position {
        let line = position.line.min(self.line_count() - 1);
        let column = position.column.min(self.clamped_line_len(line));
        Position::new(line, column)
    }

    /// Length of `line`, or of the last line when `line` is past the end
    pub(crate) fn clamped_line_len(&self, line: usize) -> usize {
        let line = line.min(self.line_count() - 1);
        self.lines.get(line).map_or(0, |l| l.graphemes)
    }

    fn line(&self, line: usize) -> Result<&Line> {
        self.lines.get(line).ok_or(EditorError::IndexOutOfRange {
            line,
            line_count: self.line_count(),
        })
    }

    /// Insert text at a position, splitting lines on embedded line breaks.
    /// Returns the position just past the inserted text.
    pub fn insert(&mut self, at: Position, text: &str) -> Position {
        let at = self.clamp_position(at);
        if text.is_empty() {
            return at;
        }

        let segments: Vec<&str> = split_lines(text).into_iter().map(|(s, _)| s).collect();
        let new_ending = self.line_ending;
        let Some(current) = self.lines.get_mut(at.line) else {
            return at;
        };

        let split = current.byte_offset(at.column);
        let tail = current.text.split_off(split);
        current.text.push_str(segments[0]);

        if segments.len() == 1 {
            let column = current.text.graphemes(true).count();
            current.text.push_str(&tail);
            current.recount();
            return Position::new(at.line, column);
        }
        // the original break now ends the last inserted segment
        let tail_ending = std::mem::replace(&mut current.ending, new_ending);
        current.recount();

        let last = segments.len() - 1;
        for (offset, segment) in segments[1..last].iter().enumerate() {
            self.lines.insert(
                at.line + 1 + offset,
                Line::new(segment.to_string(), new_ending),
            );
        }

        let mut closing = segments[last].to_string();
        let column = closing.graphemes(true).count();
        closing.push_str(&tail);
        self.lines
            .insert(at.line + last, Line::new(closing, tail_ending));

        Position::new(at.line + last, column)
    }

    /// Like [`TextBuffer::insert`] for raw bytes; invalid UTF-8 leaves the buffer untouched
    pub fn insert_bytes(&mut self, at: Position, bytes: &[u8]) -> Result<Position> {
        let text = std::str::from_utf8(bytes)?;
        Ok(self.insert(at, text))
    }

    /// Delete `count` grapheme clusters starting at a position. A line break
    /// counts as one cluster; deleting it joins the next line onto this one.
    /// Returns the removed text with line breaks as `\n`.
    pub fn delete(&mut self, at: Position, count: usize) -> String {
        let at = self.clamp_position(at);
        let mut removed = String::new();
        let mut remaining = count;

        while remaining > 0 {
            let line_len = self.clamped_line_len(at.line);

            if at.column < line_len {
                let take = remaining.min(line_len - at.column);
                let Some(line) = self.lines.get_mut(at.line) else {
                    break;
                };
                let start = line.byte_offset(at.column);
                let end = line.byte_offset(at.column + take);
                removed.push_str(&line.text[start..end]);
                line.text.replace_range(start..end, "");
                line.recount();
                remaining -= take;
            } else if let Some(next) = self.lines.remove(at.line + 1) {
                if let Some(line) = self.lines.get_mut(at.line) {
                    line.text.push_str(&next.text);
                    line.ending = next.ending;
                    line.recount();
                }
                removed.push('\n');
                remaining -= 1;
            } else {
                break;
            }
        }

        removed
    }

    /// Serialize for persistence, ending each line with the terminator it was read with
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.line_count() - 1;
        for (i, line) in self.lines.iter().enumerate() {
            f.write_str(&line.text)?;
            if i < last {
                f.write_str(line.ending.as_str())?;
            }
        }
        Ok(())
    }
}
