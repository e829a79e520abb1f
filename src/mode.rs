//! Editing modes

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Keys are motions and commands
    #[default]
    Normal,
    /// Keys insert text
    Insert,
}

impl Mode {
    /// Largest column the cursor may rest on for a line of `line_len` clusters.
    ///
    /// Insert mode may sit after the last character; Normal mode stays on it
    /// (column 0 for an empty line).
    pub fn max_column(self, line_len: usize) -> usize {
        match self {
            Mode::Insert => line_len,
            Mode::Normal => line_len.saturating_sub(1),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
