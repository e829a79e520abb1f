use crate::input::Key;
use std::path::PathBuf;
use unicode_segmentation::UnicodeSegmentation;

/// Outcome of feeding a key to a [`FilenamePrompt`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Pending,
    Submitted(PathBuf),
    Cancelled,
}

/// One-line "Save as" input shown when a document has no file name yet
#[derive(Debug, Clone, Default)]
pub struct FilenamePrompt {
    input: String,
}

impl FilenamePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&self) -> &'static str {
        "Save as: "
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn handle_key(&mut self, key: Key) -> PromptOutcome {
        match key {
            Key::Escape | Key::Quit => PromptOutcome::Cancelled,
            Key::Enter => {
                let name = self.input.trim();
                if name.is_empty() {
                    PromptOutcome::Pending
                } else {
                    PromptOutcome::Submitted(PathBuf::from(name))
                }
            }
            Key::Backspace => {
                if let Some((start, _)) = self.input.grapheme_indices(true).next_back() {
                    self.input.truncate(start);
                }
                PromptOutcome::Pending
            }
            Key::Char(c) if !c.is_control() => {
                self.input.push(c);
                PromptOutcome::Pending
            }
            _ => PromptOutcome::Pending,
        }
    }
}
