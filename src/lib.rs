// Modal text editing core - exposes all modules for the binary and for testing

pub mod buffer;
pub mod chunk_tree;
pub mod config;
pub mod controller;
pub mod cursor;
pub mod document;
pub mod editor;
pub mod error;
pub mod filestore;
pub mod input;
pub mod mode;
pub mod motion;
pub mod prompt;

#[cfg(feature = "runtime")]
pub mod logs;
#[cfg(feature = "runtime")]
pub mod view;

// Re-export commonly used types
pub use buffer::{LineEnding, Position, TextBuffer};
pub use config::Config;
pub use controller::{action_for, Action, Effect, ModeController, Transition};
pub use cursor::Cursor;
pub use document::{Document, DocumentView};
pub use editor::{Editor, Flow};
pub use error::{EditorError, Result};
pub use filestore::{FileStore, LoadedText, MemoryFileStore, StdFileStore};
pub use input::Key;
pub use mode::Mode;
pub use motion::{apply_motion, Motion};
