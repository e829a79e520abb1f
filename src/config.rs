use crate::buffer::LineEnding;
use crate::error::{EditorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Editor configuration, read from a JSON file.
///
/// Every field has a default, so `{}` is a valid configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub editor: EditorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Line ending for new documents and for files without any line break
    pub default_line_ending: LineEnding,

    /// Require a second quit key when the document has unsaved changes
    pub confirm_quit_when_dirty: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_line_ending: LineEnding::Lf,
            confirm_quit_when_dirty: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence
    pub filter: String,

    /// Log file; no logging when unset and none is given on the command line
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| EditorError::from_io(path, e))?;
        Self::from_json(path, &contents)
    }

    fn from_json(path: &Path, contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|source| EditorError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
