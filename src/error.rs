//! Error types shared by the editing core and the file store.

use std::io;
use std::path::{Path, PathBuf};

pub type Result<T, E = EditorError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// A line query outside `0..line_count`. Callers holding a valid cursor
    /// never trigger this.
    #[error("line {line} out of range (buffer has {line_count} lines)")]
    IndexOutOfRange { line: usize, line_count: usize },

    #[error("text is not valid UTF-8 (first invalid byte at offset {valid_up_to})")]
    Encoding { valid_up_to: usize },

    #[error("{}: no such file", .path.display())]
    NotFound { path: PathBuf },

    #[error("{}: permission denied", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no file name")]
    MissingPath,

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl EditorError {
    /// Classifies an I/O failure on `path` into the matching variant.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

impl From<std::str::Utf8Error> for EditorError {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::Encoding {
            valid_up_to: e.valid_up_to(),
        }
    }
}
