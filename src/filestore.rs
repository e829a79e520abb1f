//! Loading and saving documents.
//!
//! [`FileStore`] is the only place the editor touches persistent storage.
//! [`StdFileStore`] works on the local disk and never leaves a half written
//! file behind: the new content goes to a temporary file in the same
//! directory, which is flushed and then renamed over the target.
//! [`MemoryFileStore`] keeps files in a map and is used by tests.

use crate::buffer::{LineEnding, TextBuffer};
use crate::error::{EditorError, Result};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Text read from storage
#[derive(Debug, Clone)]
pub struct LoadedText {
    pub buffer: TextBuffer,
    /// Line ending of the first line break, `None` when the text has none
    pub line_ending: Option<LineEnding>,
}

impl LoadedText {
    /// Decode raw file content; fails with [`EditorError::Encoding`] on invalid UTF-8
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self {
            buffer: TextBuffer::from_str(text),
            line_ending: LineEnding::detect(text),
        })
    }
}

pub trait FileStore {
    fn load(&self, path: &Path) -> Result<LoadedText>;

    /// Replace the content at `path` with the serialized buffer
    fn save(&self, path: &Path, buffer: &TextBuffer) -> Result<()>;
}

/// Disk-backed store using `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileStore;

impl StdFileStore {
    pub fn new() -> Self {
        Self
    }

    /// Temporary file next to `dest`, so the final rename stays on one filesystem
    fn unique_temp_path(dest: &Path) -> PathBuf {
        let dir = match dest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = dest
            .file_name()
            .map_or_else(|| "vedit-save".into(), |name| name.to_string_lossy());
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        dir.join(format!(
            ".{}-{}-{}.tmp",
            file_name,
            std::process::id(),
            timestamp
        ))
    }

    fn write_and_replace(dest: &Path, temp: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(temp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);

        if let Ok(metadata) = fs::metadata(dest) {
            fs::set_permissions(temp, metadata.permissions())?;
        }
        fs::rename(temp, dest)
    }
}

impl FileStore for StdFileStore {
    fn load(&self, path: &Path) -> Result<LoadedText> {
        let bytes = fs::read(path).map_err(|e| EditorError::from_io(path, e))?;
        let loaded = LoadedText::from_bytes(&bytes)?;
        tracing::info!(
            path = %path.display(),
            bytes = bytes.len(),
            lines = loaded.buffer.line_count(),
            "loaded file"
        );
        Ok(loaded)
    }

    fn save(&self, path: &Path, buffer: &TextBuffer) -> Result<()> {
        let bytes = buffer.to_bytes();
        let temp = Self::unique_temp_path(path);

        if let Err(e) = Self::write_and_replace(path, &temp, &bytes) {
            if let Err(cleanup) = fs::remove_file(&temp) {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(temp = %temp.display(), "failed to remove temp file: {}", cleanup);
                }
            }
            return Err(EditorError::from_io(path, e));
        }

        tracing::info!(path = %path.display(), bytes = bytes.len(), "saved file");
        Ok(())
    }
}

/// In-memory store
///
/// Paths marked read-only reject saves with [`EditorError::PermissionDenied`].
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    read_only: RefCell<HashSet<PathBuf>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.borrow_mut().insert(path.into(), contents.into());
        self
    }

    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    pub fn set_read_only(&self, path: impl Into<PathBuf>, read_only: bool) {
        let path = path.into();
        let mut set = self.read_only.borrow_mut();
        if read_only {
            set.insert(path);
        } else {
            set.remove(&path);
        }
    }
}

impl FileStore for MemoryFileStore {
    fn load(&self, path: &Path) -> Result<LoadedText> {
        let files = self.files.borrow();
        let bytes = files.get(path).ok_or_else(|| EditorError::NotFound {
            path: path.to_path_buf(),
        })?;
        LoadedText::from_bytes(bytes)
    }

    fn save(&self, path: &Path, buffer: &TextBuffer) -> Result<()> {
        if self.read_only.borrow().contains(path) {
            return Err(EditorError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), buffer.to_bytes());
        Ok(())
    }
}
