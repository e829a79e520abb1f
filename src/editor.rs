use crate::buffer::TextBuffer;
use crate::config::{Config, EditorConfig};
use crate::controller::{Effect, ModeController, Transition};
use crate::document::{Document, DocumentView};
use crate::error::{EditorError, Result};
use crate::filestore::FileStore;
use crate::input::Key;
use std::path::{Path, PathBuf};

/// What the event loop should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Save was requested but the document has no path; ask for one and call
    /// [`Editor::save_as`]
    NeedFileName,
    Quit,
}

/// One open document plus the store it is saved to.
///
/// The editor owns the [`Document`] and threads it through the
/// [`ModeController`] on every key, carrying out the save and quit effects
/// the controller reports.
pub struct Editor<S: FileStore> {
    store: S,
    config: EditorConfig,
    controller: ModeController,
    document: Document,
    status_message: Option<String>,
    /// A quit with unsaved changes was refused; the next quit goes through
    quit_armed: bool,
}

impl<S: FileStore> Editor<S> {
    /// Editor with an empty, unnamed document
    pub fn new(store: S, config: &Config) -> Self {
        let buffer = TextBuffer::with_line_ending(config.editor.default_line_ending);
        Self::with_document(store, config, Document::with_buffer(buffer, None))
    }

    /// Editor on the file at `path`. Load errors are returned as-is.
    pub fn open(store: S, config: &Config, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let loaded = store.load(&path)?;
        let mut buffer = loaded.buffer;
        if loaded.line_ending.is_none() {
            buffer.set_line_ending(config.editor.default_line_ending);
        }

        let lines = buffer.line_count();
        let document = Document::with_buffer(buffer, Some(path));
        let mut editor = Self::with_document(store, config, document);
        editor.status_message = Some(format!("\"{}\" {}L", editor.display_name(), lines));
        Ok(editor)
    }

    fn with_document(store: S, config: &Config, document: Document) -> Self {
        Self {
            store,
            config: config.editor.clone(),
            controller: ModeController::new(),
            document,
            status_message: None,
            quit_armed: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn view(&self) -> DocumentView<'_> {
        self.document.view()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Feed one key through the mode controller and carry out its effect
    pub fn handle_key(&mut self, key: Key) -> Flow {
        self.status_message = None;
        let quit_armed = std::mem::replace(&mut self.quit_armed, false);

        let document = std::mem::take(&mut self.document);
        let Transition { document, effect } = self.controller.handle(key, document);
        self.document = document;

        match effect {
            None => Flow::Continue,
            Some(Effect::Save) => match self.save() {
                Err(EditorError::MissingPath) => Flow::NeedFileName,
                Ok(()) | Err(_) => Flow::Continue,
            },
            Some(Effect::Quit) => self.request_quit(quit_armed),
        }
    }

    fn request_quit(&mut self, quit_armed: bool) -> Flow {
        if self.document.is_dirty() && self.config.confirm_quit_when_dirty && !quit_armed {
            tracing::debug!("quit refused, document has unsaved changes");
            self.quit_armed = true;
            self.status_message =
                Some("Unsaved changes; press quit again to discard them".to_string());
            return Flow::Continue;
        }
        tracing::info!(dirty = self.document.is_dirty(), "quit");
        Flow::Quit
    }

    /// Save to the document's path. Fails with [`EditorError::MissingPath`]
    /// when it has none.
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.document.path().map(Path::to_path_buf) else {
            self.status_message = Some(EditorError::MissingPath.to_string());
            return Err(EditorError::MissingPath);
        };
        self.write_to(&path)
    }

    /// Save under a new path, which becomes the document's path on success
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        self.write_to(&path)?;
        self.document.set_path(path);
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> Result<()> {
        match self.store.save(path, self.document.buffer()) {
            Ok(()) => {
                self.document.mark_saved();
                self.status_message = Some(format!(
                    "\"{}\" {}L written",
                    path.display(),
                    self.document.buffer().line_count()
                ));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "save failed: {}", e);
                self.status_message = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn display_name(&self) -> String {
        self.document
            .file_name()
            .unwrap_or_else(|| "[No Name]".to_string())
    }
}
