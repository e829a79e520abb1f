//! Modal key handling.
//!
//! Key handling is split in two steps. [`action_for`] looks the key up in a
//! fixed `(Mode, Key) -> Action` table, and [`ModeController::handle`] applies
//! the action to a [`Document`]. Neither step touches the filesystem: saving
//! and quitting come back to the caller as an [`Effect`].

use crate::document::Document;
use crate::input::Key;
use crate::mode::Mode;
use crate::motion::Motion;

/// What a key does in a given mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Motion),
    /// `i`: Insert mode, cursor where it is
    EnterInsert,
    /// `a`: Insert mode, one column to the right
    Append,
    /// Escape in Insert mode
    ExitInsert,
    InsertChar(char),
    InsertNewline,
    DeleteBackward,
    Save,
    Quit,
    /// The key means nothing in this mode
    Ignore,
}

/// Side effects the controller asks its caller to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Save,
    Quit,
}

/// Result of feeding one key to the controller
#[derive(Debug, Clone)]
pub struct Transition {
    pub document: Document,
    pub effect: Option<Effect>,
}

/// Look up the action bound to `key` in `mode`.
pub fn action_for(mode: Mode, key: Key) -> Action {
    match (mode, key) {
        (_, Key::Save) => Action::Save,
        (_, Key::Quit) => Action::Quit,

        (_, Key::Left) => Action::Move(Motion::Left),
        (_, Key::Right) => Action::Move(Motion::Right),
        (_, Key::Up) => Action::Move(Motion::Up),
        (_, Key::Down) => Action::Move(Motion::Down),
        (_, Key::Home) => Action::Move(Motion::LineStart),
        (_, Key::End) => Action::Move(Motion::LineEnd),

        (Mode::Normal, Key::Char('h')) => Action::Move(Motion::Left),
        (Mode::Normal, Key::Char('j')) => Action::Move(Motion::Down),
        (Mode::Normal, Key::Char('k')) => Action::Move(Motion::Up),
        (Mode::Normal, Key::Char('l')) => Action::Move(Motion::Right),
        (Mode::Normal, Key::Char('i')) => Action::EnterInsert,
        (Mode::Normal, Key::Char('a')) => Action::Append,
        (Mode::Normal, _) => Action::Ignore,

        (Mode::Insert, Key::Escape) => Action::ExitInsert,
        (Mode::Insert, Key::Enter) => Action::InsertNewline,
        (Mode::Insert, Key::Backspace) => Action::DeleteBackward,
        (Mode::Insert, Key::Char(c)) if c == '\t' || !c.is_control() => Action::InsertChar(c),
        (Mode::Insert, Key::Char(_)) => Action::Ignore,
    }
}

/// Stateless driver for the Normal/Insert state machine.
///
/// The current mode lives in the [`Document`], so the controller itself holds
/// nothing and every call is a pure function of its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeController;

impl ModeController {
    pub fn new() -> Self {
        Self
    }

    /// Feed one key through the table, returning the new document and any
    /// effect the caller has to carry out.
    pub fn handle(&self, key: Key, document: Document) -> Transition {
        let action = action_for(document.mode(), key);
        self.apply(action, document)
    }

    /// Apply an already resolved action.
    pub fn apply(&self, action: Action, mut document: Document) -> Transition {
        let mut effect = None;
        match action {
            Action::Move(motion) => document.move_cursor(motion),
            Action::EnterInsert => document.set_mode(Mode::Insert),
            Action::Append => {
                document.set_mode(Mode::Insert);
                document.move_cursor(Motion::Right);
            }
            Action::ExitInsert => document.set_mode(Mode::Normal),
            Action::InsertChar(c) => {
                let mut encoded = [0u8; 4];
                document.insert_at_cursor(c.encode_utf8(&mut encoded));
            }
            Action::InsertNewline => document.insert_at_cursor("\n"),
            Action::DeleteBackward => {
                document.delete_before_cursor();
            }
            Action::Save => effect = Some(Effect::Save),
            Action::Quit => effect = Some(Effect::Quit),
            Action::Ignore => {}
        }
        Transition { document, effect }
    }
}
