use crate::common::harness::EditorTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use vedit::config::Config;
use vedit::editor::{Editor, Flow};
use vedit::filestore::MemoryFileStore;
use vedit::input::Key;

#[test]
fn test_ctrl_q_quits_clean_document() {
    let mut harness = EditorTestHarness::new(40, 6).unwrap();
    let flow = harness.send_key(KeyCode::Char('q'), KeyModifiers::CONTROL).unwrap();
    assert_eq!(flow, Flow::Quit);
}

#[test]
fn test_ctrl_c_quits_from_insert_mode() {
    let mut harness = EditorTestHarness::new(40, 6).unwrap();
    harness.press(Key::Char('i')).unwrap();
    let flow = harness.send_key(KeyCode::Char('c'), KeyModifiers::CONTROL).unwrap();
    assert_eq!(flow, Flow::Quit);
}

#[test]
fn test_dirty_document_needs_second_quit() {
    let mut harness = EditorTestHarness::new(60, 6).unwrap();
    harness.type_text("ix").unwrap();

    assert_eq!(harness.press(Key::Quit).unwrap(), Flow::Continue);
    assert!(harness.status_row().contains("Unsaved changes"));
    assert_eq!(harness.press(Key::Quit).unwrap(), Flow::Quit);
}

#[test]
fn test_saving_allows_plain_quit() {
    let store = MemoryFileStore::new().with_file("a.txt", "");
    let mut harness = EditorTestHarness::open(store, &Config::default(), "a.txt", 40, 6).unwrap();
    harness.type_text("ix").unwrap();
    harness.press(Key::Save).unwrap();
    assert_eq!(harness.press(Key::Quit).unwrap(), Flow::Quit);
}

#[test]
fn test_confirmation_can_be_disabled() {
    let mut config = Config::default();
    config.editor.confirm_quit_when_dirty = false;
    let editor = Editor::new(MemoryFileStore::new(), &config);
    let mut harness = EditorTestHarness::with_editor(editor, 40, 6).unwrap();

    harness.type_text("ix").unwrap();
    assert_eq!(harness.press(Key::Quit).unwrap(), Flow::Quit);
}
