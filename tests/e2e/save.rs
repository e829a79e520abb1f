use crate::common::harness::EditorTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use std::path::Path;
use vedit::config::Config;
use vedit::editor::Flow;
use vedit::filestore::MemoryFileStore;
use vedit::input::Key;

#[test]
fn test_ctrl_s_saves_and_clears_dirty() {
    let store = MemoryFileStore::new().with_file("a.txt", "one\ntwo\n");
    let mut harness = EditorTestHarness::open(store, &Config::default(), "a.txt", 40, 6).unwrap();

    harness.type_text("jA").unwrap();
    harness.press(Key::Escape).unwrap();
    harness.type_text("i2").unwrap();
    assert!(harness.editor().document().is_dirty());
    assert!(harness.status_row().contains("[+]"));

    harness.send_key(KeyCode::Char('s'), KeyModifiers::CONTROL).unwrap();

    assert!(!harness.editor().document().is_dirty());
    let saved = harness.editor().store().contents(Path::new("a.txt")).unwrap();
    assert_eq!(saved, b"one\n2two\n");
    assert!(!harness.status_row().contains("[+]"));
    assert!(harness.status_row().contains("written"));
}

#[test]
fn test_unnamed_document_prompts_for_file_name() {
    let mut harness = EditorTestHarness::new(40, 6).unwrap();
    harness.type_text("ihello").unwrap();

    let flow = harness.send_key(KeyCode::Char('s'), KeyModifiers::CONTROL).unwrap();
    assert_eq!(flow, Flow::NeedFileName);
    assert!(harness.prompt_active());
    assert_eq!(harness.status_row(), "Save as:");

    harness.type_text("out.txt").unwrap();
    harness.press(Key::Enter).unwrap();

    assert!(!harness.prompt_active());
    assert!(!harness.editor().document().is_dirty());
    assert_eq!(
        harness.editor().store().contents(Path::new("out.txt")).unwrap(),
        b"hello"
    );
    assert!(harness.status_row().contains("out.txt"));
}

#[test]
fn test_cancelled_prompt_keeps_document_dirty() {
    let mut harness = EditorTestHarness::new(60, 6).unwrap();
    harness.type_text("ix").unwrap();
    harness.press(Key::Save).unwrap();

    harness.type_text("name").unwrap();
    harness.press(Key::Escape).unwrap();

    assert!(!harness.prompt_active());
    assert!(harness.editor().document().is_dirty());
    assert!(harness.editor().document().path().is_none());
    assert!(harness.status_row().contains("Save cancelled"));
}

#[test]
fn test_save_failure_is_reported() {
    let store = MemoryFileStore::new().with_file("ro.txt", "abc");
    store.set_read_only("ro.txt", true);
    let mut harness = EditorTestHarness::open(store, &Config::default(), "ro.txt", 60, 6).unwrap();

    harness.type_text("ix").unwrap();
    harness.press(Key::Save).unwrap();

    assert!(harness.editor().document().is_dirty());
    assert!(harness.status_row().contains("permission denied"));
    assert_eq!(
        harness.editor().store().contents(Path::new("ro.txt")).unwrap(),
        b"abc"
    );
}

#[test]
fn test_crlf_file_keeps_line_endings() {
    let store = MemoryFileStore::new().with_file("dos.txt", "a\r\nb\r\n");
    let mut harness = EditorTestHarness::open(store, &Config::default(), "dos.txt", 40, 6).unwrap();

    harness.type_text("i").unwrap();
    harness.press(Key::Enter).unwrap();
    harness.press(Key::Save).unwrap();

    assert_eq!(
        harness.editor().store().contents(Path::new("dos.txt")).unwrap(),
        b"\r\na\r\nb\r\n"
    );
}
