use crate::common::harness::EditorTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use vedit::config::Config;
use vedit::filestore::MemoryFileStore;
use vedit::input::Key;
use vedit::mode::Mode;

fn open(text: &str) -> EditorTestHarness {
    let store = MemoryFileStore::new().with_file("doc.txt", text);
    EditorTestHarness::open(store, &Config::default(), "doc.txt", 40, 10).unwrap()
}

/// `i`, type, Escape: the cursor steps back onto the last character
#[test]
fn test_insert_into_empty_document() {
    let mut harness = EditorTestHarness::new(40, 10).unwrap();

    harness.type_text("ihi").unwrap();
    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();

    harness.assert_buffer_content("hi");
    assert_eq!(harness.editor().document().mode(), Mode::Normal);
    assert_eq!(harness.cursor(), (0, 1));
}

#[test]
fn test_append_after_last_character() {
    let mut harness = open("hello");
    harness.type_text("llll").unwrap();
    assert_eq!(harness.cursor(), (0, 4));

    harness.type_text("a!").unwrap();
    harness.press(Key::Escape).unwrap();

    harness.assert_buffer_content("hello!");
    assert_eq!(harness.cursor(), (0, 5));
}

#[test]
fn test_enter_splits_line_in_insert_mode() {
    let mut harness = open("abc\ndef");
    harness.type_text("lli").unwrap();
    assert_eq!(harness.cursor(), (0, 2));

    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    harness.assert_buffer_content("ab\nc\ndef");
    assert_eq!(harness.cursor(), (1, 0));
}

#[test]
fn test_backspace_across_line_break() {
    let mut harness = open("foo\nbar");
    harness.type_text("ji").unwrap();

    harness.send_key(KeyCode::Backspace, KeyModifiers::NONE).unwrap();
    harness.assert_buffer_content("foobar");
    assert_eq!(harness.cursor(), (0, 3));

    harness.send_key(KeyCode::Backspace, KeyModifiers::NONE).unwrap();
    harness.assert_buffer_content("fobar");
    assert_eq!(harness.cursor(), (0, 2));
}

#[test]
fn test_hjkl_are_literal_in_insert_mode() {
    let mut harness = EditorTestHarness::new(40, 10).unwrap();
    harness.type_text("ihjkl").unwrap();
    harness.assert_buffer_content("hjkl");
}

#[test]
fn test_arrows_move_in_both_modes() {
    let mut harness = open("abc\nde");

    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor(), (0, 2));

    harness.send_key(KeyCode::Char('i'), KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Right, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor(), (0, 3));

    harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor(), (1, 2));

    harness.send_key(KeyCode::Home, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor(), (1, 0));
}

#[test]
fn test_escape_on_empty_line_keeps_column_zero() {
    let mut harness = open("abc\n\nxyz");
    harness.type_text("llja").unwrap();
    assert_eq!(harness.cursor(), (1, 0));
    harness.press(Key::Escape).unwrap();
    assert_eq!(harness.cursor(), (1, 0));
}

#[test]
fn test_combining_characters_are_one_column() {
    let mut harness = open("ne\u{301}e");
    harness.type_text("ll").unwrap();
    assert_eq!(harness.cursor(), (0, 2));

    harness.type_text("i").unwrap();
    harness.press(Key::Backspace).unwrap();
    harness.assert_buffer_content("ne");
}

#[test]
fn test_tab_inserts_tab() {
    let mut harness = EditorTestHarness::new(40, 10).unwrap();
    harness.press(Key::Char('i')).unwrap();
    harness.send_key(KeyCode::Tab, KeyModifiers::NONE).unwrap();
    harness.type_text("x").unwrap();
    harness.assert_buffer_content("\tx");
}
