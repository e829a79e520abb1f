use crate::common::harness::EditorTestHarness;
use vedit::config::Config;
use vedit::filestore::MemoryFileStore;
use vedit::input::Key;

#[test]
fn test_status_line_shows_mode_name_and_dirty_flag() {
    let store = MemoryFileStore::new().with_file("notes.txt", "first\nsecond");
    let mut harness =
        EditorTestHarness::open(store, &Config::default(), "notes.txt", 50, 5).unwrap();

    assert_eq!(harness.screen_row(0), "first");
    assert_eq!(harness.screen_row(1), "second");
    assert!(harness.status_row().starts_with(" NORMAL  notes.txt  1:1"));

    harness.type_text("iX").unwrap();
    let status = harness.status_row();
    assert!(status.starts_with(" INSERT  notes.txt [+]  1:2"), "{status}");
    assert_eq!(harness.screen_row(0), "Xfirst");
}

#[test]
fn test_unnamed_document_status() {
    let harness = EditorTestHarness::new(40, 4).unwrap();
    assert!(harness.status_row().contains("[No Name]"));
}

#[test]
fn test_view_follows_cursor_down_long_file() {
    let text = (1..=30).map(|i| format!("row {i}")).collect::<Vec<_>>().join("\n");
    let store = MemoryFileStore::new().with_file("long.txt", text);
    let mut harness = EditorTestHarness::open(store, &Config::default(), "long.txt", 20, 5).unwrap();

    for _ in 0..10 {
        harness.press(Key::Char('j')).unwrap();
    }
    // four text rows, cursor on the last of them
    assert_eq!(harness.screen_row(3), "row 11");
    assert_eq!(harness.screen_row(0), "row 8");
}
