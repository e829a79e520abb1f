use std::fs;
use std::process::Command;
use tempfile::TempDir;
use vedit::config::Config;
use vedit::editor::Editor;
use vedit::error::EditorError;
use vedit::filestore::{FileStore, StdFileStore};

#[test]
fn test_open_missing_file_fails_with_not_found() {
    let dir = TempDir::new().unwrap();
    let result = Editor::open(
        StdFileStore::new(),
        &Config::default(),
        dir.path().join("missing.txt"),
    );
    assert!(matches!(result, Err(EditorError::NotFound { .. })));
}

#[test]
fn test_binary_exits_with_code_one_for_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.txt");

    let output = Command::new(env!("CARGO_BIN_EXE_vedit"))
        .arg(&missing)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no such file"), "{stderr}");
}

#[test]
fn test_binary_rejects_bad_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{ "editor": { "colour": "red" } }"#).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_vedit"))
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load config"), "{stderr}");
}

#[test]
fn test_load_save_roundtrip_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keep.txt");
    let original = "tabs\there\r\nand \u{1F600} emoji\r\n";
    fs::write(&path, original).unwrap();

    let editor = Editor::open(StdFileStore::new(), &Config::default(), &path).unwrap();
    StdFileStore::new()
        .save(&path, editor.document().buffer())
        .unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}
