use mirror_fs::{Error, resolve_root};
use std::fs;
use tempfile::TempDir;

#[test]
fn resolve_root_creates_missing_directory() {
    let temp = TempDir::new().unwrap();
    let replica = temp.path().join("replica").join("nested");

    let resolved = resolve_root(&replica, true).unwrap();

    assert!(replica.is_dir());
    assert!(resolved.is_absolute());
    assert!(resolved.ends_with("replica/nested"));
}

#[test]
fn resolve_root_without_create_requires_existing_directory() {
    let temp = TempDir::new().unwrap();
    let err = resolve_root(&temp.path().join("source"), false).unwrap_err();
    assert!(matches!(err, Error::NotADirectory { .. }));
}

#[test]
fn resolve_root_rejects_files() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("file.txt");
    fs::write(&file, "x").unwrap();

    assert!(matches!(
        resolve_root(&file, true),
        Err(Error::NotADirectory { .. })
    ));
}

#[test]
fn resolve_root_is_stable_across_relative_components() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("src");
    fs::create_dir(&dir).unwrap();

    let direct = resolve_root(&dir, false).unwrap();
    let dotted = resolve_root(&dir.join(".").join("..").join("src"), false).unwrap();

    assert_eq!(direct, dotted);
}
