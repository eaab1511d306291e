use super::*;

#[test]
fn load_of_missing_title_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsSyncStateStore::new(dir.path());
    assert!(store.load(0x0004_0000_1234_5678).is_none());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsSyncStateStore::new(dir.path());
    let hash = "a".repeat(64);

    store.save(0x0004_0000_1234_5678, &hash).unwrap();
    assert_eq!(store.load(0x0004_0000_1234_5678), Some(hash));
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nested/state");
    let store = FsSyncStateStore::new(&root);

    store.save(1, &"b".repeat(64)).unwrap();
    assert!(root.join("0000000000000001.txt").exists());
}

#[test]
fn load_rejects_wrong_length_as_no_state() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("0000000000000001.txt"), "tooshort").unwrap();
    let store = FsSyncStateStore::new(dir.path());
    assert!(store.load(1).is_none());
}

#[test]
fn load_rejects_non_hex_content_as_no_state() {
    let dir = tempfile::tempdir().unwrap();
    let bad = "z".repeat(64);
    std::fs::write(dir.path().join("0000000000000001.txt"), bad).unwrap();
    let store = FsSyncStateStore::new(dir.path());
    assert!(store.load(1).is_none());
}

#[test]
fn filename_is_sixteen_char_uppercase_hex_title_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsSyncStateStore::new(dir.path());
    store.save(0x0004_0000_0001_0000, &"c".repeat(64)).unwrap();
    assert!(dir.path().join("0004000000010000.txt").exists());
}
