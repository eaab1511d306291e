use savesync_core::ArchiveFile;
use savesync_http::SaveMeta;

use super::*;
use crate::decide::SyncAction;

fn meta(hash: &str) -> SaveMeta {
    SaveMeta {
        save_hash: hash.to_string(),
        save_size: 42,
        file_count: 1,
        last_sync: "2026-01-01T00:00:00Z".to_string(),
        console_id: "AABBCCDDEEFF0011".to_string(),
    }
}

#[test]
fn no_server_meta_means_upload() {
    let d = build_decision(Some(&"a".repeat(64)), None, None, None);
    assert_eq!(d.action, SyncAction::Upload);
    assert!(d.server_hash.is_none());
}

#[test]
fn matching_hashes_are_up_to_date() {
    let h = "a".repeat(64);
    let d = build_decision(Some(&h), None, Some(&meta(&h)), None);
    assert_eq!(d.action, SyncAction::UpToDate);
}

#[test]
fn carries_through_server_metadata_fields() {
    let d = build_decision(None, None, Some(&meta(&"b".repeat(64))), None);
    assert_eq!(d.server_size, Some(42));
    assert_eq!(d.server_timestamp.as_deref(), Some("2026-01-01T00:00:00Z"));
    assert!(!d.has_last_synced);
}

#[test]
fn details_with_no_local_and_no_server() {
    let d = build_details(&[], None, None);
    assert!(!d.has_local_save);
    assert!(!d.has_server_save);
    assert!(!d.is_synced);
    assert_eq!(d.local_file_count, 0);
    assert_eq!(d.local_size, 0);
}

#[test]
fn details_is_synced_when_hashes_match() {
    let files = vec![ArchiveFile::new("save.dat", b"ABC".to_vec()).unwrap()];
    let h = savesync_core::save_hash(&files);
    let d = build_details(&files, Some(&meta(&h)), Some(&h));
    assert!(d.has_local_save);
    assert!(d.has_server_save);
    assert!(d.is_synced);
    assert_eq!(d.local_file_count, 1);
    assert_eq!(d.local_size, 3);
    assert_eq!(d.server_file_count, Some(1));
    assert_eq!(d.server_console_id.as_deref(), Some("AABBCCDDEEFF0011"));
}

#[test]
fn details_not_synced_when_hashes_differ() {
    let files = vec![ArchiveFile::new("save.dat", b"ABC".to_vec()).unwrap()];
    let d = build_details(&files, Some(&meta(&"b".repeat(64))), None);
    assert!(!d.is_synced);
}
