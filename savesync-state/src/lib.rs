//! Sync state store (C7): per-title "last-synced hash" persisted as one
//! `{TITLE_ID_HEX}.txt` file under a fixed root. See §4.7, §6.
//!
//! A malformed file is treated as "no last-synced state" rather than an
//! error, since a torn write here should self-heal on the next sync
//! rather than wedge the title permanently.

use std::path::PathBuf;

use savesync_core::title_id_hex;

#[derive(Debug, thiserror::Error)]
pub enum SyncStateError {
    #[error("failed to write state for {title_id_hex}: {source}")]
    Write {
        title_id_hex: String,
        #[source]
        source: std::io::Error,
    },
}

const HASH_LEN: usize = 64;

/// Stores and retrieves the last-synced save hash for each title.
pub trait SyncStateStore {
    fn load(&self, title_id: u64) -> Option<String>;
    fn save(&self, title_id: u64, hash: &str) -> Result<(), SyncStateError>;
}

/// Filesystem-backed [`SyncStateStore`]: one file per title under `root`.
/// Atomicity is not required (§4.7) — a partial write is simply not a
/// valid 64-hex-char file, so the next [`FsSyncStateStore::load`] reports
/// it as absent.
pub struct FsSyncStateStore {
    root: PathBuf,
}

impl FsSyncStateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, title_id: u64) -> PathBuf {
        self.root.join(format!("{}.txt", title_id_hex(title_id)))
    }
}

impl SyncStateStore for FsSyncStateStore {
    fn load(&self, title_id: u64) -> Option<String> {
        let contents = std::fs::read_to_string(self.path_for(title_id)).ok()?;
        parse_hash(&contents)
    }

    fn save(&self, title_id: u64, hash: &str) -> Result<(), SyncStateError> {
        let path = self.path_for(title_id);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SyncStateError::Write {
                title_id_hex: title_id_hex(title_id),
                source,
            })?;
        }
        std::fs::write(&path, hash).map_err(|source| SyncStateError::Write {
            title_id_hex: title_id_hex(title_id),
            source,
        })
    }
}

/// A file's contents are a valid last-synced hash only if they are exactly
/// 64 hex characters — trailing newline or anything else is treated as
/// corruption, not stripped (§4.7).
fn parse_hash(contents: &str) -> Option<String> {
    if contents.len() != HASH_LEN {
        return None;
    }
    if !contents.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Some(contents.to_string())
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
