//! `SyncDecision` (§3): a snapshot of one title's reconciliation inputs
//! and outcome, used for the status/confirm-dialog surface rather than
//! the batch path (the batch path trusts the server's own plan, §4.9).

use savesync_http::SaveMeta;

use crate::decide::{decide, SyncAction};

#[derive(Debug, Clone)]
pub struct SyncDecision {
    pub action: SyncAction,
    pub server_hash: Option<String>,
    pub server_timestamp: Option<String>,
    pub server_size: Option<u32>,
    pub has_last_synced: bool,
    pub last_synced_hash: Option<String>,
    pub local_mtime: Option<u64>,
}

/// Builds a [`SyncDecision`] from already-fetched inputs — no I/O here,
/// callers fetch `meta`/`last_synced_hash` themselves (status command,
/// push-warning check).
pub fn build_decision(
    local_hash: Option<&str>,
    local_mtime: Option<u64>,
    meta: Option<&SaveMeta>,
    last_synced_hash: Option<&str>,
) -> SyncDecision {
    let server_hash = meta.map(|m| m.save_hash.clone());
    let action = decide(local_hash, server_hash.as_deref(), last_synced_hash, local_mtime, None);

    SyncDecision {
        action,
        server_hash,
        server_timestamp: meta.map(|m| m.last_sync.clone()),
        server_size: meta.map(|m| m.save_size),
        has_last_synced: last_synced_hash.is_some(),
        last_synced_hash: last_synced_hash.map(str::to_string),
        local_mtime,
    }
}

/// A diagnostics snapshot of one title's local/server state, for the
/// status display and push confirm-dialog (§3's `SaveDetails`). Unlike
/// [`SyncDecision`], this carries the raw counts/sizes on both sides
/// rather than just the reconciliation outcome.
#[derive(Debug, Clone)]
pub struct SaveDetails {
    pub has_local_save: bool,
    pub local_file_count: usize,
    pub local_size: u32,
    pub local_hash: Option<String>,

    pub has_server_save: bool,
    pub server_file_count: Option<u32>,
    pub server_size: Option<u32>,
    pub server_hash: Option<String>,
    pub server_last_sync: Option<String>,
    pub server_console_id: Option<String>,

    pub last_synced_hash: Option<String>,

    /// True when the local and server hashes are both present and equal.
    pub is_synced: bool,
}

/// Builds a [`SaveDetails`] snapshot from already-fetched local files and
/// an optional server [`SaveMeta`] (absent when the title has no save on
/// the server yet, e.g. a 404 from `/saves/{id}/meta`).
pub fn build_details(
    local_files: &[savesync_core::ArchiveFile],
    meta: Option<&SaveMeta>,
    last_synced_hash: Option<&str>,
) -> SaveDetails {
    let has_local_save = !local_files.is_empty();
    let local_size: u32 = local_files.iter().map(|f| f.size()).sum();
    let local_hash = has_local_save.then(|| savesync_core::save_hash(local_files));

    let is_synced = match (&local_hash, meta) {
        (Some(l), Some(m)) => *l == m.save_hash,
        _ => false,
    };

    SaveDetails {
        has_local_save,
        local_file_count: local_files.len(),
        local_size,
        local_hash,
        has_server_save: meta.is_some(),
        server_file_count: meta.map(|m| m.file_count),
        server_size: meta.map(|m| m.save_size),
        server_hash: meta.map(|m| m.save_hash.clone()),
        server_last_sync: meta.map(|m| m.last_sync.clone()),
        server_console_id: meta.map(|m| m.console_id.clone()),
        last_synced_hash: last_synced_hash.map(str::to_string),
        is_synced,
    }
}

#[cfg(test)]
#[path = "tests/decision_tests.rs"]
mod tests;
