//! Reconciliation engine (C8): a pure function over three hashes. See
//! §4.8 and the decision table there verbatim.

/// The outcome of reconciling one title's local, server, and last-synced
/// hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    UpToDate,
    Upload,
    Download,
    Conflict,
}

/// Decide what to do for a title given its three hashes and (when no
/// last-synced hash is recorded) the two sides' modification times.
///
/// Pure: depends only on its arguments (§8 invariant 5 — equal
/// arguments always produce an equal action).
pub fn decide(
    local_hash: Option<&str>,
    server_hash: Option<&str>,
    last_synced_hash: Option<&str>,
    local_mtime: Option<u64>,
    server_mtime: Option<u64>,
) -> SyncAction {
    match (local_hash, server_hash) {
        (None, None) => SyncAction::UpToDate,
        (Some(_), None) => SyncAction::Upload,
        (None, Some(_)) => SyncAction::Download,
        (Some(local), Some(server)) => {
            if local == server {
                return SyncAction::UpToDate;
            }
            match last_synced_hash {
                Some(last) if last == server => SyncAction::Upload,
                Some(last) if last == local => SyncAction::Download,
                None => match (local_mtime, server_mtime) {
                    (Some(l), Some(s)) if l > s => SyncAction::Upload,
                    (Some(l), Some(s)) if s > l => SyncAction::Download,
                    (Some(_), Some(_)) => SyncAction::Conflict, // tie
                    _ => SyncAction::Conflict,
                },
                Some(_) => SyncAction::Conflict, // all three distinct
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/decide_tests.rs"]
mod tests;
