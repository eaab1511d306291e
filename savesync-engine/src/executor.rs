//! Sync executor (C9): the orchestrator. See §4.9. Batch ordering
//! (hash-all, build metadata, POST `/sync`, upload-then-download, record
//! last-synced on success) and the progress-callback shape are both
//! simplified per §9 to a single message string.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use savesync_core::{bundle, save_hash, ArchiveFile, MediaKind, Title};
use savesync_http::{SyncApiClient, SyncRequest, SyncTitleEntry};
use savesync_state::SyncStateStore;

use crate::medium::{MediaRouter, MediumError};

#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error(transparent)]
    Medium(#[from] MediumError),

    #[error(transparent)]
    Bundle(#[from] bundle::BundleError),

    #[error(transparent)]
    Http(#[from] savesync_http::SyncHttpError),

    #[error(transparent)]
    State(#[from] savesync_state::SyncStateError),
}

/// A progress checkpoint. Single-threaded cooperative notification per
/// §9 — never blocks, never returns a value.
pub type ProgressCb<'a> = &'a dyn Fn(&str);

fn now_secs() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(0)
}

/// Always uploads, unconditionally, relying on the server to reject stale
/// data (§9's first Open Question). Callers that want the staleness
/// warning must call [`crate::decision::build_decision`] themselves first
/// — this function does not consult it.
pub fn sync_title_upload(
    title: &Title,
    medium: &MediaRouter,
    http: &dyn SyncApiClient,
    state: &dyn SyncStateStore,
    progress: ProgressCb,
) -> Result<(), ExecutorError> {
    progress(&format!("Reading save: {}", title.title_id_hex()));
    let files = medium.read(title)?;
    let hash = save_hash(&files);

    progress(&format!(
        "Uploading: {} ({} files)",
        title.title_id_hex(),
        files.len()
    ));
    let bundle_bytes = bundle::encode(title.title_id, now_secs(), &files);
    http.upload_save(&title.title_id_hex(), &bundle_bytes)?;

    state.save(title.title_id, &hash)?;
    Ok(())
}

fn download_title(
    title: &Title,
    medium: &MediaRouter,
    http: &dyn SyncApiClient,
    state: &dyn SyncStateStore,
    progress: ProgressCb,
) -> Result<(), ExecutorError> {
    progress(&format!("Downloading: {}", title.title_id_hex()));
    let bundle_bytes = http.fetch_save(&title.title_id_hex())?;
    let decoded = bundle::decode(&bundle_bytes)?;
    let hash = save_hash(&decoded.files);

    progress(&format!(
        "Writing save: {} ({} files)",
        title.title_id_hex(),
        decoded.files.len()
    ));
    medium.write(title, &decoded.files)?;

    state.save(title.title_id, &hash)?;
    Ok(())
}

/// Per-title outcome recorded during a batch run, used both to drive
/// step 5 execution and to populate the final summary.
struct CachedLocal {
    files: Vec<ArchiveFile>,
    hash: String,
    has_local: bool,
    total_size: u32,
}

/// Counts and conflict IDs reported back to the UI after a batch run
/// (§4.9 step 6). `conflict_title_ids` is capped to avoid an unbounded
/// list on a badly-diverged library.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub uploaded: usize,
    pub downloaded: usize,
    pub up_to_date: usize,
    pub conflict: usize,
    pub failed: usize,
    pub skipped: usize,
    pub conflict_title_ids: Vec<String>,
}

const MAX_REPORTED_CONFLICTS: usize = 20;

/// Runs the full batch protocol (§4.9 steps 1-6) over `titles`.
///
/// Titles on raw-SPI cartridges are excluded from the automatic batch —
/// they are counted as `skipped` and never touch the network.
pub fn batch_sync(
    titles: &[Title],
    console_id: &str,
    medium: &MediaRouter,
    http: &dyn SyncApiClient,
    state: &dyn SyncStateStore,
    progress: ProgressCb,
) -> Result<BatchSummary, ExecutorError> {
    let mut summary = BatchSummary::default();

    let (syncable, raw_spi): (Vec<&Title>, Vec<&Title>) = titles
        .iter()
        .partition(|t| t.media_kind != MediaKind::CartridgeRawSpi);
    summary.skipped += raw_spi.len();

    progress("Preparing sync metadata...");

    // Step 1: read + hash every title once, caching both for step 5.
    let mut cache: HashMap<u64, CachedLocal> = HashMap::with_capacity(syncable.len());
    let mut entries = Vec::with_capacity(syncable.len());

    for (i, title) in syncable.iter().enumerate() {
        progress(&format!(
            "Hashing save {}/{}: {}",
            i + 1,
            syncable.len(),
            title.title_id_hex()
        ));

        let files = medium.read(title)?;
        let total_size: u32 = files.iter().map(|f| f.size()).sum();
        let hash = save_hash(&files);
        let has_local = !files.is_empty();

        let last_synced_hash = state.load(title.title_id);

        entries.push(SyncTitleEntry {
            title_id: title.title_id_hex(),
            save_hash: hash.clone(),
            timestamp: now_secs(),
            size: total_size,
            last_synced_hash,
        });

        cache.insert(
            title.title_id,
            CachedLocal {
                files,
                hash,
                has_local,
                total_size,
            },
        );
    }

    // Step 2-3: submit the batch and get back the server's plan.
    progress("Sending sync request...");
    let request = SyncRequest {
        console_id: console_id.to_string(),
        titles: entries,
    };
    let mut plan = http.post_sync(&request)?;

    // Step 4: auto-resolve CONFLICT-with-no-local-save to DOWNLOAD.
    let mut still_conflict = Vec::with_capacity(plan.conflict.len());
    for id_hex in plan.conflict.drain(..) {
        let has_local = find_title(&syncable, &id_hex)
            .and_then(|t| cache.get(&t.title_id))
            .map(|c| c.has_local)
            .unwrap_or(false);
        if has_local {
            still_conflict.push(id_hex);
        } else {
            plan.download.push(id_hex);
        }
    }
    plan.conflict = still_conflict;

    summary.up_to_date += plan.up_to_date.len();
    summary.conflict += plan.conflict.len();
    summary.conflict_title_ids = plan
        .conflict
        .iter()
        .take(MAX_REPORTED_CONFLICTS)
        .cloned()
        .collect();

    // Step 5: uploads complete before downloads begin (§5).
    for (i, id_hex) in plan.upload.iter().enumerate() {
        progress(&format!("Uploading {}/{}: {id_hex}", i + 1, plan.upload.len()));
        let Some(title) = find_title(&syncable, id_hex) else {
            summary.failed += 1;
            continue;
        };
        let Some(cached) = cache.remove(&title.title_id) else {
            summary.failed += 1;
            continue;
        };
        match upload_cached(title, &cached, http, state) {
            Ok(()) => summary.uploaded += 1,
            Err(e) => {
                log::warn!("upload of {id_hex} failed: {e}");
                summary.failed += 1;
            }
        }
    }

    for (i, id_hex) in plan.download.iter().enumerate() {
        progress(&format!("Downloading {}/{}: {id_hex}", i + 1, plan.download.len()));
        let Some(title) = find_title(&syncable, id_hex) else {
            summary.failed += 1;
            continue;
        };
        match download_title(title, medium, http, state, progress) {
            Ok(()) => summary.downloaded += 1,
            Err(e) => {
                log::warn!("download of {id_hex} failed: {e}");
                summary.failed += 1;
            }
        }
    }

    // `server_only` ids name titles the server has that this console may
    // simply not have installed — download only when a local title
    // exists, and skip silently (not a failure) otherwise (§4.9 step 5).
    for (i, id_hex) in plan.server_only.iter().enumerate() {
        let Some(title) = find_title(&syncable, id_hex) else {
            continue;
        };
        progress(&format!(
            "Downloading {}/{}: {id_hex}",
            i + 1,
            plan.server_only.len()
        ));
        match download_title(title, medium, http, state, progress) {
            Ok(()) => summary.downloaded += 1,
            Err(e) => {
                log::warn!("download of {id_hex} failed: {e}");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

fn find_title<'a>(titles: &[&'a Title], title_id_hex: &str) -> Option<&'a Title> {
    titles
        .iter()
        .find(|t| t.title_id_hex() == title_id_hex)
        .copied()
}

fn upload_cached(
    title: &Title,
    cached: &CachedLocal,
    http: &dyn SyncApiClient,
    state: &dyn SyncStateStore,
) -> Result<(), ExecutorError> {
    let bundle_bytes = bundle::encode(title.title_id, now_secs(), &cached.files);
    http.upload_save(&title.title_id_hex(), &bundle_bytes)?;
    state.save(title.title_id, &cached.hash)?;
    let _ = cached.total_size;
    Ok(())
}

#[cfg(test)]
#[path = "tests/executor_tests.rs"]
mod tests;
