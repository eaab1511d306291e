//! Archive adapter (C3): tree-structured console savedata, keyed by
//! `(title_id, media_kind)`. See §4.3.
//!
//! On real hardware this reads through the platform's save-archive API
//! (open archive → walk directories → commit). [`FsArchiveAdapter`] plays
//! that same role against a plain directory tree on host storage, so the
//! reconciliation and executor layers can be exercised without real
//! console filesystem access.

use std::fs;
use std::path::{Path, PathBuf};

use savesync_core::{title_id_hex, ArchiveFile, MediaKind, PathError};

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("failed to open archive for title {title_id_hex}/{media_kind}: {source}")]
    Open {
        title_id_hex: String,
        media_kind: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to commit archive: {source}")]
    Commit {
        #[source]
        source: std::io::Error,
    },

    #[error("bad path in archive: {0}")]
    Path(#[from] PathError),
}

/// Opens and walks a per-title save archive. One adapter instance serves
/// every title on a given media source.
pub trait ArchiveAdapter {
    /// Recursively reads every regular file under the archive root for
    /// `(title_id, media_kind)`. Returned paths are slash-separated, carry
    /// no leading slash, and are in a deterministic order (directory
    /// traversal order, sorted per directory).
    fn read(&self, title_id: u64, media_kind: MediaKind) -> Result<Vec<ArchiveFile>, ArchiveError>;

    /// Erases all existing archive contents, writes `files`, then commits.
    /// If a write fails partway through, the archive is left in whatever
    /// state the partial writes produced — no rollback is attempted
    /// (§4.3).
    fn write(
        &self,
        title_id: u64,
        media_kind: MediaKind,
        files: &[ArchiveFile],
    ) -> Result<(), ArchiveError>;
}

/// A host-filesystem-backed [`ArchiveAdapter`]. Each `(title_id,
/// media_kind)` pair gets its own subdirectory under `root`.
pub struct FsArchiveAdapter {
    root: PathBuf,
}

impl FsArchiveAdapter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn archive_dir(&self, title_id: u64, media_kind: MediaKind) -> PathBuf {
        self.root.join(format!("{}_{}", title_id_hex(title_id), media_kind.name()))
    }
}

impl ArchiveAdapter for FsArchiveAdapter {
    fn read(&self, title_id: u64, media_kind: MediaKind) -> Result<Vec<ArchiveFile>, ArchiveError> {
        let dir = self.archive_dir(title_id, media_kind);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        read_dir_recursive(&dir, &dir, &mut files)?;
        Ok(files)
    }

    fn write(
        &self,
        title_id: u64,
        media_kind: MediaKind,
        files: &[ArchiveFile],
    ) -> Result<(), ArchiveError> {
        let dir = self.archive_dir(title_id, media_kind);

        if dir.exists() {
            fs::remove_dir_all(&dir).map_err(|source| ArchiveError::Open {
                title_id_hex: title_id_hex(title_id),
                media_kind: media_kind.name(),
                source,
            })?;
        }
        fs::create_dir_all(&dir).map_err(|source| ArchiveError::Open {
            title_id_hex: title_id_hex(title_id),
            media_kind: media_kind.name(),
            source,
        })?;

        for file in files {
            let full_path = dir.join(&file.path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent).map_err(|source| ArchiveError::Write {
                    path: file.path.clone(),
                    source,
                })?;
            }
            fs::write(&full_path, &file.data).map_err(|source| ArchiveError::Write {
                path: file.path.clone(),
                source,
            })?;
        }

        commit(&dir).map_err(|source| ArchiveError::Commit { source })?;
        Ok(())
    }
}

/// Flush directory entries to durable storage. Stands in for the
/// platform's `ARCHIVE_ACTION_COMMIT_SAVE_DATA` — skipping it silently
/// discards writes that have not yet reached disk.
fn commit(dir: &Path) -> std::io::Result<()> {
    let handle = fs::File::open(dir)?;
    handle.sync_all()
}

fn read_dir_recursive(
    root: &Path,
    dir: &Path,
    out: &mut Vec<ArchiveFile>,
) -> Result<(), ArchiveError> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .map_err(|source| ArchiveError::Read {
            path: dir.display().to_string(),
            source,
        })?
        .filter_map(|e| e.ok())
        .collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            read_dir_recursive(root, &path, out)?;
        } else if path.is_file() {
            let data = fs::read(&path).map_err(|source| ArchiveError::Read {
                path: path.display().to_string(),
                source,
            })?;
            let rel = path
                .strip_prefix(root)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/");
            out.push(ArchiveFile::new(rel, data)?);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/archive_tests.rs"]
mod tests;
