//! Loose-file adapter (C4): single-file saves on removable storage. See
//! §4.4.

use std::path::{Path, PathBuf};

use savesync_core::{ArchiveFile, PathError};

const SAVE_FILE_NAME: &str = "save.dat";

#[derive(Debug, thiserror::Error)]
pub enum LooseFileError {
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

    #[error("no files to write")]
    NoFiles,

    #[error("bad path: {0}")]
    Path(#[from] PathError),
}

/// Reads and writes a single save file at a fixed host path.
pub struct LooseFileAdapter {
    path: PathBuf,
}

impl LooseFileAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns `[{"save.dat", size, bytes}]`, or an empty list if the file
    /// does not exist yet.
    pub fn read(&self) -> Result<Vec<ArchiveFile>, LooseFileError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = std::fs::read(&self.path).map_err(|source| LooseFileError::Read {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(vec![ArchiveFile::new(SAVE_FILE_NAME, data)?])
    }

    /// Writes the first file's bytes, creating the parent directory if
    /// missing. Overwrites atomically at the file level: write to a
    /// sibling temp file, then rename over the destination.
    pub fn write(&self, files: &[ArchiveFile]) -> Result<(), LooseFileError> {
        let file = files.first().ok_or(LooseFileError::NoFiles)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| LooseFileError::Write {
                path: self.path.display().to_string(),
                source,
            })?;
        }

        let tmp_path = tmp_path_for(&self.path);
        std::fs::write(&tmp_path, &file.data).map_err(|source| LooseFileError::Write {
            path: tmp_path.display().to_string(),
            source,
        })?;
        std::fs::rename(&tmp_path, &self.path).map_err(|source| LooseFileError::Write {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(())
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "save.dat".into());
    name.push_str(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "tests/loose_tests.rs"]
mod tests;
