//! Host-side collaborators this binary supplies to the core crates: a
//! directory-backed stand-in for the platform's title-listing API, a
//! names-resolver wired to the HTTP client, and (when a device path is
//! given) a raw-SPI bridge over a transparent serial passthrough.
//!
//! None of this lives in `savesync-titles`/`savesync-engine` themselves —
//! those crates only define the traits (`TreeArchiveListing`,
//! `CartridgeProbe`, `RawSpiSaveIo`) because the real collaborators are
//! platform-specific, out-of-scope pieces (§1).

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use savesync_core::{title_id_from_hex, title_id_hex, ArchiveFile, MediaKind};
use savesync_engine::{MediumError, RawSpiSaveIo};
use savesync_http::SyncApiClient;
use savesync_spi::{read_save_as, write_save, SaveType, SpiError, SpiTransport};
use savesync_titles::{CartridgeProbe, TitleError, TreeArchiveListing};

/// Mirrors `FsArchiveAdapter`'s own directory naming
/// (`{TITLE_ID_HEX}_{media_kind}`) so the title lister and the archive
/// adapter agree on one on-disk layout without a second source of truth.
pub(crate) struct DirTreeListing {
    root: PathBuf,
}

impl DirTreeListing {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn dir_for(&self, title_id: u64, media_kind: MediaKind) -> PathBuf {
        self.root
            .join(format!("{}_{}", title_id_hex(title_id), media_kind.name()))
    }

    fn product_code_path(&self, title_id: u64, media_kind: MediaKind) -> PathBuf {
        self.dir_for(title_id, media_kind).join("product_code.txt")
    }
}

impl TreeArchiveListing for DirTreeListing {
    fn list_title_ids(&self, media_kind: MediaKind) -> Result<Vec<u64>, TitleError> {
        let suffix = format!("_{}", media_kind.name());
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(TitleError::Io {
                    path: self.root.display().to_string(),
                    source,
                })
            }
        };

        let mut ids = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let Some(hex) = name.strip_suffix(&suffix) else {
                continue;
            };
            if let Some(id) = title_id_from_hex(hex) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    fn product_code(&self, title_id: u64, media_kind: MediaKind) -> Option<[u8; 4]> {
        let contents = std::fs::read_to_string(self.product_code_path(title_id, media_kind)).ok()?;
        let trimmed = contents.trim();
        if trimmed.len() != 4 {
            return None;
        }
        let mut code = [0u8; 4];
        code.copy_from_slice(trimmed.as_bytes());
        Some(code)
    }

    fn has_non_empty_save(&self, title_id: u64, media_kind: MediaKind) -> bool {
        let dir = self.dir_for(title_id, media_kind);
        std::fs::read_dir(&dir)
            .map(|mut entries| entries.any(|e| e.is_ok()))
            .unwrap_or(false)
    }
}

/// Reads a host-side dump file standing in for "a foreign-family
/// cartridge is currently inserted" — this build has no live SPI bus, so
/// raw-SPI enumeration/push/pull works against a previously-dumped image
/// rather than hardware (see `SerialSpiTransport` below for the live-bus
/// path when a device is configured).
pub(crate) struct InsertedImageProbe {
    image_path: PathBuf,
}

impl InsertedImageProbe {
    pub(crate) fn new(image_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
        }
    }
}

impl CartridgeProbe for InsertedImageProbe {
    fn inserted_header(&self) -> Result<Option<Vec<u8>>, TitleError> {
        if !self.image_path.exists() {
            return Ok(None);
        }
        let data = std::fs::read(&self.image_path).map_err(|source| TitleError::Io {
            path: self.image_path.display().to_string(),
            source,
        })?;
        Ok(Some(data))
    }
}

/// A transparent SPI-over-serial device: writes `cmd` then `write_data`,
/// reads back `read_len` bytes. Matches exactly what `SpiTransport::transact`
/// already specifies — no additional framing is invented on top of it.
pub(crate) struct SerialSpiTransport {
    file: File,
}

impl SerialSpiTransport {
    pub(crate) fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Self { file })
    }
}

impl SpiTransport for SerialSpiTransport {
    fn transact(&mut self, cmd: &[u8], write_data: &[u8], read_len: usize) -> Result<Vec<u8>, SpiError> {
        self.file
            .write_all(cmd)
            .map_err(|e| SpiError(e.to_string()))?;
        if !write_data.is_empty() {
            self.file
                .write_all(write_data)
                .map_err(|e| SpiError(e.to_string()))?;
        }
        if read_len == 0 {
            return Ok(Vec::new());
        }
        let mut buf = vec![0u8; read_len];
        self.file
            .read_exact(&mut buf)
            .map_err(|e| SpiError(e.to_string()))?;
        Ok(buf)
    }
}

const RAW_SPI_FILE_NAME: &str = "save.bin";

/// Bridges `savesync-engine`'s `RawSpiSaveIo` to `savesync-spi`'s
/// detect/read/write over a live transport. `RefCell` supplies the
/// interior mutability `SpiTransport::transact` needs behind the
/// `&self`-only `RawSpiSaveIo` trait.
pub(crate) struct SpiSaveIo {
    transport: RefCell<Box<dyn SpiTransport>>,
}

impl SpiSaveIo {
    pub(crate) fn new(transport: Box<dyn SpiTransport>) -> Self {
        Self {
            transport: RefCell::new(transport),
        }
    }

    fn detected(&self) -> Result<SaveType, MediumError> {
        let mut transport = self.transport.borrow_mut();
        savesync_spi::detect(&mut **transport)
            .map_err(|e| MediumError::SpiTransport(e.to_string()))?
            .ok_or_else(|| MediumError::SpiTransport("no save chip detected".to_string()))
    }
}

impl RawSpiSaveIo for SpiSaveIo {
    fn read(&self) -> Result<Vec<ArchiveFile>, MediumError> {
        let save_type = self.detected()?;
        let mut transport = self.transport.borrow_mut();
        let data = read_save_as(&mut **transport, save_type)
            .map_err(|e| MediumError::SpiTransport(e.to_string()))?;
        Ok(vec![ArchiveFile::new(RAW_SPI_FILE_NAME, data).expect("static path is valid")])
    }

    fn write(&self, files: &[ArchiveFile]) -> Result<(), MediumError> {
        let save_type = self.detected()?;
        let file = files
            .first()
            .ok_or_else(|| MediumError::SpiTransport("no file to write".to_string()))?;
        let mut transport = self.transport.borrow_mut();
        write_save(&mut **transport, save_type, &file.data)
            .map_err(|e| MediumError::SpiTransport(e.to_string()))
    }
}

/// Resolves product codes to display names via the configured HTTP client.
pub(crate) struct HttpNamesResolver<'a> {
    pub(crate) http: &'a dyn SyncApiClient,
}

impl savesync_titles::NamesResolver for HttpNamesResolver<'_> {
    fn resolve(&self, codes: &[String]) -> HashMap<String, String> {
        self.http
            .resolve_names(codes)
            .map(|r| r.names)
            .unwrap_or_default()
    }
}
