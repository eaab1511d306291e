//! Duck-typed media adapters, unified behind one capability: `{read,
//! write}` per title (§9's "polymorphism over a capability set"). The
//! executor dispatches on `media_kind`; it never knows which concrete
//! adapter is underneath.

use savesync_core::{ArchiveFile, MediaKind, Title};
use savesync_media::{ArchiveAdapter, LooseFileAdapter};

#[derive(Debug, thiserror::Error)]
pub enum MediumError {
    #[error(transparent)]
    Archive(#[from] savesync_media::ArchiveError),

    #[error(transparent)]
    Loose(#[from] savesync_media::LooseFileError),

    #[error("loose-file title {0:016X} has no configured save path")]
    MissingLooseFilePath(u64),

    #[error("no raw-SPI adapter configured for title {0:016X}")]
    NoSpiAdapter(u64),

    #[error("raw-SPI transport failure: {0}")]
    SpiTransport(String),
}

/// Host collaborator for a raw-SPI cartridge title, bridging to
/// `savesync-spi`'s detection/read/write over whatever `SpiTransport` the
/// host provides. Kept at the engine boundary rather than a direct
/// `savesync-spi` dependency, since raw-SPI titles are excluded from the
/// automatic batch (§4.9) and only reachable through an explicit push/pull
/// the CLI wires up itself.
pub trait RawSpiSaveIo {
    fn read(&self) -> Result<Vec<ArchiveFile>, MediumError>;
    fn write(&self, files: &[ArchiveFile]) -> Result<(), MediumError>;
}

/// Reads/writes a title's save data through whichever adapter its
/// `media_kind` calls for.
pub struct MediaRouter<'a> {
    pub archive: &'a dyn ArchiveAdapter,
    pub raw_spi: Option<&'a dyn RawSpiSaveIo>,
}

impl<'a> MediaRouter<'a> {
    pub fn new(archive: &'a dyn ArchiveAdapter) -> Self {
        Self {
            archive,
            raw_spi: None,
        }
    }

    pub fn with_raw_spi(mut self, raw_spi: &'a dyn RawSpiSaveIo) -> Self {
        self.raw_spi = Some(raw_spi);
        self
    }

    pub fn read(&self, title: &Title) -> Result<Vec<ArchiveFile>, MediumError> {
        match title.media_kind {
            MediaKind::SystemStorage | MediaKind::CartridgeTree => Ok(self
                .archive
                .read(title.title_id, title.media_kind)?),
            MediaKind::LooseFileOnStorage => {
                let path = title
                    .loose_file_path
                    .as_ref()
                    .ok_or(MediumError::MissingLooseFilePath(title.title_id))?;
                Ok(LooseFileAdapter::new(path).read()?)
            }
            MediaKind::CartridgeRawSpi => self
                .raw_spi
                .ok_or(MediumError::NoSpiAdapter(title.title_id))?
                .read(),
        }
    }

    pub fn write(&self, title: &Title, files: &[ArchiveFile]) -> Result<(), MediumError> {
        match title.media_kind {
            MediaKind::SystemStorage | MediaKind::CartridgeTree => {
                Ok(self.archive.write(title.title_id, title.media_kind, files)?)
            }
            MediaKind::LooseFileOnStorage => {
                let path = title
                    .loose_file_path
                    .as_ref()
                    .ok_or(MediumError::MissingLooseFilePath(title.title_id))?;
                Ok(LooseFileAdapter::new(path).write(files)?)
            }
            MediaKind::CartridgeRawSpi => self
                .raw_spi
                .ok_or(MediumError::NoSpiAdapter(title.title_id))?
                .write(files),
        }
    }
}
