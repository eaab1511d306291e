//! Wires the core crates together: config, console ID, HTTP client, media
//! adapters, and state store, all built once per invocation.

use std::path::PathBuf;

use savesync_config::AppConfig;
use savesync_engine::MediaRouter;
use savesync_http::HttpSyncApiClient;
use savesync_media::FsArchiveAdapter;
use savesync_state::FsSyncStateStore;

use crate::error::CliError;
use crate::sources::{SerialSpiTransport, SpiSaveIo};

pub(crate) struct Context {
    pub(crate) root: PathBuf,
    pub(crate) config_dir: PathBuf,
    pub(crate) rom_extension: String,
    pub(crate) console_id: String,
    pub(crate) archive: FsArchiveAdapter,
    pub(crate) state: FsSyncStateStore,
    pub(crate) http: HttpSyncApiClient,
    spi_io: Option<SpiSaveIo>,
}

impl Context {
    pub(crate) fn load(
        root: Option<PathBuf>,
        config_dir: Option<PathBuf>,
        rom_extension: String,
        spi_device: Option<PathBuf>,
    ) -> Result<Self, CliError> {
        let root = root.unwrap_or_else(|| PathBuf::from("."));
        let config_dir = config_dir.unwrap_or_else(|| root.clone());

        let config_path = savesync_config::default_config_path(&config_dir);
        let config: AppConfig = savesync_config::load(&config_path)?;

        let console_id_path = savesync_config::default_console_id_path(&config_dir);
        let console_id = savesync_config::load_or_generate_console_id(&console_id_path)?;

        let http = HttpSyncApiClient::new(config.server_url.clone(), config.api_key.clone(), console_id.clone());
        let archive = FsArchiveAdapter::new(root.join("archives"));
        let state = FsSyncStateStore::new(config_dir.join("sync_state"));

        let spi_io = match &spi_device {
            Some(path) => Some(SpiSaveIo::new(Box::new(SerialSpiTransport::open(path)?))),
            None => None,
        };

        Ok(Self {
            root,
            config_dir,
            rom_extension,
            console_id,
            archive,
            state,
            http,
            spi_io,
        })
    }

    pub(crate) fn media(&self) -> MediaRouter<'_> {
        let router = MediaRouter::new(&self.archive);
        match &self.spi_io {
            Some(io) => router.with_raw_spi(io),
            None => router,
        }
    }

    pub(crate) fn archives_root(&self) -> PathBuf {
        self.root.join("archives")
    }

    pub(crate) fn roms_root(&self) -> PathBuf {
        self.root.join("roms")
    }

    pub(crate) fn raw_spi_image_path(&self) -> PathBuf {
        self.config_dir.join("raw_spi_image.bin")
    }
}
