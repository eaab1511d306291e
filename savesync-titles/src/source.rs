//! The three media-specific enumeration strategies (§4.6). Each is a thin
//! [`TitleSource`] wrapping a platform-provided collaborator — the
//! platform title-listing API, a directory walk, or a single cartridge
//! probe — none of which this crate implements directly (they're the
//! out-of-scope collaborators named in §1).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use savesync_core::{title_id_from_product_code, title_id_hex, MediaKind, Title};

use crate::error::TitleError;

/// One enumeration strategy over a single media source.
pub trait TitleSource {
    fn scan(&self) -> Result<Vec<Title>, TitleError>;
}

/// Resolves product codes to display names via the server's `/titles/names`
/// round trip (§4.6's "sorted ... after a names-resolution round-trip").
/// A miss for any code is simply absent from the returned map; callers fall
/// back to [`Title::fallback_name`].
pub trait NamesResolver {
    fn resolve(&self, codes: &[String]) -> HashMap<String, String>;
}

/// High-32-bit namespaces kept by the whitelist (§4.6): standard
/// applications and demos.
pub const DEFAULT_TITLE_NAMESPACE_WHITELIST: [u32; 2] = [0x0004_0000, 0x0004_0002];

/// Platform collaborator for tree-structured title listing
/// (SYSTEM_STORAGE / CARTRIDGE_TREE): lists installed title IDs, reports
/// each one's product code (if any), and whether it owns a non-empty
/// savedata archive. This is the Rust-side seam for the platform's title
/// and archive-open APIs (`AM_GetTitleList`/`FSUSER_OpenArchive` in the
/// original C client).
pub trait TreeArchiveListing {
    fn list_title_ids(&self, media_kind: MediaKind) -> Result<Vec<u64>, TitleError>;
    fn product_code(&self, title_id: u64, media_kind: MediaKind) -> Option<[u8; 4]>;
    fn has_non_empty_save(&self, title_id: u64, media_kind: MediaKind) -> bool;
}

/// Enumerates titles from a tree-structured media source (system storage
/// or a native-format cartridge), filtered to the application+demo
/// namespace whitelist and to titles that own save data (§4.6).
pub struct TreeTitleSource<'a> {
    listing: &'a dyn TreeArchiveListing,
    media_kind: MediaKind,
    namespace_whitelist: Vec<u32>,
}

impl<'a> TreeTitleSource<'a> {
    pub fn new(listing: &'a dyn TreeArchiveListing, media_kind: MediaKind) -> Self {
        Self {
            listing,
            media_kind,
            namespace_whitelist: DEFAULT_TITLE_NAMESPACE_WHITELIST.to_vec(),
        }
    }

    pub fn with_whitelist(mut self, whitelist: Vec<u32>) -> Self {
        self.namespace_whitelist = whitelist;
        self
    }
}

impl TitleSource for TreeTitleSource<'_> {
    fn scan(&self) -> Result<Vec<Title>, TitleError> {
        let mut titles = Vec::new();
        for title_id in self.listing.list_title_ids(self.media_kind)? {
            let high = (title_id >> 32) as u32;
            if !self.namespace_whitelist.contains(&high) {
                continue;
            }
            if !self.listing.has_non_empty_save(title_id, self.media_kind) {
                continue;
            }
            let product_code = self
                .listing
                .product_code(title_id, self.media_kind)
                .map(|c| String::from_utf8_lossy(&c).trim_end().to_string())
                .unwrap_or_default();

            titles.push(Title {
                title_id,
                media_kind: self.media_kind,
                product_code,
                display_name: title_id_hex(title_id),
                has_local_save: true,
                loose_file_path: None,
            });
        }
        Ok(titles)
    }
}

/// Byte offset of the 4-byte product code in a ROM header, for loose-file
/// titles (§3, §4.6).
pub const PRODUCT_CODE_OFFSET: usize = 0x0C;

/// Scans a directory for loose ROM files, reads each one's product code
/// from the fixed header offset, derives the title ID, and pairs it with a
/// save file in the same directory or a `saves/` sibling (§4.6).
pub struct LooseFileScan {
    dir: PathBuf,
    rom_extension: String,
}

impl LooseFileScan {
    pub fn new(dir: impl Into<PathBuf>, rom_extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            rom_extension: rom_extension.into(),
        }
    }

    fn save_path_for(&self, rom_path: &Path) -> PathBuf {
        let stem = rom_path.file_stem().unwrap_or_default();
        let sibling = rom_path.with_file_name(format!("{}.sav", stem.to_string_lossy()));
        if sibling.exists() {
            return sibling;
        }
        self.dir
            .join("saves")
            .join(format!("{}.sav", stem.to_string_lossy()))
    }
}

impl TitleSource for LooseFileScan {
    fn scan(&self) -> Result<Vec<Title>, TitleError> {
        let mut entries: Vec<_> = std::fs::read_dir(&self.dir)
            .map_err(|source| TitleError::Io {
                path: self.dir.display().to_string(),
                source,
            })?
            .filter_map(|e| e.ok())
            .collect();
        entries.sort_by_key(|e| e.file_name());

        let mut titles = Vec::new();
        for entry in entries {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let ext_matches = path
                .extension()
                .map(|e| e.eq_ignore_ascii_case(&self.rom_extension))
                .unwrap_or(false);
            if !ext_matches {
                continue;
            }

            let header = std::fs::read(&path).map_err(|source| TitleError::Io {
                path: path.display().to_string(),
                source,
            })?;
            if header.len() < PRODUCT_CODE_OFFSET + 4 {
                continue;
            }
            let code_bytes = &header[PRODUCT_CODE_OFFSET..PRODUCT_CODE_OFFSET + 4];
            if !code_bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
                continue;
            }
            let mut code = [0u8; 4];
            code.copy_from_slice(code_bytes);
            let product_code = String::from_utf8_lossy(&code).trim_end().to_string();
            let title_id = title_id_from_product_code(&code);
            let save_path = self.save_path_for(&path);

            titles.push(Title {
                title_id,
                media_kind: MediaKind::LooseFileOnStorage,
                product_code: product_code.clone(),
                display_name: title_id_hex(title_id),
                has_local_save: save_path.exists(),
                loose_file_path: Some(save_path),
            });
        }
        Ok(titles)
    }
}

/// Host collaborator reporting the ROM header of an inserted foreign-family
/// cartridge, if any (the SPI detection itself lives in `savesync-spi`;
/// this is only the header-read step needed to name the title).
pub trait CartridgeProbe {
    fn inserted_header(&self) -> Result<Option<Vec<u8>>, TitleError>;
}

/// Produces at most one [`Title`] for an inserted raw-SPI cartridge
/// (§4.6). Raw-SPI titles never participate in batch auto-sync (§4.9);
/// this source exists for explicit single-title push/pull.
pub struct RawSpiProbe<'a> {
    probe: &'a dyn CartridgeProbe,
}

impl<'a> RawSpiProbe<'a> {
    pub fn new(probe: &'a dyn CartridgeProbe) -> Self {
        Self { probe }
    }
}

impl TitleSource for RawSpiProbe<'_> {
    fn scan(&self) -> Result<Vec<Title>, TitleError> {
        let Some(header) = self.probe.inserted_header()? else {
            return Ok(Vec::new());
        };
        if header.len() < PRODUCT_CODE_OFFSET + 4 {
            return Ok(Vec::new());
        }
        let mut code = [0u8; 4];
        code.copy_from_slice(&header[PRODUCT_CODE_OFFSET..PRODUCT_CODE_OFFSET + 4]);
        let product_code = String::from_utf8_lossy(&code).trim_end().to_string();
        let title_id = title_id_from_product_code(&code);

        Ok(vec![Title {
            title_id,
            media_kind: MediaKind::CartridgeRawSpi,
            product_code,
            display_name: title_id_hex(title_id),
            has_local_save: true,
            loose_file_path: None,
        }])
    }
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
