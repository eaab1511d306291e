//! Shared domain types: titles, media kinds, and bundle file entries.

use std::path::PathBuf;

/// The enumerated source of a title's save data.
///
/// Matches §3's `media_kind`: tree-structured archives live either on
/// system storage or on a native-format cartridge; loose files live on
/// removable storage; raw-SPI is a foreign-family cartridge read directly
/// off its save chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    SystemStorage,
    CartridgeTree,
    LooseFileOnStorage,
    CartridgeRawSpi,
}

impl MediaKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SystemStorage => "system_storage",
            Self::CartridgeTree => "cartridge_tree",
            Self::LooseFileOnStorage => "loose_file_on_storage",
            Self::CartridgeRawSpi => "cartridge_raw_spi",
        }
    }

    /// Whether this media kind is handled by the tree-structured archive
    /// adapter (C3) as opposed to the loose-file (C4) or raw-SPI (C5)
    /// adapters.
    pub fn is_archive(&self) -> bool {
        matches!(self, Self::SystemStorage | Self::CartridgeTree)
    }
}

/// Derive a loose-file title ID from a 4-byte product code, per §3:
/// `0x00048000_00000000 | (product_code as big-endian u32)`.
pub fn title_id_from_product_code(code: &[u8; 4]) -> u64 {
    let be = u32::from_be_bytes(*code) as u64;
    0x0004_8000_0000_0000 | be
}

/// Format a title ID as the 16-char uppercase hex string used throughout
/// the wire and storage formats (§3, §6).
pub fn title_id_hex(title_id: u64) -> String {
    format!("{:016X}", title_id)
}

/// Parse a 16-char uppercase (or any-case) hex title ID back to a `u64`.
pub fn title_id_from_hex(hex: &str) -> Option<u64> {
    if hex.len() != 16 {
        return None;
    }
    u64::from_str_radix(hex, 16).ok()
}

/// One syncable save unit (§3).
#[derive(Debug, Clone)]
pub struct Title {
    pub title_id: u64,
    pub media_kind: MediaKind,
    /// Up to 4 printable ASCII bytes.
    pub product_code: String,
    /// Up to 63 bytes; purely cosmetic, must never influence server identity.
    pub display_name: String,
    pub has_local_save: bool,
    /// Only set for `MediaKind::LooseFileOnStorage`.
    pub loose_file_path: Option<PathBuf>,
}

impl Title {
    pub fn title_id_hex(&self) -> String {
        title_id_hex(self.title_id)
    }

    /// Fallback display name chain: product code, else hex title ID.
    pub fn fallback_name(&self) -> String {
        if !self.product_code.is_empty() {
            self.product_code.clone()
        } else {
            self.title_id_hex()
        }
    }
}

/// One logical file within a bundle (§3).
///
/// `path` must be forward-slash separated, carry no leading slash, and
/// contain no `..` segments — enforced by [`ArchiveFile::new`] and by the
/// bundle decoder (§4.2's "path longer than the path-length limit" /
/// structural checks).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFile {
    pub path: String,
    pub data: Vec<u8>,
}

/// Maximum encoded path length (§3: "up to 255 bytes").
pub const MAX_PATH_LEN: usize = 255;

impl ArchiveFile {
    pub fn new(path: impl Into<String>, data: Vec<u8>) -> Result<Self, PathError> {
        let path = path.into();
        validate_path(&path)?;
        Ok(Self { path, data })
    }

    pub fn size(&self) -> u32 {
        self.data.len() as u32
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathError {
    #[error("path exceeds {MAX_PATH_LEN} bytes")]
    TooLong,
    #[error("path must not start with '/'")]
    LeadingSlash,
    #[error("path must not contain '..' segments")]
    ParentSegment,
}

pub fn validate_path(path: &str) -> Result<(), PathError> {
    if path.len() > MAX_PATH_LEN {
        return Err(PathError::TooLong);
    }
    if path.starts_with('/') {
        return Err(PathError::LeadingSlash);
    }
    if path.split('/').any(|seg| seg == "..") {
        return Err(PathError::ParentSegment);
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
