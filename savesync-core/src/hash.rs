//! Incremental SHA-256 digest (C1) and the save-hash convenience built on it.

use sha2::{Digest, Sha256};

use crate::types::ArchiveFile;

/// Streaming SHA-256 digest. Thin wrapper so callers never reach for
/// `sha2` directly — mirrors the `crc32fast::Hasher`/`sha1::Sha1` usage
/// pattern elsewhere in this stack.
#[derive(Default)]
pub struct ShaHasher(Sha256);

impl ShaHasher {
    pub fn init() -> Self {
        Self(Sha256::new())
    }

    pub fn update(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    /// Consume the hasher and return the raw 32-byte digest.
    pub fn finalize(self) -> [u8; 32] {
        self.0.finalize().into()
    }

    /// Consume the hasher and return the lowercase hex digest.
    pub fn finalize_hex(self) -> String {
        hex_encode(&self.finalize())
    }
}

/// One-shot SHA-256 of a single byte slice.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut h = ShaHasher::init();
    h.update(data);
    h.finalize()
}

/// Lowercase hex encoding of a byte slice.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Uppercase hex encoding, used for title IDs and console IDs.
pub fn hex_encode_upper(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}

/// The "save hash" (§4.1): SHA-256 over the concatenation of each file's
/// `data`, in the order the files are stored in the bundle's file table.
/// This is the sole basis for save identity/equality used by the
/// reconciliation engine (C8).
pub fn save_hash(files: &[ArchiveFile]) -> String {
    let mut h = ShaHasher::init();
    for f in files {
        h.update(&f.data);
    }
    h.finalize_hex()
}

#[cfg(test)]
#[path = "tests/hash_tests.rs"]
mod tests;
