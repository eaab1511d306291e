//! Bundle codec (C2): the versioned `3DSS` container carrying one title's
//! save as {header, file table, file data}. See §4.2 and §6.
//!
//! Byte order is a deliberate quirk of the format: `title_id` is
//! big-endian, every other multi-byte integer is little-endian.

use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::hash::sha256;
use crate::types::{validate_path, ArchiveFile, MAX_PATH_LEN};

pub const MAGIC: &[u8; 4] = b"3DSS";
pub const VERSION_RAW: u32 = 1;
pub const VERSION_DEFLATE: u32 = 2;

const HEADER_LEN: usize = 28;

#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("malformed bundle: {0}")]
    Malformed(String),
}

/// The decoded contents of a bundle: title, timestamp, and the files in
/// their original table order. Fully owned — no borrow into the input
/// buffer survives decode, so there is nothing for a caller to dangle.
#[derive(Debug, Clone)]
pub struct DecodedBundle {
    pub title_id: u64,
    pub timestamp: u32,
    pub files: Vec<ArchiveFile>,
}

/// Encode `files` into a v2 (deflate-compressed) bundle — the default for
/// new writes per §4.2. Readers must still accept v1.
pub fn encode(title_id: u64, timestamp: u32, files: &[ArchiveFile]) -> Vec<u8> {
    encode_with_version(title_id, timestamp, files, VERSION_DEFLATE)
}

/// Encode with an explicit format version. Exposed mainly so tests can
/// exercise the v1 (uncompressed) path; production writers should use
/// [`encode`].
pub fn encode_with_version(
    title_id: u64,
    timestamp: u32,
    files: &[ArchiveFile],
    version: u32,
) -> Vec<u8> {
    let payload = build_payload(files);

    let (size_field, body): (u32, Vec<u8>) = match version {
        VERSION_RAW => (total_data_len(files), payload),
        VERSION_DEFLATE => {
            let uncompressed_len = payload.len() as u32;
            let mut enc = DeflateEncoder::new(Vec::new(), Compression::default());
            // Writing to a Vec<u8> via DeflateEncoder cannot fail.
            enc.write_all(&payload).expect("in-memory deflate write");
            (uncompressed_len, enc.finish().expect("in-memory deflate finish"))
        }
        _ => panic!("unsupported bundle version {version}"),
    };

    let mut out = Vec::with_capacity(HEADER_LEN + body.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&version.to_le_bytes());
    out.extend_from_slice(&title_id.to_be_bytes());
    out.extend_from_slice(&timestamp.to_le_bytes());
    out.extend_from_slice(&(files.len() as u32).to_le_bytes());
    out.extend_from_slice(&size_field.to_le_bytes());
    out.extend_from_slice(&body);
    out
}

fn total_data_len(files: &[ArchiveFile]) -> u32 {
    files.iter().map(|f| f.data.len() as u32).sum()
}

/// File-table + file-data payload, uncompressed, in table order.
fn build_payload(files: &[ArchiveFile]) -> Vec<u8> {
    let mut table = Vec::new();
    for f in files {
        let path_bytes = f.path.as_bytes();
        table.extend_from_slice(&(path_bytes.len() as u16).to_le_bytes());
        table.extend_from_slice(path_bytes);
        table.extend_from_slice(&f.size().to_le_bytes());
        table.extend_from_slice(&sha256(&f.data));
    }
    let mut payload = table;
    for f in files {
        payload.extend_from_slice(&f.data);
    }
    payload
}

/// Decode a bundle, accepting both v1 (uncompressed) and v2 (deflate)
/// format versions. Any structural violation collapses to a single
/// [`BundleError::Malformed`] — no partial decode is surfaced (§4.2).
pub fn decode(data: &[u8]) -> Result<DecodedBundle, BundleError> {
    if data.len() < HEADER_LEN {
        return Err(BundleError::Malformed("truncated header".into()));
    }
    if &data[0..4] != MAGIC {
        return Err(BundleError::Malformed("bad magic".into()));
    }
    let version = u32::from_le_bytes(data[4..8].try_into().unwrap());
    if version != VERSION_RAW && version != VERSION_DEFLATE {
        return Err(BundleError::Malformed(format!(
            "unsupported version {version}"
        )));
    }
    let title_id = u64::from_be_bytes(data[8..16].try_into().unwrap());
    let timestamp = u32::from_le_bytes(data[16..20].try_into().unwrap());
    let file_count = u32::from_le_bytes(data[20..24].try_into().unwrap());
    let size_field = u32::from_le_bytes(data[24..28].try_into().unwrap());
    let body = &data[HEADER_LEN..];

    let payload: Vec<u8> = if version == VERSION_DEFLATE {
        let uncompressed_len = size_field as usize;
        let mut decoder = DeflateDecoder::new(body);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .map_err(|e| BundleError::Malformed(format!("decompression error: {e}")))?;
        if out.len() != uncompressed_len {
            return Err(BundleError::Malformed(
                "decompressed length mismatch".into(),
            ));
        }
        out
    } else {
        body.to_vec()
    };

    let files = parse_payload(&payload, file_count)?;

    Ok(DecodedBundle {
        title_id,
        timestamp,
        files,
    })
}

/// Minimum bytes a single file-table entry can occupy: 2-byte path length
/// + 0-byte path + 4-byte size + 32-byte hash.
const MIN_FILE_ENTRY_LEN: u64 = 2 + 4 + 32;

fn parse_payload(payload: &[u8], file_count: u32) -> Result<Vec<ArchiveFile>, BundleError> {
    struct Entry {
        path: String,
        size: u32,
    }

    // Reject an oversized `file_count` before allocating anything — the
    // table alone needs at least `file_count * MIN_FILE_ENTRY_LEN` bytes,
    // so a declared count that can't fit in `payload` is malformed.
    if file_count as u64 * MIN_FILE_ENTRY_LEN > payload.len() as u64 {
        return Err(BundleError::Malformed(
            "file_count exceeds what payload could contain".into(),
        ));
    }

    let mut offset = 0usize;
    let mut entries = Vec::with_capacity(file_count as usize);

    for _ in 0..file_count {
        if offset + 2 > payload.len() {
            return Err(BundleError::Malformed("truncated file table".into()));
        }
        let path_len = u16::from_le_bytes(payload[offset..offset + 2].try_into().unwrap()) as usize;
        offset += 2;

        if path_len > MAX_PATH_LEN {
            return Err(BundleError::Malformed("path exceeds limit".into()));
        }
        if offset + path_len > payload.len() {
            return Err(BundleError::Malformed("truncated path".into()));
        }
        let path = String::from_utf8(payload[offset..offset + path_len].to_vec())
            .map_err(|_| BundleError::Malformed("path is not valid UTF-8".into()))?;
        validate_path(&path).map_err(|e| BundleError::Malformed(e.to_string()))?;
        offset += path_len;

        if offset + 4 > payload.len() {
            return Err(BundleError::Malformed("truncated file size".into()));
        }
        let size = u32::from_le_bytes(payload[offset..offset + 4].try_into().unwrap());
        offset += 4;

        // Per-file SHA-256 is advisory for readers (§4.2) — skip without
        // verifying.
        if offset + 32 > payload.len() {
            return Err(BundleError::Malformed("truncated file hash".into()));
        }
        offset += 32;

        entries.push(Entry { path, size });
    }

    let mut files = Vec::with_capacity(entries.len());
    for entry in entries {
        let size = entry.size as usize;
        if offset + size > payload.len() {
            return Err(BundleError::Malformed(
                "declared file size extends past payload end".into(),
            ));
        }
        let data = payload[offset..offset + size].to_vec();
        offset += size;
        files.push(ArchiveFile {
            path: entry.path,
            data,
        });
    }

    Ok(files)
}

#[cfg(test)]
#[path = "tests/bundle_tests.rs"]
mod tests;
