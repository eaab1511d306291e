//! Shared domain types, the save-hash (C1), and the bundle codec (C2) for
//! the handheld console save-sync core.

pub mod bundle;
pub mod hash;
pub mod types;

pub use bundle::{decode, encode, encode_with_version, BundleError, DecodedBundle};
pub use hash::{hex_encode, hex_encode_upper, save_hash, sha256, ShaHasher};
pub use types::{
    title_id_from_hex, title_id_from_product_code, title_id_hex, ArchiveFile, MediaKind,
    PathError, Title, MAX_PATH_LEN,
};
