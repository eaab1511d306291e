//! Media-specific save I/O adapters: tree-structured archives (C3) and
//! loose single-file saves (C4).

pub mod archive;
pub mod loose;

pub use archive::{ArchiveAdapter, ArchiveError, FsArchiveAdapter};
pub use loose::{LooseFileAdapter, LooseFileError};
