//! The host-provided SPI transaction primitive (§4.5): a single bus
//! transaction carries a command, an optional write payload, and an
//! optional read payload, all under one chip-select assertion.

#[derive(Debug, thiserror::Error)]
#[error("SPI transaction failed: {0}")]
pub struct SpiError(pub String);

/// Maximum bytes moved in a single SPI transaction — the host driver's
/// ceiling (§4.5: "All buffered reads and writes are chunked (≤256 bytes
/// per SPI transaction)").
pub const SPI_CHUNK_SIZE: usize = 256;

/// Abstraction over the host SPI transaction primitive. Implementors drive
/// real hardware; [`SpiTransport`] test doubles simulate a chip's response
/// for exercising the detection and read/write logic without one.
pub trait SpiTransport {
    /// Sends `cmd` followed by `write_data` (if non-empty), then clocks
    /// `read_len` bytes back. Returns the bytes read (empty if
    /// `read_len == 0`).
    fn transact(
        &mut self,
        cmd: &[u8],
        write_data: &[u8],
        read_len: usize,
    ) -> Result<Vec<u8>, SpiError>;
}
