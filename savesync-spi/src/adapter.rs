//! Read/write driver for a detected save chip (§4.5's write
//! discipline): paged writes with write-enable-before-every-page, WIP
//! polling with per-operation timeouts, and flash's erase-then-program
//! ordering.

use crate::commands::{
    address_command, read_status, sector_erase_command, write_enable, CMD_READ, CMD_WRITE, SR_WIP,
};
use crate::detect::detect;
use crate::transport::{SpiError, SpiTransport, SPI_CHUNK_SIZE};
use crate::types::SaveType;

const WIP_TIMEOUT_PROGRAM_MS: u64 = 50;
const WIP_TIMEOUT_ERASE_MS: u64 = 3_000;

#[derive(Debug, thiserror::Error)]
pub enum CartridgeError {
    #[error(transparent)]
    Transport(#[from] SpiError),

    #[error("no save chip detected")]
    NotDetected,

    #[error("write-in-progress bit did not clear within {0}ms")]
    Timeout(u64),

    #[error("buffer size {actual} does not match save type size {expected}")]
    SizeMismatch { expected: u32, actual: u32 },
}

/// Detects the inserted cartridge's save chip and reads its full contents.
pub fn read_save(transport: &mut dyn SpiTransport) -> Result<(SaveType, Vec<u8>), CartridgeError> {
    let save_type = detect(transport)?.ok_or(CartridgeError::NotDetected)?;
    Ok((save_type, read_save_as(transport, save_type)?))
}

/// Reads the full image for an already-known save type, chunked to the
/// host's per-transaction ceiling.
pub fn read_save_as(
    transport: &mut dyn SpiTransport,
    save_type: SaveType,
) -> Result<Vec<u8>, CartridgeError> {
    let size = save_type.size_bytes();
    let mut buf = Vec::with_capacity(size as usize);
    let mut offset = 0u32;
    while offset < size {
        let chunk = (SPI_CHUNK_SIZE as u32).min(size - offset);
        let cmd = address_command(save_type, CMD_READ, offset);
        let data = transport.transact(&cmd, &[], chunk as usize)?;
        buf.extend_from_slice(&data);
        offset += chunk;
    }
    Ok(buf)
}

/// Writes a full save image for `save_type`. `data.len()` must equal
/// `save_type.size_bytes()` exactly.
pub fn write_save(
    transport: &mut dyn SpiTransport,
    save_type: SaveType,
    data: &[u8],
) -> Result<(), CartridgeError> {
    let size = save_type.size_bytes();
    if data.len() as u32 != size {
        return Err(CartridgeError::SizeMismatch {
            expected: size,
            actual: data.len() as u32,
        });
    }

    if save_type.is_flash() {
        let sector = save_type.sector_size().expect("flash types have a sector size");
        let mut addr = 0u32;
        while addr < size {
            erase_sector(transport, addr)?;
            addr += sector;
        }
    }

    match save_type.page_size() {
        None => {
            // FRAM: one contiguous burst, no page boundary, no WIP wait.
            write_enable(transport)?;
            let cmd = address_command(save_type, CMD_WRITE, 0);
            transport.transact(&cmd, data, 0)?;
        }
        Some(page_size) => {
            let mut offset = 0u32;
            while offset < size {
                let page_offset = offset % page_size;
                let chunk = (page_size - page_offset).min(size - offset);
                let slice = &data[offset as usize..(offset + chunk) as usize];
                write_page(transport, save_type, offset, slice)?;
                offset += chunk;
            }
        }
    }

    Ok(())
}

fn write_page(
    transport: &mut dyn SpiTransport,
    save_type: SaveType,
    addr: u32,
    chunk: &[u8],
) -> Result<(), CartridgeError> {
    write_enable(transport)?;
    let cmd = address_command(save_type, CMD_WRITE, addr);
    transport.transact(&cmd, chunk, 0)?;
    wait_wip(transport, WIP_TIMEOUT_PROGRAM_MS)
}

fn erase_sector(transport: &mut dyn SpiTransport, addr: u32) -> Result<(), CartridgeError> {
    write_enable(transport)?;
    let cmd = sector_erase_command(addr);
    transport.transact(&cmd, &[], 0)?;
    wait_wip(transport, WIP_TIMEOUT_ERASE_MS)
}

fn wait_wip(transport: &mut dyn SpiTransport, timeout_ms: u64) -> Result<(), CartridgeError> {
    for _ in 0..timeout_ms {
        let status = read_status(transport)?;
        if status & SR_WIP == 0 {
            return Ok(());
        }
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
    Err(CartridgeError::Timeout(timeout_ms))
}

#[cfg(test)]
#[path = "tests/adapter_tests.rs"]
mod tests;
