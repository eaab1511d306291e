//! Raw SPI command bytes and per-addressing-scheme command framing.

use crate::transport::{SpiError, SpiTransport};
use crate::types::SaveType;

pub(crate) const CMD_RDSR: u8 = 0x05;
pub(crate) const CMD_READ: u8 = 0x03;
pub(crate) const CMD_WREN: u8 = 0x06;
pub(crate) const CMD_WRITE: u8 = 0x02;
pub(crate) const CMD_SE: u8 = 0xD8;
pub(crate) const CMD_JEDEC: u8 = 0x9F;

pub(crate) const SR_WIP: u8 = 0x01;
pub(crate) const SR_WEL: u8 = 0x02;

pub(crate) fn jedec_id(transport: &mut dyn SpiTransport) -> Result<[u8; 3], SpiError> {
    let out = transport.transact(&[CMD_JEDEC], &[], 3)?;
    Ok([out[0], out[1], out[2]])
}

pub(crate) fn read_status(transport: &mut dyn SpiTransport) -> Result<u8, SpiError> {
    let out = transport.transact(&[CMD_RDSR], &[], 1)?;
    Ok(out[0])
}

pub(crate) fn write_enable(transport: &mut dyn SpiTransport) -> Result<(), SpiError> {
    transport.transact(&[CMD_WREN], &[], 0)?;
    Ok(())
}

/// Builds the command-byte sequence for a given save type and address, for
/// either a read (`CMD_READ`) or write (`CMD_WRITE`) operation.
pub(crate) fn address_command(save_type: SaveType, base: u8, addr: u32) -> Vec<u8> {
    match save_type {
        SaveType::Eeprom512B => {
            let cmd_byte = base | (((addr >> 8) & 1) as u8) << 3;
            vec![cmd_byte, (addr & 0xFF) as u8]
        }
        SaveType::Eeprom128K => {
            let cmd_byte = base | (((addr >> 16) & 1) as u8) << 3;
            vec![cmd_byte, ((addr >> 8) & 0xFF) as u8, (addr & 0xFF) as u8]
        }
        SaveType::Eeprom8K | SaveType::Eeprom64K | SaveType::Fram32K => {
            vec![base, ((addr >> 8) & 0xFF) as u8, (addr & 0xFF) as u8]
        }
        SaveType::Flash256K | SaveType::Flash512K | SaveType::Flash1M | SaveType::Flash8M => {
            vec![
                base,
                ((addr >> 16) & 0xFF) as u8,
                ((addr >> 8) & 0xFF) as u8,
                (addr & 0xFF) as u8,
            ]
        }
    }
}

pub(crate) fn sector_erase_command(addr: u32) -> Vec<u8> {
    vec![
        CMD_SE,
        ((addr >> 16) & 0xFF) as u8,
        ((addr >> 8) & 0xFF) as u8,
        (addr & 0xFF) as u8,
    ]
}
