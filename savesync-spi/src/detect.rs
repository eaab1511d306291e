//! Save-chip detection algorithm (§4.5, steps 1-4). Safe to run once
//! per operation — it issues only read-only or idempotent commands until
//! the final write-enable probe, which every subsequent write repeats
//! anyway.

use crate::commands::{address_command, jedec_id, read_status, write_enable, CMD_READ, SR_WEL};
use crate::transport::{SpiError, SpiTransport};
use crate::types::SaveType;

const KNOWN_FLASH_MANUFACTURERS: [u8; 5] = [0x20, 0xC2, 0x62, 0x1C, 0xBF];

/// Runs the four-step detection algorithm. `Ok(None)` means no save chip
/// responded (step 2's WEL probe failed to latch) — not an error.
pub fn detect(transport: &mut dyn SpiTransport) -> Result<Option<SaveType>, SpiError> {
    if let Ok(id) = jedec_id(transport) {
        if KNOWN_FLASH_MANUFACTURERS.contains(&id[0]) {
            return Ok(Some(flash_variant_for_capacity(id[2])));
        }
    }

    write_enable(transport)?;
    let status = read_status(transport)?;
    if status & SR_WEL == 0 {
        return Ok(None);
    }

    let reference = read_window(transport, SaveType::Eeprom64K, 0x0000)?;
    let uniform = reference.iter().all(|b| *b == reference[0]);
    if uniform {
        return Ok(Some(SaveType::Eeprom64K));
    }

    let probe_8k = read_window(transport, SaveType::Eeprom64K, 0x2000)?;
    if probe_8k == reference {
        return Ok(Some(SaveType::Eeprom8K));
    }

    let probe_32k = read_window(transport, SaveType::Eeprom64K, 0x8000)?;
    if probe_32k == reference {
        return Ok(Some(SaveType::Fram32K));
    }

    let upper = read_window(transport, SaveType::Eeprom128K, 0x10000)?;
    if upper != reference {
        Ok(Some(SaveType::Eeprom128K))
    } else {
        Ok(Some(SaveType::Eeprom64K))
    }
}

fn flash_variant_for_capacity(capacity_byte: u8) -> SaveType {
    match capacity_byte {
        0x10 | 0x12 => SaveType::Flash256K,
        0x13 => SaveType::Flash512K,
        0x14 => SaveType::Flash1M,
        0x17 => SaveType::Flash8M,
        _ => SaveType::Flash256K,
    }
}

fn read_window(
    transport: &mut dyn SpiTransport,
    addressing: SaveType,
    addr: u32,
) -> Result<Vec<u8>, SpiError> {
    let cmd = address_command(addressing, CMD_READ, addr);
    transport.transact(&cmd, &[], 32)
}
