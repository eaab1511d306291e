//! In-memory stand-in for a physical SPI save chip, used by both the
//! detection and the read/write adapter tests.

use crate::commands::{CMD_JEDEC, CMD_READ, CMD_RDSR, CMD_SE, CMD_WREN, CMD_WRITE, SR_WEL};
use crate::transport::{SpiError, SpiTransport};

pub enum FakeKind {
    /// No save chip responds at all (step 2's WEL probe never latches).
    NoChip,
    /// A flash chip identified by its three JEDEC-ID bytes.
    Flash([u8; 3]),
    /// A non-flash SPI save chip (EEPROM/FRAM) behind the wrap-probe path.
    SpiSave,
}

pub struct FakeChip {
    pub data: Vec<u8>,
    kind: FakeKind,
    wel: bool,
}

impl FakeChip {
    pub fn no_chip() -> Self {
        Self {
            data: Vec::new(),
            kind: FakeKind::NoChip,
            wel: false,
        }
    }

    pub fn flash(jedec: [u8; 3], size: usize) -> Self {
        Self {
            data: vec![0xFFu8; size],
            kind: FakeKind::Flash(jedec),
            wel: false,
        }
    }

    /// An EEPROM/FRAM-family chip with `size` bytes of backing storage.
    /// Addresses beyond `size` wrap modulo `size`, simulating real chip
    /// address-line wraparound.
    pub fn spi_save(size: usize, fill: u8) -> Self {
        Self {
            data: vec![fill; size],
            kind: FakeKind::SpiSave,
            wel: false,
        }
    }

    fn decode_address(cmd: &[u8]) -> u32 {
        match cmd.len() {
            2 => (((cmd[0] >> 3) & 1) as u32) << 8 | cmd[1] as u32,
            3 => {
                (((cmd[0] >> 3) & 1) as u32) << 16 | (cmd[1] as u32) << 8 | cmd[2] as u32
            }
            4 => (cmd[1] as u32) << 16 | (cmd[2] as u32) << 8 | cmd[3] as u32,
            _ => panic!("unexpected command length {}", cmd.len()),
        }
    }
}

impl SpiTransport for FakeChip {
    fn transact(
        &mut self,
        cmd: &[u8],
        write_data: &[u8],
        read_len: usize,
    ) -> Result<Vec<u8>, SpiError> {
        let base = cmd[0] & !0x08;

        if cmd[0] == CMD_JEDEC {
            return match self.kind {
                FakeKind::Flash(id) => Ok(id.to_vec()),
                _ => Ok(vec![0x00, 0x00, 0x00]),
            };
        }
        if cmd[0] == CMD_WREN {
            self.wel = !matches!(self.kind, FakeKind::NoChip);
            return Ok(Vec::new());
        }
        if cmd[0] == CMD_RDSR {
            let wel_bit = if self.wel { SR_WEL } else { 0 };
            return Ok(vec![wel_bit]);
        }
        if cmd[0] == CMD_SE {
            let addr = Self::decode_address(cmd) as usize;
            let len = self.data.len();
            for b in &mut self.data[addr.min(len)..(addr + 64 * 1024).min(len)] {
                *b = 0xFF;
            }
            return Ok(Vec::new());
        }
        if base == CMD_READ {
            let addr = Self::decode_address(cmd) as usize % self.data.len().max(1);
            let mut out = Vec::with_capacity(read_len);
            for i in 0..read_len {
                out.push(self.data[(addr + i) % self.data.len()]);
            }
            return Ok(out);
        }
        if base == CMD_WRITE {
            let addr = Self::decode_address(cmd) as usize % self.data.len().max(1);
            for (i, b) in write_data.iter().enumerate() {
                let pos = (addr + i) % self.data.len();
                self.data[pos] = *b;
            }
            return Ok(Vec::new());
        }

        Err(SpiError(format!("unhandled command byte {:#04x}", cmd[0])))
    }
}
