//! SPI cartridge adapter (C5): detection and read/write of raw
//! EEPROM/FLASH/FRAM save chips on a physical game cartridge.

mod adapter;
mod commands;
mod detect;
mod transport;
mod types;

pub use adapter::{read_save, read_save_as, write_save, CartridgeError};
pub use detect::detect;
pub use transport::{SpiError, SpiTransport, SPI_CHUNK_SIZE};
pub use types::SaveType;

#[cfg(test)]
#[path = "tests/fake_chip.rs"]
mod fake_chip;

#[cfg(test)]
#[path = "tests/detect_tests.rs"]
mod detect_tests;
