use crate::detect::detect;
use crate::fake_chip::FakeChip;
use crate::types::SaveType;

fn patterned(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

#[test]
fn detects_no_chip() {
    let mut chip = FakeChip::no_chip();
    assert_eq!(detect(&mut chip).unwrap(), None);
}

#[test]
fn detects_flash_256k_from_known_manufacturer() {
    let mut chip = FakeChip::flash([0x20, 0x00, 0x12], 256 * 1024);
    assert_eq!(detect(&mut chip).unwrap(), Some(SaveType::Flash256K));
}

#[test]
fn detects_flash_8m_capacity_byte() {
    let mut chip = FakeChip::flash([0xC2, 0x00, 0x17], 8 * 1024 * 1024);
    assert_eq!(detect(&mut chip).unwrap(), Some(SaveType::Flash8M));
}

#[test]
fn detects_flash_unknown_capacity_defaults_to_256k() {
    let mut chip = FakeChip::flash([0x1C, 0x00, 0xAA], 256 * 1024);
    assert_eq!(detect(&mut chip).unwrap(), Some(SaveType::Flash256K));
}

#[test]
fn detects_eeprom_8k_via_wrap_at_0x2000() {
    let mut chip = FakeChip::spi_save(0x2000, 0);
    chip.data = patterned(0x2000);
    assert_eq!(detect(&mut chip).unwrap(), Some(SaveType::Eeprom8K));
}

#[test]
fn detects_fram_32k_via_wrap_at_0x8000() {
    let mut chip = FakeChip::spi_save(0x8000, 0);
    chip.data = patterned(0x8000);
    assert_eq!(detect(&mut chip).unwrap(), Some(SaveType::Fram32K));
}

#[test]
fn detects_eeprom_64k_when_no_wrap_and_no_upper_bank() {
    let mut chip = FakeChip::spi_save(0x10000, 0);
    chip.data = patterned(0x10000);
    assert_eq!(detect(&mut chip).unwrap(), Some(SaveType::Eeprom64K));
}

#[test]
fn detects_eeprom_128k_when_upper_bank_differs() {
    let mut chip = FakeChip::spi_save(0x20000, 0);
    chip.data = patterned(0x20000);
    assert_eq!(detect(&mut chip).unwrap(), Some(SaveType::Eeprom128K));
}

#[test]
fn uniform_reference_window_defaults_to_eeprom_64k() {
    let mut chip = FakeChip::spi_save(0x20000, 0xFF);
    assert_eq!(detect(&mut chip).unwrap(), Some(SaveType::Eeprom64K));
}
