use super::*;
use crate::fake_chip::FakeChip;
use crate::types::SaveType;

#[test]
fn eeprom_8k_write_then_read_round_trips() {
    let mut chip = FakeChip::spi_save(8 * 1024, 0);
    let data: Vec<u8> = (0..8 * 1024).map(|i| (i % 256) as u8).collect();

    write_save(&mut chip, SaveType::Eeprom8K, &data).unwrap();
    let read_back = read_save_as(&mut chip, SaveType::Eeprom8K).unwrap();

    assert_eq!(read_back, data);
}

#[test]
fn eeprom_128k_write_then_read_round_trips() {
    let mut chip = FakeChip::spi_save(128 * 1024, 0);
    let data: Vec<u8> = (0..128 * 1024).map(|i| ((i * 7) % 256) as u8).collect();

    write_save(&mut chip, SaveType::Eeprom128K, &data).unwrap();
    let read_back = read_save_as(&mut chip, SaveType::Eeprom128K).unwrap();

    assert_eq!(read_back, data);
}

#[test]
fn fram_write_then_read_round_trips_in_one_burst() {
    let mut chip = FakeChip::spi_save(32 * 1024, 0);
    let data: Vec<u8> = (0..32 * 1024).map(|i| (i % 17) as u8).collect();

    write_save(&mut chip, SaveType::Fram32K, &data).unwrap();
    let read_back = read_save_as(&mut chip, SaveType::Fram32K).unwrap();

    assert_eq!(read_back, data);
}

/// Scenario E7: a 256 KiB FLASH chip round-trips a full image through
/// erase-then-program.
#[test]
fn scenario_e7_flash_256k_round_trip() {
    let mut chip = FakeChip::flash([0x20, 0x00, 0x12], 256 * 1024);
    let data: Vec<u8> = (0..256 * 1024).map(|i| ((i * 31) % 256) as u8).collect();

    write_save(&mut chip, SaveType::Flash256K, &data).unwrap();
    let read_back = read_save_as(&mut chip, SaveType::Flash256K).unwrap();

    assert_eq!(read_back, data);
}

#[test]
fn write_rejects_size_mismatch() {
    let mut chip = FakeChip::spi_save(8 * 1024, 0);
    let err = write_save(&mut chip, SaveType::Eeprom8K, &[0u8; 100]).unwrap_err();
    assert!(matches!(err, CartridgeError::SizeMismatch { .. }));
}

#[test]
fn read_save_detects_and_reads_in_one_call() {
    let mut chip = FakeChip::flash([0xBF, 0x00, 0x10], 256 * 1024);
    let data: Vec<u8> = (0..256 * 1024).map(|i| (i % 256) as u8).collect();
    write_save(&mut chip, SaveType::Flash256K, &data).unwrap();

    let (save_type, read_back) = read_save(&mut chip).unwrap();
    assert_eq!(save_type, SaveType::Flash256K);
    assert_eq!(read_back, data);
}

#[test]
fn eeprom_512b_respects_16_byte_page_boundary() {
    let mut chip = FakeChip::spi_save(512, 0);
    let data: Vec<u8> = (0..512).map(|i| (i % 256) as u8).collect();

    write_save(&mut chip, SaveType::Eeprom512B, &data).unwrap();
    let read_back = read_save_as(&mut chip, SaveType::Eeprom512B).unwrap();

    assert_eq!(read_back, data);
}
