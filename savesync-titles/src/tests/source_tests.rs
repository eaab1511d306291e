use std::collections::HashMap;

use super::*;

struct FakeListing {
    titles: Vec<u64>,
    codes: HashMap<u64, [u8; 4]>,
    saves: HashMap<u64, bool>,
}

impl TreeArchiveListing for FakeListing {
    fn list_title_ids(&self, _media_kind: MediaKind) -> Result<Vec<u64>, TitleError> {
        Ok(self.titles.clone())
    }

    fn product_code(&self, title_id: u64, _media_kind: MediaKind) -> Option<[u8; 4]> {
        self.codes.get(&title_id).copied()
    }

    fn has_non_empty_save(&self, title_id: u64, _media_kind: MediaKind) -> bool {
        *self.saves.get(&title_id).unwrap_or(&false)
    }
}

#[test]
fn tree_source_drops_titles_outside_the_namespace_whitelist() {
    let listing = FakeListing {
        titles: vec![0x0004_0000_0001_0000, 0x0005_0000_0001_0000],
        codes: HashMap::new(),
        saves: HashMap::from([(0x0004_0000_0001_0000, true), (0x0005_0000_0001_0000, true)]),
    };
    let source = TreeTitleSource::new(&listing, MediaKind::SystemStorage);
    let titles = source.scan().unwrap();
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].title_id, 0x0004_0000_0001_0000);
}

#[test]
fn tree_source_drops_titles_without_a_save() {
    let listing = FakeListing {
        titles: vec![0x0004_0000_0001_0000],
        codes: HashMap::new(),
        saves: HashMap::new(),
    };
    let source = TreeTitleSource::new(&listing, MediaKind::SystemStorage);
    assert!(source.scan().unwrap().is_empty());
}

#[test]
fn tree_source_accepts_demo_namespace() {
    let listing = FakeListing {
        titles: vec![0x0004_0002_0001_0000],
        codes: HashMap::new(),
        saves: HashMap::from([(0x0004_0002_0001_0000, true)]),
    };
    let source = TreeTitleSource::new(&listing, MediaKind::CartridgeTree);
    assert_eq!(source.scan().unwrap().len(), 1);
}

struct FakeCartridgeProbe(Option<Vec<u8>>);

impl CartridgeProbe for FakeCartridgeProbe {
    fn inserted_header(&self) -> Result<Option<Vec<u8>>, TitleError> {
        Ok(self.0.clone())
    }
}

#[test]
fn raw_spi_probe_returns_no_titles_when_nothing_is_inserted() {
    let probe = FakeCartridgeProbe(None);
    let source = RawSpiProbe::new(&probe);
    assert!(source.scan().unwrap().is_empty());
}

#[test]
fn raw_spi_probe_derives_title_id_from_header_product_code() {
    let mut header = vec![0u8; 0x20];
    header[PRODUCT_CODE_OFFSET..PRODUCT_CODE_OFFSET + 4].copy_from_slice(b"ABCE");
    let probe = FakeCartridgeProbe(Some(header));
    let source = RawSpiProbe::new(&probe);

    let titles = source.scan().unwrap();
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].media_kind, MediaKind::CartridgeRawSpi);
    assert_eq!(titles[0].product_code, "ABCE");
    assert_eq!(
        titles[0].title_id,
        title_id_from_product_code(b"ABCE")
    );
}

#[test]
fn loose_file_scan_reads_product_code_and_pairs_save_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut rom = vec![0u8; 0x20];
    rom[PRODUCT_CODE_OFFSET..PRODUCT_CODE_OFFSET + 4].copy_from_slice(b"GAME");
    std::fs::write(dir.path().join("mygame.nds"), &rom).unwrap();
    std::fs::write(dir.path().join("mygame.sav"), b"save-bytes").unwrap();

    let source = LooseFileScan::new(dir.path(), "nds");
    let titles = source.scan().unwrap();

    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].product_code, "GAME");
    assert!(titles[0].has_local_save);
    assert_eq!(
        titles[0].loose_file_path.as_ref().unwrap(),
        &dir.path().join("mygame.sav")
    );
}

#[test]
fn loose_file_scan_skips_files_with_unprintable_product_code() {
    let dir = tempfile::tempdir().unwrap();
    let mut rom = vec![0u8; 0x20];
    rom[PRODUCT_CODE_OFFSET] = 0xFF;
    std::fs::write(dir.path().join("bad.nds"), &rom).unwrap();

    let source = LooseFileScan::new(dir.path(), "nds");
    assert!(source.scan().unwrap().is_empty());
}

#[test]
fn loose_file_scan_ignores_non_matching_extensions() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("readme.txt"), b"hello").unwrap();

    let source = LooseFileScan::new(dir.path(), "nds");
    assert!(source.scan().unwrap().is_empty());
}
