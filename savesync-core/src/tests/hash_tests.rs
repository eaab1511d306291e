use super::*;

#[test]
fn sha256_matches_known_vector() {
    // SHA-256("abc")
    let digest = sha256(b"abc");
    assert_eq!(
        hex_encode(&digest),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn incremental_matches_one_shot() {
    let mut h = ShaHasher::init();
    h.update(b"ab");
    h.update(b"c");
    assert_eq!(h.finalize(), sha256(b"abc"));
}

#[test]
fn save_hash_is_concat_of_file_data_in_order() {
    let files = vec![
        ArchiveFile::new("a.dat", b"AB".to_vec()).unwrap(),
        ArchiveFile::new("b.dat", b"C".to_vec()).unwrap(),
    ];
    assert_eq!(save_hash(&files), hex_encode(&sha256(b"ABC")));
}

#[test]
fn save_hash_empty_files_is_hash_of_empty_input() {
    assert_eq!(save_hash(&[]), hex_encode(&sha256(b"")));
}
