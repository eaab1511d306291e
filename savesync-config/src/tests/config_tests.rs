use super::*;

fn write(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.txt");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_required_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "server_url=http://example.test\napi_key=secret123\n",
    );
    let config = load(&path).unwrap();
    assert_eq!(config.server_url, "http://example.test");
    assert_eq!(config.api_key, "secret123");
    assert!(config.save_dir.is_none());
}

#[test]
fn skips_blank_and_comment_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "# a comment\n\nserver_url=http://example.test\napi_key=secret\n",
    );
    let config = load(&path).unwrap();
    assert_eq!(config.server_url, "http://example.test");
}

#[test]
fn tolerates_a_leading_utf8_bom() {
    let dir = tempfile::tempdir().unwrap();
    let mut contents = String::from(UTF8_BOM);
    contents.push_str("server_url=http://example.test\napi_key=secret\n");
    let path = write(dir.path(), &contents);
    let config = load(&path).unwrap();
    assert_eq!(config.server_url, "http://example.test");
}

#[test]
fn reads_optional_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "server_url=http://example.test\napi_key=secret\nsave_dir=/saves\nwifi_ssid=home\nwifi_wep_key=abc\n",
    );
    let config = load(&path).unwrap();
    assert_eq!(config.save_dir.as_deref(), Some("/saves"));
    assert_eq!(config.wifi_ssid.as_deref(), Some("home"));
    assert_eq!(config.wifi_wep_key.as_deref(), Some("abc"));
}

#[test]
fn missing_required_key_is_a_specific_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "api_key=secret\n");
    let err = load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::MissingKey("server_url")));
}

#[test]
fn console_id_is_generated_and_persisted_on_first_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("console_id.txt");

    let first = load_or_generate_console_id(&path).unwrap();
    assert_eq!(first.len(), 16);
    assert!(first.bytes().all(|b| b.is_ascii_hexdigit()));

    let second = load_or_generate_console_id(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn console_id_is_uppercased_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("console_id.txt");
    std::fs::write(&path, "abcdef0123456789").unwrap();

    assert_eq!(load_or_generate_console_id(&path).unwrap(), "ABCDEF0123456789");
}
