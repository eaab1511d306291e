//! Configuration loader and console ID. The config *loader* itself is a
//! host-side collaborator in the strictest sense, but the
//! `config.txt`/`console_id.txt` on-disk formats are part of the
//! in-scope persisted state layout (§6), so they're implemented here
//! rather than left abstract.
//!
//! The `key=value` format (§6) is fixed by the wire contract, not TOML or
//! any other config format — callers should not expect this loader to
//! accept anything else.

use std::path::{Path, PathBuf};

use rand::RngCore;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing required config key '{0}'")]
    MissingKey(&'static str),

    #[error("failed to write console ID: {0}")]
    WriteConsoleId(#[source] std::io::Error),
}

/// Parsed `config.txt` contents (§6). Only `server_url` and `api_key` are
/// required; the rest are optional collaborator settings the core never
/// reads itself (save_dir is consumed by the media adapters' caller,
/// wifi_* by the out-of-scope network-bring-up collaborator) but still
/// round-trips through this loader since it owns the file format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server_url: String,
    pub api_key: String,
    pub save_dir: Option<String>,
    pub wifi_ssid: Option<String>,
    pub wifi_wep_key: Option<String>,
}

const UTF8_BOM: &str = "\u{feff}";

/// Load and parse `config.txt` from `path`. UTF-8 BOM is stripped if
/// present; `#`-prefixed and blank lines are skipped; any other line must
/// be `key=value` (unrecognized keys are ignored, not an error).
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let contents = raw.strip_prefix(UTF8_BOM).unwrap_or(&raw);

    let mut server_url = None;
    let mut api_key = None;
    let mut save_dir = None;
    let mut wifi_ssid = None;
    let mut wifi_wep_key = None;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().to_string();
        match key.trim() {
            "server_url" => server_url = Some(value),
            "api_key" => api_key = Some(value),
            "save_dir" => save_dir = Some(value),
            "wifi_ssid" => wifi_ssid = Some(value),
            "wifi_wep_key" => wifi_wep_key = Some(value),
            _ => {}
        }
    }

    Ok(AppConfig {
        server_url: server_url.ok_or(ConfigError::MissingKey("server_url"))?,
        api_key: api_key.ok_or(ConfigError::MissingKey("api_key"))?,
        save_dir,
        wifi_ssid,
        wifi_wep_key,
    })
}

/// Load the console ID from `path` if it's a valid 16-char hex string,
/// generating and persisting a fresh one otherwise (§6).
pub fn load_or_generate_console_id(path: &Path) -> Result<String, ConfigError> {
    if let Some(id) = read_console_id(path) {
        return Ok(id);
    }

    let id = generate_console_id();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(ConfigError::WriteConsoleId)?;
    }
    std::fs::write(path, &id).map_err(ConfigError::WriteConsoleId)?;
    Ok(id)
}

fn read_console_id(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let trimmed = contents.trim();
    if trimmed.len() == 16 && trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
        Some(trimmed.to_uppercase())
    } else {
        None
    }
}

fn generate_console_id() -> String {
    let mut bytes = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}

/// Default location of `config.txt` under the user's storage root.
pub fn default_config_path(root: &Path) -> PathBuf {
    root.join("config.txt")
}

/// Default location of `console_id.txt` under the user's storage root.
pub fn default_console_id_path(root: &Path) -> PathBuf {
    root.join("console_id.txt")
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
