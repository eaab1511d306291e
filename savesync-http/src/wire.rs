//! JSON wire shapes for the `/api/v1` surface (§6). Field names match the
//! server contract exactly — these are serialized/deserialized verbatim,
//! not adapted to Rust naming conventions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct SyncTitleEntry {
    pub title_id: String,
    pub save_hash: String,
    pub timestamp: u32,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_synced_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncRequest {
    pub console_id: String,
    pub titles: Vec<SyncTitleEntry>,
}

/// The server's partition of every submitted title into one of five
/// buckets (§4.9 step 3). Each list is an array of hex title IDs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncPlan {
    #[serde(default)]
    pub upload: Vec<String>,
    #[serde(default)]
    pub download: Vec<String>,
    #[serde(default)]
    pub server_only: Vec<String>,
    #[serde(default)]
    pub conflict: Vec<String>,
    #[serde(default)]
    pub up_to_date: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveMeta {
    pub save_hash: String,
    pub save_size: u32,
    pub file_count: u32,
    pub last_sync: String,
    pub console_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryVersion {
    pub timestamp: u32,
    pub size: u32,
    pub file_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    pub versions: Vec<HistoryVersion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NamesRequest {
    pub codes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamesResponse {
    pub names: std::collections::HashMap<String, String>,
}
