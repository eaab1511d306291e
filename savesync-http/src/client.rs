//! Blocking HTTP client for the `/api/v1` surface (§6). Single-threaded
//! cooperative model per §5: a brief inter-request pause stands in for the
//! original client's `request_delay()` (`network.c`), and every call
//! blocks rather than returning a future — this core has no executor.

use std::thread::sleep;
use std::time::Duration;

use crate::error::SyncHttpError;
use crate::wire::{HistoryResponse, NamesRequest, NamesResponse, SaveMeta, SyncPlan, SyncRequest};

/// Host-imposed POST body ceiling (§4.9, "≈448 KiB on the most constrained
/// target"), matching the original client's 0x70000-byte `MAX_POST_SIZE`.
pub const MAX_POST_BODY_BYTES: usize = 0x70000;

/// Pause between consecutive requests, letting the host's HTTP stack
/// release resources (§5).
const INTER_REQUEST_DELAY: Duration = Duration::from_millis(50);

/// Everything the sync executor needs from the network. Kept as a trait so
/// `savesync-engine` can be exercised against an in-memory fake.
pub trait SyncApiClient {
    fn fetch_save(&self, title_id_hex: &str) -> Result<Vec<u8>, SyncHttpError>;
    fn upload_save(&self, title_id_hex: &str, bundle: &[u8]) -> Result<(), SyncHttpError>;
    fn fetch_meta(&self, title_id_hex: &str) -> Result<SaveMeta, SyncHttpError>;
    fn fetch_history(&self, title_id_hex: &str) -> Result<HistoryResponse, SyncHttpError>;
    fn fetch_history_version(
        &self,
        title_id_hex: &str,
        timestamp: u32,
    ) -> Result<Vec<u8>, SyncHttpError>;
    fn post_sync(&self, request: &SyncRequest) -> Result<SyncPlan, SyncHttpError>;
    fn resolve_names(&self, codes: &[String]) -> Result<NamesResponse, SyncHttpError>;
}

/// `reqwest::blocking`-backed [`SyncApiClient`].
pub struct HttpSyncApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    console_id: String,
    user_agent: String,
}

impl HttpSyncApiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, console_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            console_id: console_id.into(),
            user_agent: format!("savesync/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    fn request_delay(&self) {
        sleep(INTER_REQUEST_DELAY);
    }

    fn headers(&self, builder: reqwest::blocking::RequestBuilder) -> reqwest::blocking::RequestBuilder {
        builder
            .header("X-API-Key", &self.api_key)
            .header("X-Console-ID", &self.console_id)
            .header("User-Agent", &self.user_agent)
            .header("Connection", "close")
    }

    fn check_status(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, SyncHttpError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().unwrap_or_default();
            Err(SyncHttpError::Server { status, body })
        }
    }
}

impl SyncApiClient for HttpSyncApiClient {
    fn fetch_save(&self, title_id_hex: &str) -> Result<Vec<u8>, SyncHttpError> {
        self.request_delay();
        let resp = self.headers(self.http.get(self.url(&format!("/saves/{title_id_hex}")))).send()?;
        let resp = Self::check_status(resp)?;
        Ok(resp.bytes()?.to_vec())
    }

    fn upload_save(&self, title_id_hex: &str, bundle: &[u8]) -> Result<(), SyncHttpError> {
        if bundle.len() > MAX_POST_BODY_BYTES {
            return Err(SyncHttpError::TooLarge {
                size: bundle.len(),
                limit: MAX_POST_BODY_BYTES,
            });
        }
        self.request_delay();
        let resp = self
            .headers(self.http.post(self.url(&format!("/saves/{title_id_hex}"))))
            .header("Content-Type", "application/octet-stream")
            .body(bundle.to_vec())
            .send()?;
        Self::check_status(resp)?;
        Ok(())
    }

    fn fetch_meta(&self, title_id_hex: &str) -> Result<SaveMeta, SyncHttpError> {
        self.request_delay();
        let resp = self
            .headers(self.http.get(self.url(&format!("/saves/{title_id_hex}/meta"))))
            .send()?;
        let resp = Self::check_status(resp)?;
        Ok(resp.json()?)
    }

    fn fetch_history(&self, title_id_hex: &str) -> Result<HistoryResponse, SyncHttpError> {
        self.request_delay();
        let resp = self
            .headers(self.http.get(self.url(&format!("/saves/{title_id_hex}/history"))))
            .send()?;
        let resp = Self::check_status(resp)?;
        Ok(resp.json()?)
    }

    fn fetch_history_version(
        &self,
        title_id_hex: &str,
        timestamp: u32,
    ) -> Result<Vec<u8>, SyncHttpError> {
        self.request_delay();
        let resp = self
            .headers(
                self.http
                    .get(self.url(&format!("/saves/{title_id_hex}/history/{timestamp}"))),
            )
            .send()?;
        let resp = Self::check_status(resp)?;
        Ok(resp.bytes()?.to_vec())
    }

    fn post_sync(&self, request: &SyncRequest) -> Result<SyncPlan, SyncHttpError> {
        self.request_delay();
        let resp = self
            .headers(self.http.post(self.url("/sync")))
            .json(request)
            .send()?;
        let resp = Self::check_status(resp)?;
        Ok(resp.json()?)
    }

    fn resolve_names(&self, codes: &[String]) -> Result<NamesResponse, SyncHttpError> {
        self.request_delay();
        let body = NamesRequest {
            codes: codes.to_vec(),
        };
        let resp = self
            .headers(self.http.post(self.url("/titles/names")))
            .json(&body)
            .send()?;
        let resp = Self::check_status(resp)?;
        Ok(resp.json()?)
    }
}
