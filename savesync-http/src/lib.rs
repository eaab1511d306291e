//! HTTP transport collaborator: the `/api/v1` request/response surface
//! the sync engine consumes (§6). The transport itself is nominally
//! out-of-scope per §1 ("the core calls GET/POST/POST-JSON"), but
//! the wire shapes and header contract are part of the in-scope
//! interface, so they're implemented here rather than left abstract.

pub mod client;
pub mod error;
pub mod wire;

pub use client::{HttpSyncApiClient, SyncApiClient, MAX_POST_BODY_BYTES};
pub use error::SyncHttpError;
pub use wire::{
    HistoryResponse, HistoryVersion, NamesRequest, NamesResponse, SaveMeta, SyncPlan,
    SyncRequest, SyncTitleEntry,
};

#[cfg(test)]
#[path = "tests/wire_tests.rs"]
mod wire_tests;
