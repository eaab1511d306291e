//! Reconciliation engine (C8) and sync executor (C9): the orchestration
//! layer tying the bundle codec, media adapters, state store, and HTTP
//! collaborator together. See §4.8-§4.9.

pub mod decide;
pub mod decision;
pub mod executor;
pub mod medium;

pub use decide::{decide, SyncAction};
pub use decision::{build_decision, build_details, SaveDetails, SyncDecision};
pub use executor::{batch_sync, sync_title_upload, BatchSummary, ExecutorError, ProgressCb};
pub use medium::{MediaRouter, MediumError, RawSpiSaveIo};
