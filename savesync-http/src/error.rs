//! Error kinds for the HTTP collaborator (§7: NETWORK, SERVER, TOO_LARGE).

#[derive(Debug, thiserror::Error)]
pub enum SyncHttpError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("compressed bundle ({size} bytes) exceeds the {limit}-byte upload ceiling")]
    TooLarge { size: usize, limit: usize },
}
