use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] savesync_config::ConfigError),

    #[error("{0}")]
    Title(#[from] savesync_titles::TitleError),

    #[error("{0}")]
    Medium(#[from] savesync_engine::MediumError),

    #[error("{0}")]
    Executor(#[from] savesync_engine::ExecutorError),

    #[error("{0}")]
    Http(#[from] savesync_http::SyncHttpError),

    #[error("{0}")]
    State(#[from] savesync_state::SyncStateError),

    #[error("{0}")]
    Bundle(#[from] savesync_core::BundleError),

    #[error("unknown title {0}: not in the enumerated title list")]
    UnknownTitle(String),
}
