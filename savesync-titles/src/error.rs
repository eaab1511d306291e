#[derive(Debug, thiserror::Error)]
pub enum TitleError {
    #[error("I/O error scanning {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("platform title listing failed: {0}")]
    Platform(String),
}
