use thiserror::Error;

#[derive(Debug, Error)]
pub enum HedError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A countable event-code record has no `tag` field.
    #[error("event code record {index} (code {code:?}) has instances but no tag")]
    MissingTag { index: usize, code: Option<String> },

    #[error("event code record {index} (code {code:?}) has a tag that is not a string")]
    MalformedTag { index: usize, code: Option<String> },

    #[error("output {0:?} is already claimed by another container")]
    DuplicateOutput(std::path::PathBuf),

    #[error("invalid ESS container: {0}")]
    InvalidContainer(String),
}

pub type Result<T> = std::result::Result<T, HedError>;
