use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("message text must not be empty")]
    EmptyMessage,
    #[error("only one of before, after or since may be given")]
    ConflictingCursors,
    #[error("this recipient does not support the {0} cursor")]
    UnsupportedCursor(&'static str),
    #[error("{0} must not be empty")]
    EmptyIdentifier(&'static str),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api returned HTTP {status}: {}", .errors.join("; "))]
    Api { status: u16, errors: Vec<String> },
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("api response had no payload")]
    MissingResponse,
}

impl Error {
    /// True for errors raised before any request is made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::EmptyMessage
                | Error::ConflictingCursors
                | Error::UnsupportedCursor(_)
                | Error::EmptyIdentifier(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
