use thiserror::Error;

/// A provider could not deliver results. Never fatal to a search.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid provider URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed provider response: {0}")]
    Decode(String),

    #[error("provider task did not complete: {0}")]
    Task(String),
}

/// The snapshot store failed. Fatal to the request.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(String),

    #[error("stored row has {0}")]
    InvalidOrigin(String),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T, E = ProviderError> = std::result::Result<T, E>;
