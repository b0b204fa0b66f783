use thiserror::Error as ThisError;

/// Errors raised by the status engine and its capabilities.
#[derive(ThisError, Debug)]
pub enum Error {
    #[error("status endpoint '{0}' returned an empty status list")]
    // (endpoint name)
    EmptyStatusList(String),

    #[error("status path '{0}' is already registered")]
    // (slug)
    DuplicateSlug(String),

    #[error("request to '{url}' failed: {source}")]
    RemoteRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid status payload from '{url}': {source}")]
    RemoteDecode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("request to '{url}' returned HTTP {status}")]
    RemoteStatus { url: String, status: u16 },

    #[error("{0}")]
    // (message)
    Traverse(String),
}

impl Error {
    /// Traversal failure carrying a plain message.
    pub fn traverse<S: Into<String>>(message: S) -> Error {
        Error::Traverse(message.into())
    }
}

/// Short form alias for functions returning `Error`s.
pub type Result<T> = std::result::Result<T, Error>;
