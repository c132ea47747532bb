use rspotify::{ClientError, model::IdError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to parse instruction: {0:?}")]
    Parse(String),

    #[error("Remote service did not answer in time")]
    Timeout,

    #[error("Remote service unexpected response: {0}")]
    Remote(String),

    #[error("No active playback device")]
    NoActiveDevice,

    #[error("Remote service refused to queue the track: {0}")]
    QueueRejected(String),

    #[error("No tracks found for {0:?}")]
    NoResults(String),

    // Raised when a remote fragment lacks a field we cannot do without
    #[error("Malformed {entity} fragment: missing or invalid `{field}`")]
    Mapping {
        entity: &'static str,
        field: &'static str,
    },

    #[error("Spotify error: {0}")]
    Spotify(#[from] ClientError),

    #[error("Invalid Spotify id: {0}")]
    InvalidId(#[from] IdError),

    #[error("Deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Messaging transport error: {0}")]
    Transport(String),
}

impl Error {
    /// True when the remote service broke its response contract, as opposed
    /// to a transient failure or bad user input.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::Mapping { .. } | Error::InvalidId(_) | Error::Json(_)
        )
    }
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::Configuration(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Configuration(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::Transport(err.to_string())
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
