//! Client error types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Client errors
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error (connection reset, timeout, TLS, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A URL could not be parsed or extended with path segments
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A mandatory argument was empty
    #[error("required argument is empty: {0}")]
    EmptyArgument(&'static str),

    /// Container name is too long or contains a disallowed character
    #[error("invalid container name: {0:?}")]
    InvalidContainerName(String),

    /// Object name is too long or contains a disallowed character
    #[error("invalid object name: {0:?}")]
    InvalidObjectName(String),

    /// Container does not exist
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    /// Object does not exist
    #[error("object not found: {container}/{name}")]
    ObjectNotFound { container: String, name: String },

    /// Container already exists (create returned 202)
    #[error("container already exists: {0}")]
    ContainerAlreadyExists(String),

    /// Container still holds objects (delete returned 409)
    #[error("container not empty: {0}")]
    ContainerNotEmpty(String),

    /// Credentials or token were rejected
    #[error("authentication failed")]
    Unauthorized,

    /// The session carries no CDN management URL
    #[error("provider does not expose a CDN management URL")]
    CdnNotAvailable,

    /// Server rejected the upload because the ETag did not match the body
    #[error("ETag mismatch: server rejected checksum {sent}")]
    EtagMismatch { sent: String },

    /// Response was missing a mandatory header or had an unparseable body
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Any other non-success status
    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },
}

impl Error {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ContainerNotFound(_) | Self::ObjectNotFound { .. }
        )
    }

    /// Check if this is a conflict (already-exists or not-empty)
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::ContainerAlreadyExists(_) | Self::ContainerNotEmpty(_)
        )
    }

    /// Check if this is a local validation error raised before any I/O
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyArgument(_) | Self::InvalidContainerName(_) | Self::InvalidObjectName(_)
        )
    }
}
