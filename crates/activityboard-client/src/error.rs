//! Client error types.

use thiserror::Error;

use activityboard_protocol::ProtocolError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced a response (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request building or reply decoding failed, or the server refused a read.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A board action could not be carried out.
    #[error("action failed: {0}")]
    Action(String),
}

impl ClientError {
    /// Returns true for failures where the server answered with an error
    /// status, as opposed to transport or parse failures.
    pub fn is_server_reported(&self) -> bool {
        matches!(self, Self::Protocol(err) if err.is_server_reported())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("invalid base URL: {}", err))
    }
}
