//! Protocol error types.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while building requests or reading replies.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Reply body is not the JSON document the endpoint returns.
    #[error("invalid reply body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Base URL and endpoint do not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A read endpoint answered with a non-success status.
    #[error("server returned {status}{}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Status { status: u16, detail: Option<String> },
}

impl ProtocolError {
    /// Returns true if the server answered, as opposed to a malformed exchange.
    pub fn is_server_reported(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_with_detail() {
        let err = ProtocolError::Status {
            status: 404,
            detail: Some("Activity not found".into()),
        };
        assert_eq!(err.to_string(), "server returned 404: Activity not found");
        assert!(err.is_server_reported());
    }

    #[test]
    fn status_display_without_detail() {
        let err = ProtocolError::Status {
            status: 500,
            detail: None,
        };
        assert_eq!(err.to_string(), "server returned 500");
    }
}
