//! Client error types
//!
//! Every failure of a backend call falls in one of three groups: transport
//! (`Transport`, `Timeout`, `Unavailable`, `Status`), undecodable responses
//! (`Decode`) and application-level refusals (`Rejected`).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request timeout")]
    Timeout,

    /// Connection refused or host unreachable
    #[error("Backend unavailable")]
    Unavailable,

    /// Non-2xx response
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not the expected JSON
    #[error("Malformed response: {0}")]
    Decode(String),

    /// `success: false` envelope
    #[error("Rejected by server: {message}")]
    Rejected { message: String },

    /// Client could not be configured (bad header value, bad base URL)
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Classify a reqwest error the way the rest of the client reports it
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err)
        }
    }

    /// Message to surface to the user for a failed user action
    pub fn user_message(&self) -> &str {
        match self {
            ClientError::Rejected { message } => message,
            _ => crate::present::GENERIC_ERROR,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let err = ClientError::Rejected {
            message: "already monitored".to_string(),
        };
        assert_eq!(err.user_message(), "already monitored");
        assert_eq!(err.to_string(), "Rejected by server: already monitored");

        let err = ClientError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.user_message(), "An error occurred");
    }

    #[test]
    fn test_json_error_conversion() {
        let err: ClientError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
