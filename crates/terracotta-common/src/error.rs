//! Error types for the Terracotta viewer client.

use thiserror::Error;

/// Result type alias using ClientError.
pub type ClientResult<T> = Result<T, ClientError>;

/// Primary error type for client operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    // === Network Errors ===
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Invalid response from {url}: {message}")]
    Decode { url: String, message: String },

    // === Local Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Selection(String),
}

impl ClientError {
    /// Fragment shown after "API request failed: " in the error list.
    pub fn status_text(&self) -> String {
        match self {
            ClientError::Http { status, .. } => status.to_string(),
            ClientError::Transport { message, .. } | ClientError::Decode { message, .. } => {
                message.clone()
            }
            ClientError::Config(message) | ClientError::Selection(message) => message.clone(),
        }
    }

    /// URL of the failed request, if the error came from the network.
    pub fn url(&self) -> Option<&str> {
        match self {
            ClientError::Http { url, .. }
            | ClientError::Transport { url, .. }
            | ClientError::Decode { url, .. } => Some(url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_uses_http_code() {
        let err = ClientError::Http {
            status: 404,
            url: "http://host/keys".to_string(),
        };
        assert_eq!(err.status_text(), "404");
        assert_eq!(err.url(), Some("http://host/keys"));
    }

    #[test]
    fn test_selection_is_not_network() {
        let err = ClientError::Selection("Select a region first".to_string());
        assert_eq!(err.to_string(), "Select a region first");
        assert_eq!(err.url(), None);
    }
}
