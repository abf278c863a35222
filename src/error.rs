// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types with consistent user-facing messages.

/// Error returned by API calls and quest flows.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("No photo captured")]
    MissingImage,

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Invalid request: {0}")]
    InvalidInput(String),
}

impl ClientError {
    /// Returns true for a 404 from the server.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }

    /// Returns true when the request never got an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// Short message suitable for inline display.
    ///
    /// Server-supplied messages are passed through for client errors (4xx),
    /// everything else collapses to a generic line.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(_) => "Could not reach the server".to_string(),
            ClientError::Status { status, message } if (400..500).contains(status) => {
                if message.is_empty() {
                    "Request was rejected".to_string()
                } else {
                    message.clone()
                }
            }
            ClientError::Status { .. } => "Something went wrong on the server".to_string(),
            ClientError::NotFound(_) => "Not found".to_string(),
            ClientError::Decode(_) => "Unexpected response from the server".to_string(),
            ClientError::MissingImage => "Take a photo first".to_string(),
            ClientError::InvalidImage(_) => "That photo could not be read".to_string(),
            ClientError::NotAuthenticated => "Please log in".to_string(),
            ClientError::InvalidInput(msg) => msg.clone(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// Result type alias for client calls
pub type Result<T> = std::result::Result<T, ClientError>;
