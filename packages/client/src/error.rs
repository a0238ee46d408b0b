//! Error types for the Turnboard client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Username is already claimed by another session
    #[error("Username '{0}' is already in use")]
    NameInUse(String),

    /// Server is at capacity
    #[error("Server is full")]
    ServerFull,

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
