//! Error types for arpwarden

use thiserror::Error;

/// Result type alias for arpwarden operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for arpwarden
#[derive(Error, Debug)]
pub enum Error {
    /// Interface not found
    #[error("Interface '{0}' not found")]
    InterfaceNotFound(String),

    /// Interface exists but cannot provide a usable local binding
    #[error("Interface configuration error: {0}")]
    InterfaceConfig(String),

    /// Interface error (channel setup, send path)
    #[error("Interface error: {0}")]
    Interface(String),

    /// Packet capture error
    #[error("Packet capture error: {0}")]
    Capture(String),

    /// Packet parsing error
    #[error("Packet parsing error: {0}")]
    PacketParsing(String),

    /// Frame transmission failure
    #[error("Transmission failed: {0}")]
    Transmission(String),
}

impl Error {
    /// Create a parsing error with a custom message
    pub fn parsing<S: Into<String>>(msg: S) -> Self {
        Error::PacketParsing(msg.into())
    }
}
