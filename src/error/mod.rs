//! Error handling for the crypto core
//!
//! Every codec validates its own input and fails fast with one of these
//! variants. The only operation that never returns an error for bad input is
//! `wallet::is_address`, which is a predicate.

use std::fmt;

/// Result type alias for crypto core operations
pub type Result<T> = std::result::Result<T, TronError>;

/// Error kinds surfaced by the crate
#[derive(Debug, Clone, PartialEq)]
pub enum TronError {
    /// Malformed numeric literal, base outside [2,256], invalid hex, bad alphabet
    Validation(String),
    /// Unsupported digest length or SHAKE security level
    UnsupportedOperation(String),
    /// Missing key material, malformed transaction shape, upstream error marker
    Runtime(String),
    /// The transaction payload already carries a signature
    AlreadySigned,
    /// Configuration errors
    Config(String),
    /// File I/O errors
    Io(String),
    /// JSON / TOML (de)serialization errors
    Serialization(String),
}

impl TronError {
    /// True for the errors raised by the signing pipeline and key handling.
    pub fn is_runtime(&self) -> bool {
        matches!(self, TronError::Runtime(_) | TronError::AlreadySigned)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TronError::Validation(_))
    }
}

impl fmt::Display for TronError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TronError::Validation(msg) => write!(f, "Validation error: {msg}"),
            TronError::UnsupportedOperation(msg) => write!(f, "Unsupported operation: {msg}"),
            TronError::Runtime(msg) => write!(f, "Runtime error: {msg}"),
            TronError::AlreadySigned => write!(f, "Runtime error: transaction is already signed"),
            TronError::Config(msg) => write!(f, "Configuration error: {msg}"),
            TronError::Io(msg) => write!(f, "I/O error: {msg}"),
            TronError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for TronError {}

impl From<std::io::Error> for TronError {
    fn from(err: std::io::Error) -> Self {
        TronError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TronError {
    fn from(err: serde_json::Error) -> Self {
        TronError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for TronError {
    fn from(err: toml::de::Error) -> Self {
        TronError::Config(err.to_string())
    }
}
