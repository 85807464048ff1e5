//! Error types and handling for chirp
//!
//! One error enum covers the whole service. The HTTP mapping lives with the
//! API layer; everything below it propagates `Result` with `?`.

use serde::Serialize;
use thiserror::Error;

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// A single validation failure for one field of a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field the rule was evaluated against
    pub field: String,
    /// Human-readable description of the failed rule
    pub message: String,
}

impl Violation {
    /// Create a violation for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Main error type for chirp
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors, fatal at startup
    #[error("configuration error: {0}")]
    Config(String),

    /// Request body failed shape validation; every violation is collected
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<Violation>),

    /// Tweet posted under a username with no matching user record
    #[error("unknown username")]
    Unauthorized,

    /// Record lookup by identifier found nothing
    #[error("{0} not found")]
    NotFound(String),

    /// Path identifier that does not parse as a store identifier
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Document store unreachable or an operation failed
    #[error("store error: {0}")]
    Store(String),

    /// I/O errors from std
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error with a custom message
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a store error with a custom message
    pub fn store(msg: impl Into<String>) -> Self {
        Error::Store(msg.into())
    }
}

impl From<mongodb::error::Error> for Error {
    fn from(err: mongodb::error::Error) -> Self {
        Error::Store(err.to_string())
    }
}
