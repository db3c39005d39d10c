//! Error handling for Drawkit
//!
//! Errors that can surface from the scene model are few: a unit token that
//! does not name a known unit, a persisted document that is not well-formed,
//! and I/O failures while reading or writing documents. Everything else in
//! the model is tolerant by construction (bad attributes fall back to
//! defaults, unknown properties are ignored).

use thiserror::Error;

/// Main error type for Drawkit
#[derive(Error, Debug)]
pub enum Error {
    /// A unit string did not match any known unit or alias
    #[error("Invalid unit: {token}")]
    InvalidUnit {
        /// The token that failed to parse.
        token: String,
    },

    /// A persisted document could not be parsed
    #[error("XML error at byte {position}: {reason}")]
    Xml {
        /// Byte offset reported by the reader.
        position: u64,
        /// Description of the failure.
        reason: String,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Create an XML error at the given reader position
    pub fn xml(position: u64, reason: impl Into<String>) -> Self {
        Error::Xml {
            position,
            reason: reason.into(),
        }
    }

    /// Check if this is a document parse error
    pub fn is_xml_error(&self) -> bool {
        matches!(self, Error::Xml { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
