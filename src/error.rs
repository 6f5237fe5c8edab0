//! Error types for pdf-contents.

use std::io;
use thiserror::Error;

/// Result type alias for pdf-contents operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or manipulating contents.
#[derive(Error, Debug)]
pub enum Error {
    /// An attribute path does not resolve on a content.
    #[error("Cannot resolve attribute '{path}': {reason}")]
    AttributeResolution {
        /// The path as written by the caller
        path: String,
        /// Why the path could not be resolved
        reason: String,
    },

    /// Invalid operation parameters (delimiters, tolerances, path syntax).
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A reference index outside the container.
    #[error("Index {index} is out of range (container has {len} contents)")]
    IndexOutOfRange {
        /// The requested index
        index: usize,
        /// Number of contents in the container
        len: usize,
    },

    /// The document is encrypted and no password could be found.
    #[error("No password found between '#' in the filename")]
    MissingPassword,

    /// The password was rejected by the page source.
    #[error("Wrong password parsed from filename")]
    InvalidPassword,

    /// The document name does not carry a supported extension.
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    /// Extraction produced no text content.
    #[error("No text content found in document")]
    NoContent,

    /// I/O error when reading a page dump.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON page dump.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build an [`Error::AttributeResolution`].
    pub fn attribute(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::AttributeResolution {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
