//! Error types for unlayout library.

use std::io;
use thiserror::Error;

/// Result type alias for unlayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during layout reconstruction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A rectangle was built with a negative or non-finite extent.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The document as a whole could not be decoded.
    #[error("Document decoding error: {0}")]
    DocumentDecode(String),

    /// A single page could not be decoded.
    #[error("Page {page} could not be decoded: {message}")]
    PageDecode {
        /// Page number (1-indexed)
        page: u32,
        /// Decoder message
        message: String,
    },

    /// A pipeline invariant was violated (wrong skeleton kind, missing bullets, ...).
    #[error("Structure violation: {0}")]
    Structure(String),

    /// A line index does not exist in the block it was looked up in.
    #[error("Line {line} is out of range (block has {len} lines)")]
    LineOutOfRange {
        /// Requested line index
        line: usize,
        /// Number of lines available
        len: usize,
    },

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error during rendering (HTML, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error only affects a single page and the rest of the
    /// document can still be processed.
    pub fn is_page_local(&self) -> bool {
        matches!(self, Error::PageDecode { .. })
    }
}
