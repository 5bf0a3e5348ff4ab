//! Error types for pagediff-doc
//!
//! [`RasterError`] is what a rasterization collaborator reports.
//! [`DiffError`] is what the document differ reports; it always names the
//! stage that failed and, for page work, the 1-based page number.

use std::fmt;
use thiserror::Error;

/// Which of the two compared documents an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentSide {
    /// The first (reference) document
    First,
    /// The second (candidate) document
    Second,
}

impl fmt::Display for DocumentSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("first"),
            Self::Second => f.write_str("second"),
        }
    }
}

/// Errors reported by a rasterization collaborator
#[derive(Debug, Error)]
pub enum RasterError {
    /// Bitmap codec error while opening or decoding a document
    #[error("codec error: {0}")]
    Io(#[from] pagediff_io::IoError),

    /// Core library error (e.g. invalid scale)
    #[error("core error: {0}")]
    Core(#[from] pagediff_core::Error),

    /// The document bytes could not be interpreted
    #[error("cannot decode document: {0}")]
    Decode(String),

    /// The document kind is not supported by this rasterizer
    #[error("unsupported document: {0}")]
    Unsupported(String),

    /// Requested page does not exist
    #[error("page index {index} out of range (document has {page_count} pages)")]
    PageOutOfRange { index: usize, page_count: usize },

    /// Rendering a page failed
    #[error("render failed: {0}")]
    Render(String),
}

/// Result type for rasterization operations
pub type RasterResult<T> = Result<T, RasterError>;

/// Errors that can occur while diffing two documents
#[derive(Debug, Error)]
pub enum DiffError {
    /// A document could not be opened; raised before any page work
    #[error("failed to load {side} document: {source}")]
    DocumentLoad {
        side: DocumentSide,
        #[source]
        source: RasterError,
    },

    /// A page could not be rendered
    #[error("failed to render page {page_number} of {side} document: {source}")]
    PageRender {
        side: DocumentSide,
        page_number: usize,
        #[source]
        source: RasterError,
    },

    /// The comparator failed on a page pair
    #[error("failed to compare page {page_number}: {source}")]
    PageCompare {
        page_number: usize,
        #[source]
        source: pagediff_compare::CompareError,
    },

    /// Options are out of range or overrides are malformed
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// The comparison was cancelled through its cancel flag
    #[error("comparison cancelled")]
    Cancelled,
}

/// Result type for document diff operations
pub type DiffResult<T> = Result<T, DiffError>;
