//! Error types for presentation inventory, replacement and rearrangement.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, editing or writing a presentation.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open, read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The input is not an OOXML package at all.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// The package opened but its structure is not a usable presentation.
    #[error("Invalid presentation package: {0}")]
    PackageError(String),

    /// Invalid or corrupted file.
    #[error("Invalid or corrupted file: {0}")]
    CorruptedFile(String),

    /// ZIP archive error.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing or writing error.
    #[error("XML error: {0}")]
    XmlError(String),

    /// Malformed inventory or replacement JSON.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A slide or shape identifier that does not follow `slide-<n>` / `shape-<n>`.
    #[error("Invalid identifier '{0}'")]
    InvalidKey(String),

    /// A color that is not a six digit RGB hex value.
    #[error("Invalid color '{0}': expected six hex digits such as FF0000")]
    InvalidColor(String),

    /// A paragraph record with out-of-range formatting.
    #[error("Invalid paragraph: {0}")]
    InvalidParagraph(String),

    /// A replacement addressed a slide the presentation does not have.
    #[error("Slide not found: {0}")]
    SlideNotFound(String),

    /// A replacement addressed a shape the slide does not have.
    #[error("Shape not found: {shape} on {slide}")]
    ShapeNotFound { slide: String, shape: String },

    /// A replacement addressed a shape that cannot hold text.
    #[error("Shape {shape} on {slide} has no text frame (pictures, groups, connectors and graphic frames cannot hold text)")]
    NoTextFrame { slide: String, shape: String },

    /// The slide index list was empty.
    #[error("Slide index list is empty")]
    EmptyIndexList,

    /// A slide index token that is not a non-negative integer.
    #[error("Invalid slide index '{0}': expected a non-negative integer")]
    InvalidIndex(String),

    /// A slide index beyond the end of the presentation.
    #[error("Slide index {index} out of range: presentation has {count} slides")]
    IndexOutOfRange { index: usize, count: usize },
}
