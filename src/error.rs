//! Error types for pickframe operations.

use crate::geometry::{Rect, Size};
use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pickframe operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a surface.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Source and destination areas of a copy differ in size.
    #[error(
        "Size mismatch: source is {}x{}, destination is {}x{}",
        source_size.width,
        source_size.height,
        destination_size.width,
        destination_size.height
    )]
    SizeMismatch {
        /// Resolved source rectangle size.
        source_size: Size,
        /// Resolved destination rectangle size.
        destination_size: Size,
    },

    /// A copy rectangle does not fit inside its surface.
    #[error("Rectangle {rect:?} lies outside a {width}x{height} surface")]
    RectOutOfBounds {
        /// The offending rectangle.
        rect: Rect,
        /// Surface width.
        width: u32,
        /// Surface height.
        height: u32,
    },

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),
}
