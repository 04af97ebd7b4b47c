//! Error types for pngpadder

use std::{io, path::PathBuf};

/// Result type for padding operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, padding or writing a PNG
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input image does not exist
    #[error("Input image does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    /// First 8 bytes are not the PNG signature
    #[error("Image is not a PNG file")]
    NotAPng,

    /// A chunk record runs past the end of the file
    #[error("Truncated PNG at offset {offset}: needed {needed} bytes, {remaining} remain")]
    TruncatedFile {
        offset: u64,
        needed: u64,
        remaining: u64,
    },

    /// Requested absolute size is below the current file size
    #[error("File is already bigger than the supplied size ({current} > {target})")]
    TargetTooSmall { current: u64, target: i64 },

    /// Requested increase cannot hold a chunk
    #[error("Files can only be expanded by a minimum of 12 bytes (requested {0})")]
    PaddingTooSmall(i64),

    /// Padding data would not fit in a single chunk
    #[error("Files can only be expanded by a maximum of {max} bytes (requested {requested})")]
    PaddingTooLarge { requested: u64, max: u64 },

    /// No chunk to insert the padding before
    #[error("PNG has no chunks after the signature")]
    MalformedStream,

    /// Any other I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
