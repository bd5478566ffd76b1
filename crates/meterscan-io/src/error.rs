//! Error types for meterscan-io

use thiserror::Error;

/// Errors that can occur during raster I/O
#[derive(Debug, Error)]
pub enum IoError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] meterscan_core::Error),

    /// Image codec error
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// Encoding produced no image
    #[error("encode error: {0}")]
    Encode(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;
