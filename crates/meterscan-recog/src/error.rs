//! Error types for meterscan-recog

use crate::classify::Signature;
use thiserror::Error;

/// Errors that can occur during recognition operations
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] meterscan_core::Error),

    /// Image too small to take the configured search margins
    #[error(
        "image too small: {width}x{height} cannot take {margin_x}x{margin_y} search margins"
    )]
    ImageTooSmall {
        width: u32,
        height: u32,
        margin_x: u32,
        margin_y: u32,
    },

    /// The bounding-box search found no stable high-contrast digit region
    #[error(
        "no digit region found: candidate {width}x{height} within {search_width}x{search_height} search area"
    )]
    BoundingBoxNotFound {
        width: i32,
        height: i32,
        search_width: i32,
        search_height: i32,
    },

    /// A segment contains no data block taller than half its height
    #[error("unusable segment at x={x}: no data block taller than {height}/2 in {width}x{height} cell")]
    UnusableSegment { x: i32, width: i32, height: i32 },

    /// A computed signature has no entry in the recognition table
    #[error("unrecognized signature {signature} for digit cell {index}")]
    UnrecognizedSignature { signature: Signature, index: usize },

    /// The discovered segment count differs from the configured digit count
    #[error("expected {expected} digit cells, found {actual}")]
    DigitCountMismatch { expected: usize, actual: usize },

    /// The concatenated digits do not fit the numeric result type
    #[error("reading \"{digits}\" overflows the numeric range")]
    ValueOverflow { digits: String },

    /// A staged scan was advanced past its terminal checkpoint
    #[error("scan session already finished")]
    SessionFinished,

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
