//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// A digit has no entry in the fixture's stroke font
    #[error("digit {digit} has no fixture glyph")]
    UnsupportedDigit { digit: u8 },

    /// Fixture construction failed
    #[error("fixture error: {0}")]
    Fixture(String),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
