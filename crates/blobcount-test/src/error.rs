//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Fixture rows have differing lengths
    #[error("ragged fixture: row {row} has {actual} cells, expected {expected}")]
    RaggedFixture {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Fixture contains a character other than 'x' or '.'
    #[error("invalid fixture character {ch:?} at ({x}, {y})")]
    InvalidFixtureChar { ch: char, x: usize, y: usize },

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] blobcount_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
