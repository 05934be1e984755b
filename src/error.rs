//! Error types for the engine.

use thiserror::Error;

/// The one fatal condition the engine can raise: a revealed cell whose
/// declared mine count is smaller than its already-flagged neighbor count.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error(
        "illegal position at ({x}, {y}): value {value} is less than {flagged_neighbors} flagged neighbors"
    )]
    IllegalPosition {
        x: usize,
        y: usize,
        value: u8,
        flagged_neighbors: u8,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
