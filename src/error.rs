//! Centralized error types for the engine.
//!
//! Configuration problems (malformed map grids) surface as errors before any
//! board or unit is constructed. Expected gameplay failures, like bumping
//! into a wall or moving while a level is stopped, are not errors at all;
//! they are boolean rejections handled by the movement engine.

/// Main error type for the engine.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Error type for map parsing operations.
///
/// All variants are raised during grid validation, before a single tile or
/// unit has been created; a board is never partially constructed.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("Map must consist of at least one row")]
    EmptyGrid,

    #[error("Map row {0} is empty")]
    EmptyRow(usize),

    #[error("Map row {row} is {found} characters wide, expected {expected}")]
    UnequalRowLength { row: usize, expected: usize, found: usize },

    #[error("Unknown character in map: {0:?}")]
    UnknownCharacter(char),
}

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;
